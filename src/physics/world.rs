//! The body collection a simulation operates on

use crate::physics::body::Body;

/// Ordered collection of bodies
///
/// Insertion order is preserved and indices are stable: bodies are only
/// appended, never removed individually. Integration visits bodies in this
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    pub(crate) bodies: Vec<Body>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bodies(bodies: impl IntoIterator<Item = Body>) -> Self {
        Self {
            bodies: bodies.into_iter().collect(),
        }
    }

    /// Appends a body and returns its index
    pub fn push(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Drops every body; used when the host restarts the scenario
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }
}

impl<'a> IntoIterator for &'a World {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
