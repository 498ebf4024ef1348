//! Gravwell library
//!
//! The physics core (`physics`, `interaction`) is plain data and functions.
//! The Bevy plugins in `plugins` host it in a window; the same core is used by
//! the headless mode, the integration tests and the benchmarks.

pub mod cli;
pub mod config;
pub mod events;
pub mod headless;
pub mod interaction;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod states;

// Test utilities are public for integration tests
pub mod test_utils;
