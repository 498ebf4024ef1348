//! Windowless runs
//!
//! Drives [`SimulationPlugin`] for a fixed number of ticks without a window and
//! reports where every body ended up.

use crate::physics::World;
use crate::plugins::simulation::SimulationPlugin;
use crate::prelude::*;
use crate::resources::SimulationWorld;
use bevy::log::LogPlugin;
use bevy::state::app::StatesPlugin;
use std::fmt::Write;

/// App with the simulation and no rendering
pub fn headless_app(config: SimulationConfig, paused: bool, log: Option<LogPlugin>) -> App {
    let mut app = App::new();
    if let Some(log) = log {
        app.add_plugins(log);
    }
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.add_plugins(SimulationPlugin::with_config(config).start_paused(paused));
    app.finish();
    app.cleanup();
    app
}

/// Runs `steps` fixed ticks and returns the resulting world
pub fn run(app: &mut App, steps: u64) -> World {
    for _ in 0..steps {
        app.world_mut().run_schedule(FixedUpdate);
    }
    app.world().resource::<SimulationWorld>().0.clone()
}

/// Fixed-width table of body states, one row per body
pub fn body_table(world: &World) -> String {
    let mut table = format!(
        "{:>5} {:>10} {:>7} {:>12} {:>12} {:>12} {:>12} {:>10}\n",
        "index", "mass", "radius", "x", "y", "vx", "vy", "stationary"
    );
    for (index, body) in world.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(
            table,
            "{:>5} {:>10.3} {:>7.1} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>10}",
            index,
            body.mass(),
            body.radius,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y,
            body.stationary
        );
    }
    table
}
