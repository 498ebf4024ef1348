use bevy::log::{Level, LogPlugin};
use bevy::window::WindowResolution;
use clap::Parser;
use gravwell::cli::{Args, handle_list_integrators, load_and_apply_config};
use gravwell::headless;
use gravwell::plugins::{
    camera::CameraPlugin, controls::ControlsPlugin, pointer::PointerPlugin,
    simulation::SimulationPlugin, visualization::VisualizationPlugin,
};
use gravwell::prelude::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_integrators {
        handle_list_integrators();
        return ExitCode::SUCCESS;
    }

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.print_config || args.save_config.is_some() {
        return export_config(&args, &config);
    }

    let log = LogPlugin {
        level: if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        },
        ..default()
    };

    if let Some(steps) = args.headless {
        let mut app = headless::headless_app(config, args.paused, Some(log));
        let world = headless::run(&mut app, steps);
        print!("{}", headless::body_table(&world));
        return ExitCode::SUCCESS;
    }

    let window = Window {
        title: config.rendering.title.clone(),
        resolution: WindowResolution::new(
            config.rendering.window_width,
            config.rendering.window_height,
        ),
        resizable: false,
        ..default()
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(window),
                ..default()
            })
            .set(log),
    );
    app.add_plugins((
        SimulationPlugin::with_config(config).start_paused(args.paused),
        CameraPlugin,
        PointerPlugin,
        ControlsPlugin,
        VisualizationPlugin,
    ));

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}

fn export_config(args: &Args, config: &SimulationConfig) -> ExitCode {
    if args.print_config {
        match config.to_toml() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = &args.save_config {
        if let Err(e) = config.save(path) {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
        println!("Configuration saved to: {}", path.display());
    }

    ExitCode::SUCCESS
}
