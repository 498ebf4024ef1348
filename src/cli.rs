//! Command line interface for Gravwell

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::{ConfigError, SimulationConfig};
use crate::physics::integrators::{IntegratorKind, VelocitySource};

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    Config(ConfigError),
    /// Invalid integrator name provided
    InvalidIntegrator(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "{err}"),
            CliError::InvalidIntegrator(msg) => write!(f, "Invalid integrator: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(err) => Some(err),
            CliError::InvalidIntegrator(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Gravwell - interactive 2-D N-body gravity with a live field overlay
///
/// Drag with the left mouse button to launch a body. Space pauses, R restarts,
/// F toggles the field overlay and Escape quits.
#[derive(Parser, Debug, Default)]
#[command(version = VERSION, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for spawn colors and the starfield
    #[arg(short = 's', long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Physics time step in seconds (overrides config file)
    #[arg(long, value_name = "SECONDS")]
    pub time_step: Option<f64>,

    /// Distance between field overlay sample points
    #[arg(long, value_name = "PIXELS")]
    pub grid_spacing: Option<f64>,

    /// Integrator type (fixed_acceleration_rk4 or classic_rk4)
    #[arg(short = 'i', long, value_name = "TYPE")]
    pub integrator: Option<String>,

    /// Drive position updates with the pre-step velocity
    #[arg(long)]
    pub initial_velocity_positions: bool,

    /// Start with the field overlay hidden
    #[arg(long)]
    pub no_field: bool,

    /// Start paused
    #[arg(short = 'p', long)]
    pub paused: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Run STEPS fixed ticks without a window and print the final bodies
    #[arg(long, value_name = "STEPS")]
    pub headless: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// List available integrators and exit
    #[arg(long)]
    pub list_integrators: bool,
}

/// Handles the --list-integrators flag by printing available integrators
pub fn handle_list_integrators() {
    println!("Available integrators:");
    for kind in IntegratorKind::ALL {
        let marker = if kind == IntegratorKind::default() {
            " (default)"
        } else {
            ""
        };
        println!("  - {kind}{marker}");
    }
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = match &args.config {
        Some(config_path) => {
            println!("Loading configuration from: {}", config_path.display());
            SimulationConfig::load(Some(config_path))?
        }
        None => SimulationConfig::load_from_user_config(),
    };

    apply_overrides(&mut config, args)?;
    config.validate()?;
    Ok(config)
}

/// Applies command-line overrides to an already loaded configuration
pub fn apply_overrides(config: &mut SimulationConfig, args: &Args) -> Result<(), CliError> {
    if let Some(seed) = args.seed {
        println!("Using random seed: {seed}");
        config.rendering.seed = Some(seed);
    }

    if let Some(time_step) = args.time_step {
        println!("Overriding time step to: {time_step}");
        config.physics.time_step = time_step;
    }

    if let Some(grid_spacing) = args.grid_spacing {
        println!("Overriding grid spacing to: {grid_spacing}");
        config.field.grid_spacing = grid_spacing;
    }

    if let Some(integrator_type) = &args.integrator {
        let kind = integrator_type
            .parse::<IntegratorKind>()
            .map_err(CliError::InvalidIntegrator)?;
        println!("Using integrator: {kind}");
        config.physics.integrator = kind;
    }

    if args.initial_velocity_positions {
        config.physics.position_velocity = VelocitySource::Initial;
    }

    if args.no_field {
        config.field.enabled = false;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "gravwell",
            "--seed",
            "42",
            "--time-step",
            "0.02",
            "-i",
            "rk4",
            "--no-field",
            "--headless",
            "300",
        ])
        .unwrap();

        assert_eq!(args.seed, Some(42));
        assert_eq!(args.time_step, Some(0.02));
        assert_eq!(args.integrator.as_deref(), Some("rk4"));
        assert!(args.no_field);
        assert_eq!(args.headless, Some(300));
        assert!(!args.paused);
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = Args {
            seed: Some(9),
            grid_spacing: Some(30.0),
            integrator: Some("classic_rk4".to_owned()),
            initial_velocity_positions: true,
            no_field: true,
            ..Args::default()
        };
        let mut config = SimulationConfig::default();
        apply_overrides(&mut config, &args).unwrap();

        assert_eq!(config.rendering.seed, Some(9));
        assert_eq!(config.field.grid_spacing, 30.0);
        assert_eq!(config.physics.integrator, IntegratorKind::ClassicRk4);
        assert_eq!(config.physics.position_velocity, VelocitySource::Initial);
        assert!(!config.field.enabled);
    }

    #[test]
    fn test_unknown_integrator_is_rejected() {
        let args = Args {
            integrator: Some("verlet".to_owned()),
            ..Args::default()
        };
        let mut config = SimulationConfig::default();
        let err = apply_overrides(&mut config, &args).unwrap_err();
        assert!(matches!(err, CliError::InvalidIntegrator(_)));
        assert!(err.to_string().contains("classic_rk4"));
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let dir = std::env::temp_dir().join(format!("gravwell-cli-{}", std::process::id()));
        let path = dir.join("config.toml");
        SimulationConfig::default().save(&path).unwrap();

        let args = Args {
            config: Some(path),
            time_step: Some(-1.0),
            ..Args::default()
        };
        let result = load_and_apply_config(&args);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(result, Err(CliError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/gravwell.toml")),
            ..Args::default()
        };
        assert!(matches!(
            load_and_apply_config(&args),
            Err(CliError::Config(ConfigError::Load(_)))
        ));
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
