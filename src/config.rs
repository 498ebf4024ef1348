//! Simulation configuration
//!
//! Settings are layered: built-in defaults, then a TOML file, then
//! `GRAVWELL__SECTION__KEY` environment variables. Command-line overrides are
//! applied on top by [`crate::cli`].

use crate::interaction::SpawnSettings;
use crate::physics::integrators::{IntegratorKind, VelocitySource};
use crate::physics::math::{Scalar, Vector};
use crate::physics::{
    Body, BodyColor, BodyError, FieldLineStyle, FieldSampler, PhysicsParameters,
    SingularityPolicy, Stepper, World,
};
use bevy::prelude::*;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use gravwell_macros::ConfigDefaults;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "GRAVWELL";

/// Separator between the prefix, section and key of an environment override
pub const ENV_SEPARATOR: &str = "__";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    /// A source could not be read or merged
    Load(config::ConfigError),
    /// Values parsed but are unusable
    Invalid(String),
    Serialize(toml::ser::Error),
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Load(err) => write!(f, "failed to load configuration: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
            ConfigError::Serialize(err) => write!(f, "failed to serialize configuration: {err}"),
            ConfigError::Io(err) => write!(f, "failed to write configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(err) => Some(err),
            ConfigError::Invalid(_) => None,
            ConfigError::Serialize(err) => Some(err),
            ConfigError::Io(err) => Some(err),
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

#[derive(Resource, ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub field: FieldConfig,
    pub interaction: InteractionConfig,
    pub rendering: RenderingConfig,
    /// Scenario loaded at startup and on restart
    #[default(default_bodies())]
    pub bodies: Vec<BodyConfig>,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    #[default(1.0 / 60.0)]
    pub time_step: Scalar,
    #[default(2.0)]
    pub softening_constant: Scalar,
    #[default(100_000.0)]
    pub force_scale_constant: Scalar,
    pub integrator: IntegratorKind,
    /// Velocity driving the position stages of the fixed acceleration method
    pub position_velocity: VelocitySource,
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    #[default(true)]
    pub enabled: bool,
    #[default(50.0)]
    pub field_scale_constant: Scalar,
    #[default(15.0)]
    pub grid_spacing: Scalar,
    pub singularity: SingularityPolicy,
    #[default(10.0)]
    pub line_magnitude_scale: Scalar,
    #[default(5.0)]
    pub line_min_length: Scalar,
    /// Longest line before `line_min_length` is added; the grid spacing if unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_max_length: Option<Scalar>,
    #[default([100, 100, 100])]
    pub line_color: [u8; 3],
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    #[default(0.1)]
    pub drag_scale: Scalar,
    #[default(25.0)]
    pub spawn_velocity_multiplier: Scalar,
    #[default(1.0)]
    pub spawn_mass: Scalar,
    #[default(7.0)]
    pub spawn_radius: Scalar,
    #[default(50)]
    pub spawn_color_min: u8,
    #[default(255)]
    pub spawn_color_max: u8,
    #[default([255, 255, 255])]
    pub drag_line_color: [u8; 3],
}

#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    #[default(1200.0)]
    pub window_width: f32,
    #[default(800.0)]
    pub window_height: f32,
    #[default("Gravity simulator")]
    pub title: String,
    /// Fixed ticks per second; each tick advances the world by one time step
    #[default(30.0)]
    pub tick_rate_hz: f64,
    #[default([10, 10, 26])]
    pub background_color: [u8; 3],
    #[default(100)]
    pub star_count: usize,
    /// Seed for spawn colors and the starfield; random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// One body of the startup scenario, in world coordinates with y up
#[derive(ConfigDefaults, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BodyConfig {
    #[default(1.0)]
    pub mass: Scalar,
    #[default(7.0)]
    pub radius: Scalar,
    pub position: [Scalar; 2],
    pub velocity: [Scalar; 2],
    pub stationary: bool,
    #[default([255, 255, 255])]
    pub color: [u8; 3],
}

impl BodyConfig {
    pub fn to_body(&self) -> Result<Body, BodyError> {
        Ok(Body::new(
            self.mass,
            self.radius,
            Vector::from_array(self.position),
            Vector::from_array(self.velocity),
        )?
        .with_stationary(self.stationary)
        .with_color(BodyColor::from(self.color)))
    }
}

/// Sun with a planet and its moon
fn default_bodies() -> Vec<BodyConfig> {
    vec![
        BodyConfig {
            mass: 100.0,
            radius: 35.0,
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            stationary: true,
            color: [153, 102, 0],
        },
        BodyConfig {
            mass: 10.0,
            radius: 15.0,
            position: [-250.0, 0.0],
            velocity: [0.0, 210.0],
            stationary: false,
            color: [100, 100, 200],
        },
        BodyConfig {
            mass: 0.1,
            radius: 5.0,
            position: [-290.0, 0.0],
            velocity: [0.0, 370.0],
            stationary: false,
            color: [100, 100, 200],
        },
    ]
}

impl SimulationConfig {
    /// Layered load; `path`, when given, must exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Self::defaults_builder()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        Self::finish(builder)
    }

    /// Layered load from TOML text instead of a file
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let builder =
            Self::defaults_builder()?.add_source(File::from_str(content, FileFormat::Toml));
        Self::finish(builder)
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder().add_source(Config::try_from(&Self::default())?))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        Self::finish_with_env(builder, ENV_PREFIX)
    }

    /// Environment variables `<PREFIX>__SECTION__KEY` override every earlier layer
    fn finish_with_env(
        builder: ConfigBuilder<DefaultState>,
        prefix: &str,
    ) -> Result<Self, ConfigError> {
        let config: Self = builder
            .add_source(
                Environment::with_prefix(prefix)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("Config file {} not found. Using defaults.", path.display());
            return Self::default();
        }
        match Self::load(Some(path)) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e} ({}). Using defaults.", path.display());
                Self::default()
            }
        }
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gravwell").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Per-user configuration, or defaults when there is none
    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to a file, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("physics.time_step", self.physics.time_step),
            ("physics.force_scale_constant", self.physics.force_scale_constant),
            ("field.field_scale_constant", self.field.field_scale_constant),
            ("field.grid_spacing", self.field.grid_spacing),
            ("interaction.spawn_mass", self.interaction.spawn_mass),
            ("rendering.tick_rate_hz", self.rendering.tick_rate_hz),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        if !(self.physics.softening_constant.is_finite() && self.physics.softening_constant >= 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "physics.softening_constant must be non-negative, got {}",
                self.physics.softening_constant
            )));
        }
        if let SingularityPolicy::ClampDistance { min_distance } = self.field.singularity {
            if !(min_distance.is_finite() && min_distance > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "field.singularity.min_distance must be positive, got {min_distance}"
                )));
            }
        }
        if self.interaction.spawn_color_min > self.interaction.spawn_color_max {
            return Err(ConfigError::Invalid(format!(
                "interaction.spawn_color_min ({}) exceeds spawn_color_max ({})",
                self.interaction.spawn_color_min, self.interaction.spawn_color_max
            )));
        }
        if !(self.rendering.window_width > 0.0 && self.rendering.window_height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.rendering.window_width, self.rendering.window_height
            )));
        }

        self.interaction
            .spawn_settings()
            .check()
            .map_err(|e| ConfigError::Invalid(format!("interaction: {e}")))?;
        for (index, body) in self.bodies.iter().enumerate() {
            body.to_body()
                .map_err(|e| ConfigError::Invalid(format!("bodies[{index}]: {e}")))?;
        }
        Ok(())
    }

    pub fn parameters(&self) -> PhysicsParameters {
        PhysicsParameters {
            time_step: self.physics.time_step,
            softening_constant: self.physics.softening_constant,
            force_scale_constant: self.physics.force_scale_constant,
            field_scale_constant: self.field.field_scale_constant,
            grid_spacing: self.field.grid_spacing,
        }
    }

    pub fn stepper(&self) -> Stepper {
        Stepper::with_integrator(
            &self.parameters(),
            self.physics.integrator,
            self.physics.position_velocity,
        )
    }

    pub fn field_sampler(&self) -> FieldSampler {
        FieldSampler::from_parameters(&self.parameters(), self.field.singularity)
    }

    pub fn field_line_style(&self) -> FieldLineStyle {
        FieldLineStyle {
            magnitude_scale: self.field.line_magnitude_scale,
            min_length: self.field.line_min_length,
            max_length: self.field.line_max_length,
        }
    }

    /// The startup scenario
    pub fn build_world(&self) -> Result<World, BodyError> {
        let bodies = self
            .bodies
            .iter()
            .map(BodyConfig::to_body)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(World::from_bodies(bodies))
    }
}

impl InteractionConfig {
    pub fn spawn_settings(&self) -> SpawnSettings {
        SpawnSettings {
            drag_scale: self.drag_scale,
            velocity_multiplier: self.spawn_velocity_multiplier,
            mass: self.spawn_mass,
            radius: self.spawn_radius,
            color_range: self.spawn_color_min..=self.spawn_color_max,
        }
    }
}
