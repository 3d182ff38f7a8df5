pub mod cli;
pub mod toml_config;

pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::expression::ExpressionLimits;
use crate::core::Calculators;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Runtime settings after merging CLI flags, the optional TOML file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub expression_limits: ExpressionLimits,
    pub full_emi_schedule: bool,
    pub log_level: Option<String>,
    pub log_json: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            expression_limits: ExpressionLimits::default(),
            full_emi_schedule: false,
            log_level: None,
            log_json: false,
            verbose: false,
        }
    }
}

impl Settings {
    /// Reads the TOML file named by `--config` (if any) and merges it with the flags.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        let settings = Self::merge(file, cli);
        settings.validate()?;
        Ok(settings)
    }

    /// Flags win over the file, the file wins over defaults.
    pub fn merge(file: Option<TomlConfig>, cli: &CliConfig) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            host: cli
                .host
                .clone()
                .or(file.server.host)
                .unwrap_or(defaults.host),
            port: cli.port.or(file.server.port).unwrap_or(defaults.port),
            static_dir: cli
                .static_dir
                .clone()
                .or(file.server.static_dir)
                .unwrap_or(defaults.static_dir),
            expression_limits: ExpressionLimits {
                max_length: file
                    .limits
                    .max_expression_length
                    .unwrap_or(defaults.expression_limits.max_length),
                max_depth: file
                    .limits
                    .max_expression_depth
                    .unwrap_or(defaults.expression_limits.max_depth),
            },
            full_emi_schedule: file.emi.full_schedule.unwrap_or(false),
            log_level: file.logging.level,
            log_json: cli.log_json || file.logging.json.unwrap_or(false),
            verbose: cli.verbose,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn calculators(&self) -> Calculators {
        Calculators::new(self.expression_limits, self.full_emi_schedule)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        let as_config_error = |e: CalcError| CalcError::ConfigError {
            message: e.to_string(),
        };

        validate_non_empty_string("server.host", &self.host).map_err(as_config_error)?;
        validate_range("server.port", self.port, 1, u16::MAX).map_err(as_config_error)?;
        validate_non_empty_string("server.static_dir", &self.static_dir.to_string_lossy())
            .map_err(as_config_error)?;
        validate_range(
            "limits.max_expression_length",
            self.expression_limits.max_length,
            1,
            100_000,
        )
        .map_err(as_config_error)?;
        validate_range(
            "limits.max_expression_depth",
            self.expression_limits.max_depth,
            1,
            1_000,
        )
        .map_err(as_config_error)?;
        Ok(())
    }
}
