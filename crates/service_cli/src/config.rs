//! Engine configuration management
//!
//! Handles loading configuration from a TOML file, `PRICER_*` environment
//! variables and CLI flags.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. Config file
//! 4. Default values

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_risk::payoff::{MAX_LADDER_STEPS, MIN_LADDER_STEPS};
use pricer_risk::scenarios::{MAX_AXIS_LEN, MAX_GRID_CELLS};
use pricer_risk::ParallelConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "pricer.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// A setting outside its allowed range.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// Description of the problem
        message: String,
    },

    /// Config file could not be read.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Config file is not valid TOML for [`EngineConfig`].
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key,
            message: message.into(),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-leg engine chatter
    Trace,
    /// Grid timings and skipped legs
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Failed legs
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Engine configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Default spot shifts (percent) for `pricer grid`
    pub spot_shifts_pct: Vec<f64>,
    /// Default absolute vol shifts for `pricer grid`
    pub vol_shifts: Vec<f64>,
    /// Default rate shift in basis points for `pricer grid`
    pub rate_shift_bps: f64,
    /// Default spot ladder size for `pricer payoff`
    pub payoff_steps: usize,
    /// Minimum grid cells before rows are priced in parallel
    pub parallel_threshold: usize,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            spot_shifts_pct: vec![-20.0, -10.0, -5.0, 0.0, 5.0, 10.0, 20.0],
            vol_shifts: vec![-0.05, 0.0, 0.05],
            rate_shift_bps: 0.0,
            payoff_steps: 121,
            parallel_threshold: ParallelConfig::default().parallel_threshold,
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PRICER_*` overrides read through `lookup`.
    ///
    /// Lists are comma-separated.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(list) = lookup("PRICER_SPOT_SHIFTS_PCT") {
            self.spot_shifts_pct = parse_list("spot_shifts_pct", &list)?;
        }
        if let Some(list) = lookup("PRICER_VOL_SHIFTS") {
            self.vol_shifts = parse_list("vol_shifts", &list)?;
        }
        if let Some(bps) = lookup("PRICER_RATE_SHIFT_BPS") {
            self.rate_shift_bps = parse_value("rate_shift_bps", &bps)?;
        }
        if let Some(steps) = lookup("PRICER_PAYOFF_STEPS") {
            self.payoff_steps = parse_value("payoff_steps", &steps)?;
        }
        if let Some(threshold) = lookup("PRICER_PARALLEL_THRESHOLD") {
            self.parallel_threshold = parse_value("parallel_threshold", &threshold)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(threshold) = cli.parallel_threshold {
            self.parallel_threshold = threshold;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, axis) in [("spot_shifts_pct", &self.spot_shifts_pct), ("vol_shifts", &self.vol_shifts)] {
            if axis.is_empty() || axis.len() > MAX_AXIS_LEN {
                return Err(ConfigError::invalid(
                    key,
                    format!("must have 1..={} entries (got {})", MAX_AXIS_LEN, axis.len()),
                ));
            }
            if axis.iter().any(|x| !x.is_finite()) {
                return Err(ConfigError::invalid(key, "entries must be finite"));
            }
        }
        let cells = self.spot_shifts_pct.len() * self.vol_shifts.len();
        if cells > MAX_GRID_CELLS {
            return Err(ConfigError::invalid(
                "spot_shifts_pct",
                format!("grid of {} cells exceeds {}", cells, MAX_GRID_CELLS),
            ));
        }
        if self.spot_shifts_pct.iter().any(|&pct| pct <= -100.0) {
            return Err(ConfigError::invalid("spot_shifts_pct", "shifts must be > -100"));
        }
        if !self.rate_shift_bps.is_finite() {
            return Err(ConfigError::invalid("rate_shift_bps", "must be finite"));
        }
        if !(MIN_LADDER_STEPS..=MAX_LADDER_STEPS).contains(&self.payoff_steps) {
            return Err(ConfigError::invalid(
                "payoff_steps",
                format!(
                    "must be in [{}, {}] (got {})",
                    MIN_LADDER_STEPS, MAX_LADDER_STEPS, self.payoff_steps
                ),
            ));
        }
        Ok(())
    }

    /// Parallel settings for scenario grids.
    pub fn parallel(&self) -> ParallelConfig {
        ParallelConfig::new(self.parallel_threshold)
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("cannot parse '{}'", raw)))
}

fn parse_list(key: &'static str, raw: &str) -> Result<Vec<f64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_value(key, s))
        .collect()
}

/// CLI flags that override configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file; a missing explicit file is an error
    pub config_file: Option<PathBuf>,
    /// Log level override (`--verbose` maps to debug)
    pub log_level: Option<LogLevel>,
    /// Parallel threshold override
    pub parallel_threshold: Option<usize>,
}

/// Build configuration from all sources
///
/// Without `--config`, [`DEFAULT_CONFIG_FILE`] is read if it exists in the
/// working directory.
pub fn build_config(cli: &CliOverrides) -> Result<EngineConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an injectable environment.
pub fn build_config_with_env<F>(cli: &CliOverrides, lookup: F) -> Result<EngineConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => EngineConfig::from_file(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                EngineConfig::from_file(fallback)?
            } else {
                EngineConfig::default()
            }
        }
    };

    config.apply_env_from(lookup)?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.spot_shifts_pct.len(), 7);
        assert_eq!(config.vol_shifts, vec![-0.05, 0.0, 0.05]);
        assert_eq!(config.rate_shift_bps, 0.0);
        assert_eq!(config.payoff_steps, 121);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str(" Info ").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Trace), "trace");
        assert_eq!(format!("{}", LogLevel::Warn), "warn");
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            log_level = "debug"
            spot_shifts_pct = [-10.0, 0.0, 10.0]
            vol_shifts = [0.0]
            rate_shift_bps = 25.0
            payoff_steps = 201
            parallel_threshold = 8
        "#;

        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.spot_shifts_pct, vec![-10.0, 0.0, 10.0]);
        assert_eq!(config.vol_shifts, vec![0.0]);
        assert_eq!(config.rate_shift_bps, 25.0);
        assert_eq!(config.payoff_steps, 201);
        assert_eq!(config.parallel().parallel_threshold, 8);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: EngineConfig = toml::from_str("payoff_steps = 41").unwrap();
        // Should use defaults for unspecified fields
        assert_eq!(config.payoff_steps, 41);
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.vol_shifts, EngineConfig::default().vol_shifts);
    }

    #[test]
    fn test_invalid_log_level_rejected_in_toml() {
        let err = toml::from_str::<EngineConfig>(r#"log_level = "loud""#).unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<EngineConfig>("port = 8080").is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = EngineConfig::default();
        config
            .apply_env_from(env(&[
                ("PRICER_LOG_LEVEL", "warn"),
                ("PRICER_SPOT_SHIFTS_PCT", "-5, 0, 5"),
                ("PRICER_RATE_SHIFT_BPS", "-50"),
                ("PRICER_PAYOFF_STEPS", "61"),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.spot_shifts_pct, vec![-5.0, 0.0, 5.0]);
        assert_eq!(config.rate_shift_bps, -50.0);
        assert_eq!(config.payoff_steps, 61);
        assert_eq!(config.vol_shifts, EngineConfig::default().vol_shifts);
    }

    #[test]
    fn test_env_rejects_bad_values() {
        let mut config = EngineConfig::default();
        assert!(matches!(
            config.apply_env_from(env(&[("PRICER_LOG_LEVEL", "chatty")])),
            Err(ConfigError::InvalidLogLevel(_))
        ));
        assert!(matches!(
            config.apply_env_from(env(&[("PRICER_PAYOFF_STEPS", "many")])),
            Err(ConfigError::InvalidValue { key: "payoff_steps", .. })
        ));
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = EngineConfig::default();
        config.payoff_steps = 2;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.spot_shifts_pct = vec![-100.0];
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.spot_shifts_pct = (0..16).map(|i| i as f64).collect();
        config.vol_shifts = (0..15).map(|i| i as f64 * 0.01).collect();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_takes_precedence_over_env() {
        let cli = CliOverrides {
            log_level: Some(LogLevel::Debug),
            parallel_threshold: Some(1),
            ..CliOverrides::default()
        };
        let config = build_config_with_env(&cli, env(&[("PRICER_LOG_LEVEL", "error")])).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.parallel_threshold, 1);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let cli = CliOverrides {
            config_file: Some(PathBuf::from("/nonexistent/pricer.toml")),
            ..CliOverrides::default()
        };
        assert!(matches!(
            build_config_with_env(&cli, env(&[])),
            Err(ConfigError::FileError(_))
        ));
    }
}
