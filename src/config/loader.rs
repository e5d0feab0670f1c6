//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::HarnessConfig;
use crate::config::validation::validate_config;
use crate::error::ConfigError;

/// Overrides from the command line, applied before validation.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Probe an already running server.
    pub no_launch: bool,
    /// Exit non-zero unless every case passes.
    pub strict: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut HarnessConfig) {
        if self.no_launch {
            config.server.launch = false;
        }
        if self.strict {
            config.strict_exit = true;
        }
    }
}

/// Load configuration from a TOML file, apply overrides, then validate.
pub fn load_config(path: &Path, overrides: &Overrides) -> Result<HarnessConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, overrides)
}

/// Parse configuration from a TOML string, apply overrides, then validate.
pub fn parse_config(content: &str, overrides: &Overrides) -> Result<HarnessConfig, ConfigError> {
    let config: HarnessConfig = toml::from_str(content)?;
    finalize(config, overrides)
}

/// Apply overrides to an already parsed config and validate the result.
pub fn finalize(mut config: HarnessConfig, overrides: &Overrides) -> Result<HarnessConfig, ConfigError> {
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/hostcheck.toml"), &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/hostcheck.toml"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[server]\nport = \"five thousand\"", &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error() {
        let err = parse_config("[server]\nport = 0", &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e.len() == 1));
    }

    #[test]
    fn test_valid_config() {
        let config = parse_config("[request]\ntimeout_secs = 2", &Overrides::default()).unwrap();
        assert_eq!(config.request.timeout_secs, 2);
    }

    #[test]
    fn test_no_launch_applied_before_validation() {
        let content = "[server]\nprogram = \"\"";

        let err = parse_config(content, &Overrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let overrides = Overrides {
            no_launch: true,
            ..Overrides::default()
        };
        let config = parse_config(content, &overrides).unwrap();
        assert!(!config.server.launch);
    }

    #[test]
    fn test_strict_override() {
        let overrides = Overrides {
            strict: true,
            ..Overrides::default()
        };
        let config = finalize(HarnessConfig::default(), &overrides).unwrap();
        assert!(config.strict_exit);
    }
}
