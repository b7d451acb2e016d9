use colored::Colorize;
use thiserror::Error;

/// Errors that can occur while resolving a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source file exists but could not be read
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// No environment variable, file entry or default for a field
    #[error("missing env var {key} (no default provided)")]
    MissingEnvVar { key: String },

    /// A keyless field was looked up directly instead of being skipped
    #[error("field has no lookup key")]
    NoLookupKey,

    /// The resolved raw string does not fit the field's declared type
    #[error("invalid value for {key}: cannot parse {value} as {type_name}")]
    InvalidValue {
        key: String,
        value: String,
        type_name: &'static str,
    },
}

impl ConfigError {
    /// Lookup key of the field that failed, if the error concerns a field
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::Io(_) | ConfigError::NoLookupKey => None,
            ConfigError::MissingEnvVar { key } | ConfigError::InvalidValue { key, .. } => {
                Some(key.as_str())
            }
        }
    }
}

/// Render an error as a colored, multi-line startup report
pub fn format_config_error(error: &ConfigError) -> String {
    let detail = match error {
        ConfigError::Io(err) => format!("Could not read configuration file: {}", err),
        ConfigError::NoLookupKey => "A field without a lookup key was resolved".to_string(),
        ConfigError::MissingEnvVar { key } => format!(
            "{}: Is missing from environment and file, and has no default",
            key.magenta().bold()
        ),
        ConfigError::InvalidValue {
            key,
            value,
            type_name,
        } => format!(
            "{}: Invalid value {}, expected {}",
            key.magenta().bold(),
            format!("'{}'", value).red(),
            type_name.cyan()
        ),
    };

    format!("{}\n  - {}", "Configuration failed:".yellow().bold(), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_env_var_message() {
        let error = ConfigError::MissingEnvVar {
            key: "PORT".to_string(),
        };

        assert_eq!(error.to_string(), "missing env var PORT (no default provided)");
        assert_eq!(error.key(), Some("PORT"));
    }

    #[test]
    fn test_invalid_value_message() {
        let error = ConfigError::InvalidValue {
            key: "PORT".to_string(),
            value: "hello".to_string(),
            type_name: "int",
        };

        let output = error.to_string();
        assert!(output.contains("cannot parse hello as int"));
        assert!(output.contains("PORT"));
        assert_eq!(error.key(), Some("PORT"));
    }

    #[test]
    fn test_io_error_is_transparent() {
        let error = ConfigError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));

        assert_eq!(error.to_string(), "denied");
        assert_eq!(error.key(), None);
    }

    #[test]
    fn test_no_lookup_key_message() {
        let error = ConfigError::NoLookupKey;

        assert_eq!(error.to_string(), "field has no lookup key");
        assert_eq!(error.key(), None);
    }

    #[test]
    fn test_report_missing() {
        colored::control::set_override(false);

        let error = ConfigError::MissingEnvVar {
            key: "DATABASE_URL".to_string(),
        };

        let output = format_config_error(&error);
        assert!(output.starts_with("Configuration failed:"));
        assert!(output.contains("DATABASE_URL: Is missing"));
    }

    #[test]
    fn test_report_invalid() {
        colored::control::set_override(false);

        let error = ConfigError::InvalidValue {
            key: "DEBUG".to_string(),
            value: "maybe".to_string(),
            type_name: "bool",
        };

        let output = format_config_error(&error);
        assert!(output.contains("DEBUG: Invalid value 'maybe', expected bool"));
    }

    #[test]
    fn test_debug_format() {
        let error = ConfigError::InvalidValue {
            key: "TIMEOUT".to_string(),
            value: "soon".to_string(),
            type_name: "Duration",
        };

        let debug_output = format!("{:?}", error);
        assert!(debug_output.contains("InvalidValue"));
        assert!(debug_output.contains("TIMEOUT"));
    }
}
