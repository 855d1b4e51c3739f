//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SentraConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::SentraError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`SentraConfig`]
/// 4. Applies `SENTRA_*` environment overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML is malformed, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<SentraConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SentraError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SentraError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SentraConfig = toml::from_str(&contents)
        .map_err(|e| SentraError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SentraError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched. Referencing an unset variable is an
/// error rather than a silent empty string.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SentraError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `SENTRA_*` prefix
///
/// Variables follow the pattern `SENTRA_<SECTION>_<KEY>`, e.g.
/// `SENTRA_IDENTIFIER_ENDPOINT` or `SENTRA_SCAN_STRICT_MODE`.
fn apply_env_overrides(config: &mut SentraConfig) {
    if let Ok(val) = std::env::var("SENTRA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("SENTRA_IDENTIFIER_ENDPOINT") {
        config.identifier.endpoint = val;
    }
    if let Ok(val) = std::env::var("SENTRA_IDENTIFIER_API_KEY") {
        config.identifier.api_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("SENTRA_IDENTIFIER_MODEL") {
        config.identifier.model = Some(val);
    }
    if let Ok(val) = std::env::var("SENTRA_IDENTIFIER_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.identifier.timeout_seconds = seconds;
        }
    }

    if let Ok(val) = std::env::var("SENTRA_SCAN_CHUNK_SIZE") {
        if let Ok(size) = val.parse() {
            config.scan.chunk_size = size;
        }
    }
    if let Ok(val) = std::env::var("SENTRA_SCAN_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.scan.concurrency = concurrency;
        }
    }
    if let Ok(val) = std::env::var("SENTRA_SCAN_MINIMUM_CONFIDENCE") {
        if let Ok(confidence) = val.parse() {
            config.scan.minimum_confidence = confidence;
        }
    }
    if let Ok(val) = std::env::var("SENTRA_SCAN_STRICT_MODE") {
        config.scan.strict_mode = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("SENTRA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SENTRA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("SENTRA_TEST_VAR", "test_value");
        let input = "api_key = \"${SENTRA_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"\n");
        std::env::remove_var("SENTRA_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("SENTRA_MISSING_VAR");
        let input = "api_key = \"${SENTRA_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_comments_not_substituted() {
        let input = "# uses ${SOME_UNSET_VAR}\nvalue = 1";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${SOME_UNSET_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[identifier]
endpoint = "https://identify.example.com/v1/identify"
timeout_seconds = 30

[scan]
chunk_size = 1500
strict_mode = true

[[policy]]
id = "pol-gdpr"
name = "GDPR personal data"
description = "Personal data of EU residents"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.scan.chunk_size, 1500);
        assert!(config.scan.strict_mode);
        assert_eq!(config.policies[0].id, "pol-gdpr");
    }

    #[test]
    fn test_load_config_rejects_missing_policies() {
        let toml_content = r#"
[identifier]
endpoint = "https://identify.example.com/v1/identify"
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("policy"));
    }
}
