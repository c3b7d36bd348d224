use crate::config::types::{Config, IndexConfig, OutputConfig, PagesConfig};
use crate::ConfigError;

/// Upper bound on the number of hash buckets
const MAX_TABLE_SIZE: usize = 10_000_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_index_config(&config.index)?;
    validate_pages_config(&config.pages)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates index configuration
fn validate_index_config(config: &IndexConfig) -> Result<(), ConfigError> {
    if config.table_size < 1 || config.table_size > MAX_TABLE_SIZE {
        return Err(ConfigError::Validation(format!(
            "table_size must be between 1 and {}, got {}",
            MAX_TABLE_SIZE, config.table_size
        )));
    }

    if config.max_word_length < 1 {
        return Err(ConfigError::Validation(format!(
            "max_word_length must be >= 1, got {}",
            config.max_word_length
        )));
    }

    Ok(())
}

/// Validates crawler output configuration
fn validate_pages_config(config: &PagesConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "pages directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.index_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "index_path cannot be empty".to_string(),
        ));
    }

    if config.reload_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "reload_path cannot be empty".to_string(),
        ));
    }

    if config.index_path == config.reload_path {
        return Err(ConfigError::Validation(format!(
            "reload_path must differ from index_path, both are '{}'",
            config.index_path
        )));
    }

    Ok(())
}
