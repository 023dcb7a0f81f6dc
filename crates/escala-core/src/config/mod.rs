pub mod builtin;
pub mod schema;

use crate::error::EscalaError;
use crate::parsing::text::sector_key;
use crate::parsing::tokens::is_valid_code;
use schema::RosterConfig;
use std::path::Path;

/// Load a roster configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<RosterConfig, EscalaError> {
    let content = std::fs::read_to_string(path).map_err(|e| EscalaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a roster configuration from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<RosterConfig, EscalaError> {
    let config: RosterConfig = serde_json::from_str(json).map_err(|e| EscalaError::ConfigLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a roster configuration from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<RosterConfig, EscalaError> {
    let config: RosterConfig = serde_json::from_str(json).map_err(EscalaError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a configuration is well-formed.
pub fn validate_config(config: &RosterConfig) -> Result<(), EscalaError> {
    if config.sectors.is_empty() {
        return Err(EscalaError::ConfigInvalid(
            "sectors must not be empty".into(),
        ));
    }

    // Keys are compared the way the sector matcher compares them.
    let mut keys: Vec<(String, &str)> = Vec::new();
    for sector in &config.sectors {
        let key = sector_key(sector);
        if key.is_empty() {
            return Err(EscalaError::ConfigInvalid(
                "sector name must not be empty".into(),
            ));
        }
        let shadowing = keys.iter().find(|(k, _)| key.contains(k.as_str()));
        if let Some((earlier_key, earlier)) = shadowing {
            let reason = if *earlier_key == key {
                format!("duplicate sector '{}'", sector)
            } else {
                format!(
                    "sector '{}' can never be matched: its name contains earlier sector '{}'",
                    sector, earlier
                )
            };
            return Err(EscalaError::ConfigInvalid(reason));
        }
        keys.push((key, sector.as_str()));
    }

    if config.legend.is_empty() {
        return Err(EscalaError::ConfigInvalid("legend must not be empty".into()));
    }

    for code in config.legend.keys() {
        if !is_valid_code(code) {
            return Err(EscalaError::ConfigInvalid(format!(
                "legend code '{}' must be 1-4 uppercase letters or asterisks",
                code
            )));
        }
    }

    if config.header_markers.iter().any(|m| m.trim().is_empty()) {
        return Err(EscalaError::ConfigInvalid(
            "header markers must not be blank".into(),
        ));
    }

    if !(2000..=2099).contains(&config.default_year) {
        return Err(EscalaError::ConfigInvalid(format!(
            "default_year {} is outside 2000-2099",
            config.default_year
        )));
    }

    Ok(())
}
