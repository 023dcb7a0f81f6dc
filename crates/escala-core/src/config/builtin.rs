use crate::config::schema::RosterConfig;
use crate::error::EscalaError;

const HOSPITAL_DEFAULT_JSON: &str = include_str!("../../../../config/hospital-default.json");

/// Available predefined roster configurations.
pub const PRESETS: &[&str] = &["hospital"];

/// Load a predefined configuration by name.
pub fn load_preset(name: &str) -> Result<RosterConfig, EscalaError> {
    match name {
        "hospital" => {
            let config: RosterConfig = serde_json::from_str(HOSPITAL_DEFAULT_JSON)?;
            Ok(config)
        }
        _ => Err(EscalaError::ConfigInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The configuration used when the caller supplies none.
pub fn default_config() -> Result<RosterConfig, EscalaError> {
    load_preset("hospital")
}
