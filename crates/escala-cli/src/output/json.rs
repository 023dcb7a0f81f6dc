use escala_core::error::EscalaError;
use escala_core::model::ParseOutcome;
use serde_json::Value;

/// The schedule as pretty JSON, optionally with a `diagnostics` member.
pub fn render(outcome: &ParseOutcome, diagnostics: bool) -> Result<String, EscalaError> {
    let mut value = serde_json::to_value(&outcome.schedule)?;
    if diagnostics {
        if let Value::Object(map) = &mut value {
            map.insert(
                "diagnostics".to_string(),
                serde_json::to_value(&outcome.diagnostics)?,
            );
        }
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
