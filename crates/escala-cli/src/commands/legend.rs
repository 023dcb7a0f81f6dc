use escala_core::error::EscalaError;
use std::path::PathBuf;

use crate::commands::resolve_config;

pub fn run(config_file: Option<PathBuf>) -> Result<(), EscalaError> {
    let config = resolve_config(config_file.as_deref())?;

    let width = config.legend.keys().map(|c| c.len()).max().unwrap_or(3);
    println!("Legend ({}):\n", config.name);
    for (code, description) in &config.legend {
        println!("  {:<width$}  {}", code, description, width = width);
    }
    Ok(())
}
