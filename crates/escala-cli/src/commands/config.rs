use escala_core::config::builtin::default_config;
use escala_core::config::load_config;
use escala_core::error::EscalaError;
use std::path::Path;

pub fn show() -> Result<(), EscalaError> {
    let config = default_config()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), EscalaError> {
    let config = load_config(file)?;

    println!("Config '{}' (v{}) is valid.", config.name, config.version);
    println!("  Sectors: {}", config.sectors.join(" | "));
    println!("  Legend: {} codes", config.legend.len());
    println!("  Default year: {}", config.default_year);

    // Allowed, but usually a mistake.
    let mut warnings = Vec::new();
    if config.header_markers.is_empty() {
        warnings.push(
            "no header markers: column-header lines are only skipped when they fail \
             employee recognition"
                .to_string(),
        );
    }
    if config.sectors.len() == 1 {
        warnings.push(format!(
            "single sector '{}': every employee lands in it",
            config.sectors[0]
        ));
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
