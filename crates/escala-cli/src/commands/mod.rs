pub mod config;
pub mod legend;
pub mod parse;

use escala_core::config::builtin::default_config;
use escala_core::config::load_config;
use escala_core::config::schema::RosterConfig;
use escala_core::error::EscalaError;
use std::path::Path;

/// The configuration named on the command line, or the built-in one.
pub fn resolve_config(path: Option<&Path>) -> Result<RosterConfig, EscalaError> {
    match path {
        Some(path) => load_config(path),
        None => default_config(),
    }
}
