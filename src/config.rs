//! Startup settings for the heading browser.
//!
//! An optional `coursetree.toml` in the working directory sets how deep the outline opens, whether
//! documents are listed under their headings, and where the theme preference is stored. Missing
//! keys keep their defaults.

use facet::Facet;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "coursetree.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User settings loaded from coursetree.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 2)]
    /// Headings shallower than this start expanded.
    pub expand_depth: usize,
    #[facet(default = true)]
    /// List documents beneath expanded headings.
    pub show_documents: bool,
    #[facet(default = ".coursetree.json".to_string())]
    /// Where display preferences are persisted.
    pub preferences_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            expand_depth: 2,
            show_documents: true,
            preferences_file: ".coursetree.json".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from coursetree.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from a specific file, using defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match facet_toml::from_str::<Self>(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
