//! Configuration module for brave-research
//!
//! Handles loading and validating settings from YAML files and environment variables.
//! Nothing outside this module and the binary reads the process environment.

mod settings;

pub use settings::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Candidate settings file locations, in lookup order
pub fn settings_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(path) = std::env::var("RESEARCH_SETTINGS_PATH") {
        paths.push(PathBuf::from(path));
    }

    paths.push(PathBuf::from("settings.yml"));
    paths.push(PathBuf::from("config/settings.yml"));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("brave-research/settings.yml"));
    }

    paths
}

/// First settings file that exists
pub fn locate() -> Option<PathBuf> {
    settings_paths().into_iter().find(|p| p.exists())
}

/// Load settings from `path`, or defaults, then apply the environment
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let mut settings = match path {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?,
        None => Settings::default(),
    };

    settings.merge_env();
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_fails() {
        let err = load(Some(Path::new("/nonexistent/brave-research/settings.yml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read settings"));
    }

    #[test]
    fn test_default_paths_include_local_file() {
        let paths = settings_paths();
        assert!(paths.contains(&PathBuf::from("settings.yml")));
    }
}
