//! Lint configuration loading.
//!
//! Settings live in a `.tscat.json` file. An explicit path (`--config` or
//! `TSCAT_CONFIG`) must exist; otherwise the file is looked up next to the
//! first input and then in the working directory, and defaults apply when
//! neither has one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tscat::LintConfig;

pub const CONFIG_FILE_NAME: &str = ".tscat.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Resolve and load the lint configuration for a run over `inputs`.
pub fn load_config(explicit: Option<&Path>, inputs: &[PathBuf]) -> Result<LintConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let candidates = inputs
        .first()
        .and_then(|input| input.parent())
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .into_iter()
        .chain([PathBuf::from(CONFIG_FILE_NAME)]);

    for candidate in candidates {
        if candidate.is_file() {
            return read_config(&candidate);
        }
        tracing::debug!("Configuration file not found: {}", candidate.display());
    }
    Ok(LintConfig::default())
}

fn read_config(path: &Path) -> Result<LintConfig, ConfigError> {
    tracing::debug!("Loading configuration from: {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use tscat::LintRule;

    use super::*;

    #[test]
    fn config_next_to_first_input() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"disabled": ["empty-translation"]}"#,
        )
        .unwrap();

        let config = load_config(None, &[dir.path().join("app_ru.ts")]).unwrap();
        assert_eq!(config.disabled, vec![LintRule::EmptyTranslation]);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            load_config(Some(&missing), &[]),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lint.json");
        fs::write(&path, r#"{"disabled": ["no-such-rule"]}"#).unwrap();
        assert!(matches!(
            load_config(Some(&path), &[]),
            Err(ConfigError::Json { .. })
        ));
    }
}
