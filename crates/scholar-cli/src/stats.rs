//! Persisted "papers analyzed" counter.

use crate::config::Config;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Usage statistics stored next to the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Successful analyses shown to the user
    #[serde(default)]
    pub papers_analyzed: u64,
}

impl Stats {
    /// Default stats file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Config::dir()?.join("stats.toml"))
    }

    /// Load from `path`; a missing file counts as zero.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize stats: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Count one more analysis and persist it. Returns the new total.
    pub fn record_analysis(path: &Path) -> Result<u64> {
        let mut stats = Self::load_from(path)?;
        stats.papers_analyzed += 1;
        stats.save_to(path)?;
        Ok(stats.papers_analyzed)
    }

    /// Reset the counter to zero and persist it.
    pub fn reset(path: &Path) -> Result<()> {
        Self::default().save_to(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        let stats = Stats::load_from(&dir.path().join("stats.toml")).unwrap();
        assert_eq!(stats.papers_analyzed, 0);
    }

    #[test]
    fn test_counter_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".scholar").join("stats.toml");

        assert_eq!(Stats::record_analysis(&path).unwrap(), 1);
        assert_eq!(Stats::record_analysis(&path).unwrap(), 2);
        assert_eq!(Stats::load_from(&path).unwrap().papers_analyzed, 2);

        Stats::reset(&path).unwrap();
        assert_eq!(Stats::load_from(&path).unwrap().papers_analyzed, 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.toml");
        fs::write(&path, "papers_analyzed = \"many\"").unwrap();
        assert!(matches!(Stats::load_from(&path), Err(CliError::Toml(_))));
    }
}
