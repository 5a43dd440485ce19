//! Calculation store configuration.
//!
//! # Responsibility
//! - Resolve the backing-store location from explicit input, environment and
//!   a fixed default.
//!
//! # Invariants
//! - Precedence: explicit path > `DB_PATH` environment variable > default.
//! - Blank values are treated as unset.

use std::path::{Path, PathBuf};

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "DB_PATH";

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "geometry_calculations.db";

/// Location settings consumed by the calculation store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    db_path: PathBuf,
}

impl StoreConfig {
    /// Creates a config pointing at an explicit database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Resolves the location using the process environment.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        Self::resolve_with(explicit, |key| std::env::var(key).ok())
    }

    /// Resolves the location using `lookup` for environment values.
    pub fn resolve_with<F>(explicit: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit.filter(|path| !path.as_os_str().is_empty()) {
            return Self::new(path);
        }

        match lookup(DB_PATH_ENV) {
            Some(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Self::new(DEFAULT_DB_PATH),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DB_PATH_ENV, DEFAULT_DB_PATH};
    use std::path::{Path, PathBuf};

    fn env_with(value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| (key == DB_PATH_ENV).then(|| value.to_string())
    }

    #[test]
    fn explicit_path_wins() {
        let config =
            StoreConfig::resolve_with(Some(PathBuf::from("explicit.db")), env_with("env.db"));
        assert_eq!(config.db_path(), Path::new("explicit.db"));
    }

    #[test]
    fn environment_overrides_default() {
        let config = StoreConfig::resolve_with(None, env_with(" /data/geometry.db "));
        assert_eq!(config.db_path(), Path::new("/data/geometry.db"));
    }

    #[test]
    fn falls_back_to_default() {
        let config = StoreConfig::resolve_with(None, |_| None);
        assert_eq!(config.db_path(), Path::new(DEFAULT_DB_PATH));

        let blank = StoreConfig::resolve_with(Some(PathBuf::new()), env_with("   "));
        assert_eq!(blank, StoreConfig::default());
    }
}
