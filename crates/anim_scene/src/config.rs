//! Scene configuration.

use std::path::PathBuf;

/// Directory holding statement files, relative to the working directory.
pub const DEFAULT_STATEMENT_DIR: &str = "statements";

/// The environment variable used to override the statement directory.
pub const STATEMENT_DIR_ENV: &str = "MATHANIM_STATEMENT_DIR";

/// Default statement language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// The environment variable used to override the statement language.
pub const LANGUAGE_ENV: &str = "MATHANIM_LANG";

/// Settings shared by every scene of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Where [`read_statement`](crate::read_statement) looks for files.
    pub statements_dir: PathBuf,
    /// Language tag of the statement blocks to read.
    pub language: String,
    /// Run time of a `play` step that does not set one, in seconds.
    pub default_run_time: f64,
    /// Length of a bare `wait`, in seconds.
    pub default_wait: f64,
}

impl SceneConfig {
    /// Defaults: `./statements`, English, one-second plays and waits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            statements_dir: PathBuf::from(DEFAULT_STATEMENT_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
            default_run_time: 1.0,
            default_wait: 1.0,
        }
    }

    /// Defaults, overridden by [`STATEMENT_DIR_ENV`] and [`LANGUAGE_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(dir) = std::env::var(STATEMENT_DIR_ENV) {
            config.statements_dir = PathBuf::from(dir);
        }
        if let Ok(lang) = std::env::var(LANGUAGE_ENV) {
            config.language = lang;
        }
        config
    }

    #[must_use]
    pub fn with_statements_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.statements_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}
