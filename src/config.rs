#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{str::FromStr, sync::OnceLock};

use bon::Builder;
use tracing::metadata::LevelFilter;

use crate::constants::{
    DEFAULT_INDENT, DEFAULT_LOG_LEVEL, DEFAULT_MAX_EXPR_DEPTH, DEFAULT_MAX_OPERATIONS,
};

/// Interpreter settings. Usually read from the environment via
/// [`Config::from_env`], or assembled with [`Config::builder`].
#[derive(Debug, Clone, Builder)]
pub struct Config {
    /// Leading spaces required on declaration and statement lines.
    #[builder(default = DEFAULT_INDENT)]
    indent:         usize,
    /// Operation budget for a single expression evaluation.
    #[builder(default = DEFAULT_MAX_OPERATIONS)]
    max_operations: u64,
    /// Maximum nesting depth of an expression.
    #[builder(default = DEFAULT_MAX_EXPR_DEPTH)]
    max_expr_depth: usize,
    /// Verbosity of the `tracing` subscriber installed by the binary.
    #[builder(default = LevelFilter::WARN)]
    log_level:      LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Config {
    /// Builds a configuration from `ALGO_*` environment variables, falling
    /// back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let log_level = std::env::var("ALGO_LOG")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .parse::<LevelFilter>()
            .unwrap_or(LevelFilter::WARN);

        Self {
            indent: read_env("ALGO_INDENT", DEFAULT_INDENT),
            max_operations: read_env("ALGO_MAX_OPERATIONS", DEFAULT_MAX_OPERATIONS),
            max_expr_depth: read_env("ALGO_MAX_EXPR_DEPTH", DEFAULT_MAX_EXPR_DEPTH),
            log_level,
        }
    }

    /// Returns the required indent width.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Returns the per-expression operation budget.
    pub fn max_operations(&self) -> u64 {
        self.max_operations
    }

    /// Returns the maximum expression depth.
    pub fn max_expr_depth(&self) -> usize {
        self.max_expr_depth
    }

    /// Returns the configured log level.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Returns a copy with a different log level.
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }
}

/// Global storage for the lazily constructed configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Returns the process-wide configuration, reading the environment on first
/// use.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Parses an environment variable, falling back to `default` when it is
/// missing or fails to parse.
fn read_env<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
