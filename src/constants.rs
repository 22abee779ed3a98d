#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Extension every Algo source file must carry (compared case-insensitively).
pub const SOURCE_EXTENSION: &str = ".algo";

/// Keyword that opens the header line, including its separating space.
pub const ALGORITHM_PREFIX: &str = "Algorithm ";

/// Keyword that opens the constants section.
pub const CONSTANTS_KEYWORD: &str = "Constants";

/// Keyword that opens the variables section.
pub const VARIABLES_KEYWORD: &str = "Variables";

/// Keyword that opens the algorithm body.
pub const BEGIN_KEYWORD: &str = "Begin";

/// Keyword that closes the algorithm body (compared case-insensitively).
pub const END_KEYWORD: &str = "End";

/// Leading spaces required on declaration and statement lines.
pub const DEFAULT_INDENT: usize = 4;

/// Upper bound on expression-engine operations per evaluation.
pub const DEFAULT_MAX_OPERATIONS: u64 = 1_000_000;

/// Upper bound on expression nesting depth.
pub const DEFAULT_MAX_EXPR_DEPTH: usize = 64;

/// Log level used when `ALGO_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
