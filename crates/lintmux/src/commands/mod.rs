//! CLI command implementations - one module per top-level command.

pub mod lint;
pub mod list;

/// Exit code: clean run, no error-severity diagnostics.
pub const EXIT_OK: i32 = 0;
/// Exit code: at least one error-severity diagnostic.
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// Exit code: the run itself failed (bad config, unknown language, tool failure).
pub const EXIT_FAILURE: i32 = 2;
