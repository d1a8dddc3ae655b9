//! CLI exit code registry
//!
//! Exit codes are part of the shell contract — scripts rely on them.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Pipeline error - workbook, table, or render failure (including an
/// unknown layout name at render time).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments or an unparseable prompt answer. clap
/// emits this code itself for argument errors.
pub const EXIT_USAGE: u8 = 2;
