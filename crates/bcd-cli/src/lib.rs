//! # bcd-cli: Command-Line Interface for Browser Compat Data Checks
//!
//! Provides the `bcd` binary. The library half holds everything testable:
//! argument structs, configuration loading, data file discovery, and the
//! subcommand handlers.
//!
//! ## Subcommands
//!
//! - `bcd lint` checks every JSON data file under the given paths for
//!   parent/sub-feature consistency.
//!
//! ```bash
//! bcd lint api css
//! bcd lint --format json --fail-fast .
//! bcd --config bcd.yaml -vv lint
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the checks themselves; handlers
//!   delegate to `bcd-consistency`.
//! - All file I/O in the workspace happens here.

pub mod config;
pub mod discover;
pub mod lint;
