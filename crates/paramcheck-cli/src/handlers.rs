//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod lint;
mod resolve;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use lint::handle_lint;
pub use resolve::handle_resolve;
pub use validate::handle_validate;
