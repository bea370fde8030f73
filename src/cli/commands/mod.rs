//! Command implementations for fittrack.
//!
//! Each command returns the text to print on stdout.

mod completions;
mod history;
mod plan;
mod session;

pub use completions::completions;
pub use history::history;
pub use plan::plan;
pub use session::{run_headless, session};
