//! CLI command handlers, one per file.

mod add;
mod completions;
mod remove;
mod run;
mod status;

pub use add::run_add;
pub use completions::run_completions;
pub use remove::run_remove;
pub use run::run_downloads;
pub use status::run_status;
