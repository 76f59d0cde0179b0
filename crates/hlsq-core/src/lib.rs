pub mod config;
pub mod logging;

pub mod fetch;
pub mod filename;
pub mod queue;
pub mod relocate;
pub mod runner;
