//! Sketchboard App Library
//!
//! Headless shell around the whiteboard engine: replays recorded interaction
//! scripts and exports the result as PNG.

mod cli;
mod error;
mod script;

pub use cli::{Cli, Command, RunArgs, execute, run};
pub use error::AppError;
pub use script::{RunReport, Script, Step, run_script};
