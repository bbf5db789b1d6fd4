pub mod bump;
pub mod cli;
pub mod command;
pub mod config;
mod error;
pub mod forge;
pub mod notes;
pub mod orchestrator;
pub mod repo;
pub mod version;

pub use cli::{Args, Command};
pub use error::{ReleaseBotError, Result};
pub use orchestrator::{Orchestrator, Outcome};

#[cfg(test)]
pub mod test_helpers;
