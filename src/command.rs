//! Command execution for release-bot.
//!
//! - **common**: resolves the operator identity and builds the shared
//!   release config and forge manager from CLI arguments
//! - **release**: the full orchestrated release run
//! - **notes**: read-only preview of the release notes a run would publish

/// Shared setup used by every command.
pub mod common;

/// Read-only release note preview.
pub mod notes;

/// Full release run.
pub mod release;
