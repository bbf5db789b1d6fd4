//! Access to the upstream GitHub repository.
//!
//! Milestone and issue lookups, merge checks, organization membership,
//! branch creation, pull requests and draft releases all go through the
//! [`traits::Forge`] trait so the workflow can be driven against a mock.

/// Connection settings for the upstream forge.
pub mod config;

/// GitHub API client implementation for GitHub.com and Enterprise.
pub mod github;

/// Wrapper adding merge filtering and upstream scoping on top of a forge.
pub mod manager;

/// Common trait for forge access.
pub mod traits;

/// Shared data types for issues, pull requests and releases.
pub mod types;
