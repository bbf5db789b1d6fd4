//! Error types for release-bot operations.

use thiserror::Error;

/// Main error type for release-bot operations.
#[derive(Error, Debug)]
pub enum ReleaseBotError {
    // Input errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid version format: {0}")]
    InvalidVersion(#[from] semver::Error),

    #[error("Version string must not be empty")]
    EmptyVersion,

    // Forge/Git errors
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("No milestone with title {0:?} was found")]
    MilestoneNotFound(String),

    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    // Rendering/parsing errors
    #[error("Template rendering failed: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Prompt failed: {0}")]
    PromptError(#[from] dialoguer::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using ReleaseBotError
pub type Result<T> = std::result::Result<T, ReleaseBotError>;

impl ReleaseBotError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    /// Create a milestone lookup error
    pub fn milestone_not_found(title: impl Into<String>) -> Self {
        Self::MilestoneNotFound(title.into())
    }
}

impl From<std::io::Error> for ReleaseBotError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ReleaseBotError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. }
                if source.message.contains("rate limit") =>
            {
                Self::RateLimitExceeded
            }
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formats() {
        let err = ReleaseBotError::forge("API call failed");
        assert_eq!(err.to_string(), "Forge operation failed: API call failed");

        let err = ReleaseBotError::invalid_config("missing field");
        assert_eq!(err.to_string(), "Invalid configuration: missing field");

        let err = ReleaseBotError::milestone_not_found("1.14 Release");
        assert_eq!(
            err.to_string(),
            r#"No milestone with title "1.14 Release" was found"#
        );

        assert_eq!(
            ReleaseBotError::EmptyVersion.to_string(),
            "Version string must not be empty"
        );
    }

    #[test]
    fn test_error_helpers() {
        let err = ReleaseBotError::forge("API call failed");
        assert!(matches!(err, ReleaseBotError::ForgeError(_)));

        let err = ReleaseBotError::invalid_args("bad list");
        assert!(matches!(err, ReleaseBotError::InvalidArgs(_)));

        let err = ReleaseBotError::milestone_not_found("1.2 Release");
        assert!(matches!(err, ReleaseBotError::MilestoneNotFound(_)));
    }

    #[test]
    fn test_from_conversions() {
        let semver_err = semver::Version::parse("invalid");
        assert!(semver_err.is_err());
        let err: ReleaseBotError = semver_err.unwrap_err().into();
        assert!(matches!(err, ReleaseBotError::InvalidVersion(_)));

        let io_err = std::io::Error::other("disk gone");
        let err: ReleaseBotError = io_err.into();
        assert!(matches!(err, ReleaseBotError::Other(_)));
    }
}
