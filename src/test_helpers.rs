//! Common test helper functions shared across test modules.
//!
//! This module provides reusable fixtures so individual test suites don't
//! have to spell out full configs and forge records.
use secrecy::SecretString;

use crate::{
    config::{Author as CommitAuthor, ReleaseConfig, ThanksConfig},
    forge::{
        config::RemoteConfig,
        types::{Author, Issue, MergeRecord},
    },
    version::ReleaseVersion,
};

/// Creates a RemoteConfig pointing at `grpc/grpc-go` on github.com.
///
/// # Example
/// ```ignore
/// let config = create_test_remote_config();
/// ```
pub fn create_test_remote_config() -> RemoteConfig {
    RemoteConfig {
        host: "github.com".to_string(),
        scheme: "https".to_string(),
        owner: "grpc".to_string(),
        repo: "grpc-go".to_string(),
        token: SecretString::from("test-token".to_string()),
    }
}

/// Creates a ReleaseConfig for releasing 1.14.2 of `grpc/grpc-go` from the
/// `octocat` fork, with special thanks enabled.
pub fn create_test_release_config() -> ReleaseConfig {
    ReleaseConfig::builder()
        .version(ReleaseVersion::parse("1.14.2").unwrap())
        .upstream_owner("grpc")
        .repo("grpc-go")
        .fork_owner("octocat")
        .token(SecretString::from("test-token".to_string()))
        .author(CommitAuthor {
            name: "octocat".into(),
            email: "releasebot@example.com".into(),
        })
        .org("grpc")
        .thanks(ThanksConfig {
            enabled: true,
            ..ThanksConfig::default()
        })
        .build()
        .unwrap()
}

/// Creates a closed pull request issue authored by `octocat`.
///
/// # Arguments
/// * `number` - Pull request number
/// * `title` - Pull request title
/// * `labels` - Label names, e.g. `&["Type: Bug"]`
pub fn create_test_pr_issue(number: u64, title: &str, labels: &[&str]) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: "".into(),
        html_url: format!("https://github.com/grpc/grpc-go/pull/{number}"),
        author: Author {
            login: "octocat".into(),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".into(),
            html_url: "https://github.com/octocat".into(),
        },
        labels: labels.iter().map(|l| l.to_string()).collect(),
        milestone: None,
        is_pull_request: true,
    }
}

/// Creates a merged pull request record.
///
/// # Example
/// ```ignore
/// let record = create_test_merge_record(42, "xds: fix leak", &["Type: Bug"]);
/// ```
pub fn create_test_merge_record(
    number: u64,
    title: &str,
    labels: &[&str],
) -> MergeRecord {
    MergeRecord::from_issue(create_test_pr_issue(number, title, labels), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_remote_config() {
        let config = create_test_remote_config();
        assert_eq!(config.host, "github.com");
        assert_eq!(config.owner, "grpc");
        assert_eq!(config.repo, "grpc-go");
    }

    #[test]
    fn test_create_test_release_config() {
        let config = create_test_release_config();
        assert_eq!(config.version.to_string(), "1.14.2");
        assert_eq!(config.fork_owner, "octocat");
        assert!(config.thanks.enabled);
    }

    #[test]
    fn test_create_test_merge_record() {
        let record = create_test_merge_record(42, "fix", &["Type: Bug"]);
        assert_eq!(record.number, 42);
        assert!(record.merged);
        assert_eq!(record.labels, vec!["Type: Bug".to_string()]);
        assert_eq!(record.html_url, "https://github.com/grpc/grpc-go/pull/42");
    }
}
