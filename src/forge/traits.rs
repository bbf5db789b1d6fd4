//! Traits related to remote git forges
use async_trait::async_trait;
use std::collections::HashSet;

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        types::{CreatePrRequest, CreateReleaseRequest, Issue, IssueQuery},
    },
};

/// Hosting operations the release workflow needs from the upstream forge.
/// All calls target the upstream repository described by `remote_config`
/// unless an owner is passed explicitly.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;

    /// Login of the account the access token belongs to.
    async fn current_login(&self) -> Result<String>;

    /// Primary email address of the account the access token belongs to.
    async fn primary_email(&self) -> Result<String>;

    /// Number of the milestone with the given title, in any state.
    async fn milestone_number(&self, title: &str) -> Result<u64>;

    /// Every closed issue matching the query, across all pages.
    async fn list_closed_issues(&self, query: IssueQuery) -> Result<Vec<Issue>>;

    /// Whether the issue's event timeline contains a "merged" event.
    async fn is_merged_pr(&self, number: u64) -> Result<bool>;

    /// Logins of every member of the organization.
    async fn list_org_members(&self, org: &str) -> Result<HashSet<String>>;

    /// Creates `branch` at the head of `from` unless it already exists.
    async fn create_branch_if_absent(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        from: &str,
    ) -> Result<()>;

    /// Opens a pull request and returns its URL.
    async fn create_pr(&self, req: CreatePrRequest) -> Result<String>;

    /// Creates a draft release and returns its URL.
    async fn create_draft_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<String>;
}
