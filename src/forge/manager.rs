//! Manager that wraps forge implementations
use futures_util::future::try_join_all;
use log::*;
use std::collections::HashSet;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        traits::Forge,
        types::{
            CreatePrRequest, CreateReleaseRequest, Issue, IssueQuery,
            MergeRecord,
        },
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub async fn current_login(&self) -> Result<String> {
        self.forge.current_login().await
    }

    pub async fn primary_email(&self) -> Result<String> {
        self.forge.primary_email().await
    }

    /// Merged pull requests filed under the milestone with the given title.
    pub async fn merged_prs_for_milestone(
        &self,
        title: &str,
    ) -> Result<Vec<MergeRecord>> {
        let number = self.forge.milestone_number(title).await?;
        info!("milestone {title:?} is number {number}");
        self.merged_prs(IssueQuery::Milestone(number)).await
    }

    /// Merged pull requests carrying all of the given labels.
    pub async fn merged_prs_for_labels(
        &self,
        labels: Vec<String>,
    ) -> Result<Vec<MergeRecord>> {
        self.merged_prs(IssueQuery::Labels(labels)).await
    }

    /// Lists closed issues for the query and keeps the pull requests whose
    /// timeline has a merge event. Merge checks run concurrently; the result
    /// keeps the listing order.
    pub async fn merged_prs(
        &self,
        query: IssueQuery,
    ) -> Result<Vec<MergeRecord>> {
        let issues = self.forge.list_closed_issues(query).await?;

        let pulls = issues
            .into_iter()
            .filter(|issue| {
                if !issue.is_pull_request {
                    debug!("#{} is not a pull request: skipping", issue.number);
                }
                issue.is_pull_request
            })
            .collect::<Vec<Issue>>();

        let checks = pulls.iter().map(|pr| self.forge.is_merged_pr(pr.number));
        let merged = try_join_all(checks).await?;

        let records = pulls
            .into_iter()
            .zip(merged)
            .filter_map(|(pr, merged)| {
                if !merged {
                    warn!("#{} was closed without merging: skipping", pr.number);
                    return None;
                }
                debug!(
                    "#{} [{}] by {}: {:?}",
                    pr.number, pr.title, pr.author.login, pr.labels
                );
                Some(MergeRecord::from_issue(pr, true))
            })
            .collect::<Vec<MergeRecord>>();

        info!("found {} merged pull requests", records.len());

        Ok(records)
    }

    pub async fn list_org_members(&self, org: &str) -> Result<HashSet<String>> {
        self.forge.list_org_members(org).await
    }

    /// Creates the branch on the upstream repository from `from` unless it
    /// already exists.
    pub async fn ensure_upstream_branch(
        &self,
        branch: &str,
        from: &str,
    ) -> Result<()> {
        self.forge
            .create_branch_if_absent(
                &self.remote_config.owner,
                &self.remote_config.repo,
                branch,
                from,
            )
            .await
    }

    pub async fn create_pr(&self, req: CreatePrRequest) -> Result<String> {
        self.forge.create_pr(req).await
    }

    pub async fn create_draft_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<String> {
        self.forge.create_draft_release(req).await
    }
}
