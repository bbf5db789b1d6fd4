//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{
    Octocrab,
    models::repos::Object,
    params::repos::Reference,
};
use serde::{Deserialize, de::DeserializeOwned};
use std::collections::HashSet;

use crate::{
    ReleaseBotError, Result,
    forge::{
        config::{DEFAULT_PAGE_SIZE, MERGED_EVENT, RemoteConfig},
        traits::Forge,
        types::{
            Author, CreatePrRequest, CreateReleaseRequest, Issue, IssueQuery,
            Milestone,
        },
    },
};

#[derive(Debug, Deserialize)]
struct GithubUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
struct GithubLabel {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct GithubMilestone {
    pub id: u64,
    pub number: u64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct GithubIssue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub user: GithubUser,
    #[serde(default)]
    pub labels: Vec<GithubLabel>,
    pub milestone: Option<GithubMilestone>,
    pub pull_request: Option<serde_json::Value>,
}

impl From<GithubIssue> for Issue {
    fn from(issue: GithubIssue) -> Self {
        Issue {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            html_url: issue.html_url,
            author: Author {
                login: issue.user.login,
                avatar_url: issue.user.avatar_url,
                html_url: issue.user.html_url,
            },
            labels: issue.labels.into_iter().map(|l| l.name).collect(),
            milestone: issue.milestone.map(|m| Milestone {
                id: m.id,
                title: m.title,
            }),
            is_pull_request: issue.pull_request.is_some(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GithubIssueEvent {
    pub event: String,
}

#[derive(Debug, Deserialize)]
struct GithubEmail {
    pub email: String,
    pub primary: bool,
}

/// GitHub forge implementation using Octocrab for API interactions with
/// issues, milestones, refs, pull requests and releases.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and API
    /// base URL configuration.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_uri();
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?
            .build()?;

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }

    fn repo_endpoint(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_uri, self.config.owner, self.config.repo, path
        )
    }

    /// Follows `page` query parameters until a short page is returned.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut items = vec![];
        let mut page = 1u32;

        loop {
            let mut query: Vec<(&str, String)> = params.to_vec();
            query.push(("per_page", DEFAULT_PAGE_SIZE.to_string()));
            query.push(("page", page.to_string()));

            let batch: Vec<T> = self.instance.get(endpoint, Some(&query)).await?;
            let count = batch.len();
            items.extend(batch);

            if count < DEFAULT_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        Ok(items)
    }

    async fn branch_sha(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<String>> {
        let result = self
            .instance
            .repos(owner, repo)
            .get_ref(&Reference::Branch(branch.to_string()))
            .await;

        match result {
            Ok(reference) => match reference.object {
                Object::Commit { sha, .. } => Ok(Some(sha)),
                _ => Err(ReleaseBotError::forge(format!(
                    "ref heads/{branch} does not point at a commit"
                ))),
            },
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code.as_u16() == 404 =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn current_login(&self) -> Result<String> {
        let user = self.instance.current().user().await?;
        Ok(user.login)
    }

    async fn primary_email(&self) -> Result<String> {
        let endpoint = format!("{}/user/emails", self.base_uri);
        let emails: Vec<GithubEmail> =
            self.instance.get(endpoint, None::<&()>).await?;

        emails
            .into_iter()
            .find(|e| e.primary)
            .map(|e| e.email)
            .ok_or_else(|| {
                ReleaseBotError::forge("no primary email found for account")
            })
    }

    async fn milestone_number(&self, title: &str) -> Result<u64> {
        info!("looking up milestone: {title}");

        let milestones: Vec<GithubMilestone> = self
            .get_all_pages(
                &self.repo_endpoint("milestones"),
                &[("state", "all".to_string())],
            )
            .await?;

        debug!("found {} milestones", milestones.len());

        milestones
            .into_iter()
            .find(|m| m.title == title)
            .map(|m| m.number)
            .ok_or_else(|| ReleaseBotError::milestone_not_found(title))
    }

    async fn list_closed_issues(&self, query: IssueQuery) -> Result<Vec<Issue>> {
        let mut params = vec![("state", "closed".to_string())];

        match &query {
            IssueQuery::Milestone(number) => {
                params.push(("milestone", number.to_string()))
            }
            IssueQuery::Labels(labels) => {
                params.push(("labels", labels.join(",")))
            }
        }

        let issues: Vec<GithubIssue> = self
            .get_all_pages(&self.repo_endpoint("issues"), &params)
            .await?;

        info!("found {} closed issues for {:?}", issues.len(), query);

        Ok(issues.into_iter().map(Issue::from).collect())
    }

    async fn is_merged_pr(&self, number: u64) -> Result<bool> {
        let events: Vec<GithubIssueEvent> = self
            .get_all_pages(
                &self.repo_endpoint(&format!("issues/{number}/events")),
                &[],
            )
            .await?;

        Ok(events.iter().any(|e| e.event == MERGED_EVENT))
    }

    async fn list_org_members(&self, org: &str) -> Result<HashSet<String>> {
        let endpoint = format!("{}/orgs/{}/members", self.base_uri, org);
        let members: Vec<GithubUser> =
            self.get_all_pages(&endpoint, &[]).await?;

        info!("{} members in org {org}", members.len());

        Ok(members.into_iter().map(|m| m.login).collect())
    }

    async fn create_branch_if_absent(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        from: &str,
    ) -> Result<()> {
        info!("creating branch: {owner}/{repo}/{branch}");

        if let Some(sha) = self.branch_sha(owner, repo, branch).await? {
            info!("branch {branch} already exists at {sha}");
            return Ok(());
        }

        let from_sha =
            self.branch_sha(owner, repo, from).await?.ok_or_else(|| {
                ReleaseBotError::forge(format!(
                    "failed to find sha of branch {from} in {owner}/{repo}"
                ))
            })?;

        info!("hash for {from}: {from_sha}");

        self.instance
            .repos(owner, repo)
            .create_ref(&Reference::Branch(branch.to_string()), from_sha)
            .await?;

        info!("created branch {owner}/{repo}/{branch}");

        Ok(())
    }

    async fn create_pr(&self, req: CreatePrRequest) -> Result<String> {
        let head = format!("{}:{}", req.head_owner, req.head_branch);

        info!(
            "opening pull request {head} -> {}/{}:{}",
            self.config.owner, self.config.repo, req.base_branch
        );

        let pr = self
            .instance
            .pulls(&self.config.owner, &self.config.repo)
            .create(req.title, head, req.base_branch)
            .body(req.body)
            .send()
            .await?;

        pr.html_url.map(|url| url.to_string()).ok_or_else(|| {
            ReleaseBotError::forge(format!(
                "pull request {} has no html url",
                pr.number
            ))
        })
    }

    async fn create_draft_release(
        &self,
        req: CreateReleaseRequest,
    ) -> Result<String> {
        info!(
            "creating draft release {} on branch {}",
            req.tag, req.target_branch
        );

        let release = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .releases()
            .create(&req.tag)
            .name(&req.title)
            .body(&req.body)
            .target_commitish(&req.target_branch)
            .draft(true)
            .prerelease(false)
            .send()
            .await?;

        Ok(release.html_url.to_string())
    }
}
