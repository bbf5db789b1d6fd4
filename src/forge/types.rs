use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Author of an issue or pull request.
pub struct Author {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Milestone an issue was filed under.
pub struct Milestone {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A closed issue as returned by the issue listing. Pull requests are issues
/// on GitHub; `is_pull_request` tells them apart.
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub html_url: String,
    pub author: Author,
    pub labels: Vec<String>,
    pub milestone: Option<Milestone>,
    pub is_pull_request: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A pull request confirmed merged, the input to release note generation.
pub struct MergeRecord {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub html_url: String,
    pub author: Author,
    pub labels: Vec<String>,
    pub milestone: Option<Milestone>,
    pub merged: bool,
}

impl MergeRecord {
    pub fn from_issue(issue: Issue, merged: bool) -> Self {
        Self {
            number: issue.number,
            title: issue.title,
            body: issue.body,
            html_url: issue.html_url,
            author: issue.author,
            labels: issue.labels,
            milestone: issue.milestone,
            merged,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Filter for listing closed issues.
pub enum IssueQuery {
    Milestone(u64),
    Labels(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to open a pull request from a fork branch into the upstream.
pub struct CreatePrRequest {
    pub head_owner: String,
    pub head_branch: String,
    pub base_branch: String,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Request to create a draft release.
pub struct CreateReleaseRequest {
    pub tag: String,
    pub target_branch: String,
    pub title: String,
    pub body: String,
}
