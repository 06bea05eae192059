//! Subset of the GitHub REST v3 payloads the listener reads.

use serde::Deserialize;

/// Open/closed state shared by pull requests and issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,
    pub html_url: String,
    pub avatar_url: String,
}

/// One side of a pull request (`base` or `head`).
#[derive(Debug, Clone, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref")]
    pub name: String,
}

/// `GET /repos/{owner}/{repo}/pulls/{n}`
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub user: User,
    /// Number of commits on the head branch.
    pub commits: u64,
    pub base: BranchRef,
    pub head: BranchRef,
    pub state: ItemState,
    #[serde(default)]
    pub merged: bool,
    /// None while GitHub is still computing mergeability.
    #[serde(default)]
    pub mergeable: Option<bool>,
    pub statuses_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// `GET /repos/{owner}/{repo}/issues/{n}`
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    #[serde(default)]
    pub body: Option<String>,
    pub user: User,
    pub state: ItemState,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Pending,
    Success,
    Failure,
    Error,
    #[serde(other)]
    Unknown,
}

/// One entry of a commit's status list. GitHub returns newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitStatus {
    pub state: StatusState,
}
