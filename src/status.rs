//! Display state for pull requests and issues.

use std::fmt;

use crate::github::{CommitStatus, Issue, ItemState, PullRequest, StatusState};

/// Single state shown in the attachment's tag and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    Merged,
    Closed,
    NeedsRebase,
    Building,
    CiFailure,
    CiError,
    Open,
}

impl DisplayState {
    pub fn label(self) -> &'static str {
        match self {
            DisplayState::Merged => "Merged",
            DisplayState::Closed => "Closed",
            DisplayState::NeedsRebase => "Needs Rebase",
            DisplayState::Building => "Building",
            DisplayState::CiFailure => "CI Failure",
            DisplayState::CiError => "CI Error",
            DisplayState::Open => "Open",
        }
    }

    /// Attachment colour as a `#RRGGBB` string.
    pub fn color(self) -> &'static str {
        match self {
            DisplayState::Merged => "#6E5497",
            DisplayState::Closed => "#BE2A00",
            DisplayState::NeedsRebase => "#888888",
            DisplayState::Building => "#CEA600",
            DisplayState::CiFailure | DisplayState::CiError => "#EE5B59",
            DisplayState::Open => "#6AC631",
        }
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resolve a pull request's display state from its merge state, its
/// mergeability and the newest commit status. First matching row wins:
///
/// | state  | merged | mergeable | newest status     | result        |
/// |--------|--------|-----------|-------------------|---------------|
/// | closed | true   | -         | -                 | Merged        |
/// | closed | false  | -         | -                 | Closed        |
/// | open   | -      | false     | -                 | Needs Rebase  |
/// | open   | -      | true/null | pending           | Building      |
/// | open   | -      | true/null | failure / error   | CI Failure / CI Error |
/// | open   | -      | true/null | none / success    | Open          |
///
/// `mergeable == null` means GitHub has not finished computing it yet, which
/// says nothing about conflicts, so it is not reported as Needs Rebase.
/// The linked issue carries no merge or CI information and does not take part.
pub fn resolve_pull_request(pr: &PullRequest, statuses: &[CommitStatus]) -> DisplayState {
    match pr.state {
        ItemState::Closed if pr.merged => DisplayState::Merged,
        ItemState::Closed => DisplayState::Closed,
        ItemState::Open if pr.mergeable == Some(false) => DisplayState::NeedsRebase,
        ItemState::Open => match statuses.first().map(|s| s.state) {
            Some(StatusState::Pending) => DisplayState::Building,
            Some(StatusState::Failure) => DisplayState::CiFailure,
            Some(StatusState::Error) => DisplayState::CiError,
            Some(StatusState::Success) | Some(StatusState::Unknown) | None => DisplayState::Open,
        },
    }
}

pub fn resolve_issue(issue: &Issue) -> DisplayState {
    match issue.state {
        ItemState::Closed => DisplayState::Closed,
        ItemState::Open => DisplayState::Open,
    }
}
