//! GitHub link detection in free-form chat text.
//!
//! Grammar (case-insensitive):
//!
//! ```text
//! https://[www.]github.com/{owner}/{repo}/pull/{n}
//! https://[www.]github.com/{owner}/{repo}/issues/{n}
//! https://[www.]github.com/{owner}/{repo}/pulls
//! ```
//!
//! `owner` and `repo` are `[A-Za-z0-9-]+`, `n` is `\d+`. A numbered link must
//! end at the end of the text or at a character that is neither a word
//! character nor `/`, so links to sub-pages (`/pull/7/files`) are ignored.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

const HOST: &str = r"https://(?:www\.)?github\.com";
const NAME: &str = r"[A-Za-z0-9-]+";

static ITEM_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){HOST}/({NAME})/({NAME})/(pull|issues)/(\d+)(?:[^\w/]|$)"
    ))
    .expect("item link pattern is valid")
});

static PULLS_LISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){HOST}/{NAME}/{NAME}/pulls\b"))
        .expect("pulls listing pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Pull,
    Issue,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Pull => write!(f, "pull"),
            LinkKind::Issue => write!(f, "issue"),
        }
    }
}

/// A pull request or issue reference found in a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatch {
    pub kind: LinkKind,
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl LinkMatch {
    /// `GET /repos/{owner}/{repo}/pulls/{n}` under `api_base`.
    pub fn pull_api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.number
        )
    }

    /// `GET /repos/{owner}/{repo}/issues/{n}` under `api_base`. Every pull
    /// request also has an issue under the same number.
    pub fn issue_api_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.number
        )
    }
}

/// Lazily yield every pull request and issue link in `text`, in order of
/// appearance. Numbers too large for a u64 are skipped.
pub fn extract(text: &str) -> impl Iterator<Item = LinkMatch> + '_ {
    ITEM_LINK.captures_iter(text).filter_map(|caps| {
        let kind = if caps[3].eq_ignore_ascii_case("pull") {
            LinkKind::Pull
        } else {
            LinkKind::Issue
        };
        let number = caps[4].parse::<u64>().ok()?;
        Some(LinkMatch {
            kind,
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            number,
        })
    })
}

/// True when `text` contains a link to a repository's pull request listing.
pub fn mentions_pulls_listing(text: &str) -> bool {
    PULLS_LISTING.is_match(text)
}
