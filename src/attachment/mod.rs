pub mod types;

pub use types::{Attachment, Field};

use crate::github::types::{Issue, Label, PullRequest, User};
use crate::status::DisplayState;

/// Build the attachment for a pull request. Labels come from the linked
/// issue, since the pulls endpoint does not carry them.
pub fn format_pull_request(pr: &PullRequest, issue: &Issue, state: DisplayState) -> Attachment {
    let summary = format!(
        "*{}* wants to merge {} into `{}` from `{}`",
        pr.user.login,
        commit_count(pr.commits),
        pr.base.name,
        pr.head.name
    );
    build(
        &pr.title,
        pr.number,
        &pr.html_url,
        &pr.user,
        state,
        &summary,
        &issue.labels,
    )
}

pub fn format_issue(issue: &Issue, state: DisplayState) -> Attachment {
    build(
        &issue.title,
        issue.number,
        &issue.html_url,
        &issue.user,
        state,
        issue.body.as_deref().unwrap_or_default(),
        &issue.labels,
    )
}

fn build(
    title: &str,
    number: u64,
    link: &str,
    author: &User,
    state: DisplayState,
    text: &str,
    labels: &[Label],
) -> Attachment {
    Attachment {
        title: format!("{} #{}", title, number),
        title_link: link.to_string(),
        text: format!("{} {}", state_tag(state), text),
        color: state.color().to_string(),
        fallback: format!("{}#{}", title, number),
        author_name: author.login.clone(),
        author_link: author.html_url.clone(),
        author_icon: author.avatar_url.clone(),
        mrkdwn_in: vec!["text".to_string(), "fields".to_string()],
        fields: labels_field(labels).map(|field| vec![field]),
    }
}

fn state_tag(state: DisplayState) -> String {
    format!("`[{}]`", state.label())
}

fn commit_count(count: u64) -> String {
    if count == 1 {
        "1 commit".to_string()
    } else {
        format!("{} commits", count)
    }
}

fn labels_field(labels: &[Label]) -> Option<Field> {
    if labels.is_empty() {
        return None;
    }
    let value = labels
        .iter()
        .map(|label| format!("`[{}]`", label.name))
        .collect::<Vec<_>>()
        .join("\n");
    Some(Field {
        title: "Labels".to_string(),
        value,
        short: true,
    })
}
