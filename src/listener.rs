//! Turns one chat message into zero or more replies.
//!
//! Every link found in a message gets its own pipeline. Pipelines run
//! concurrently, share nothing mutable, and report their own failures, so a
//! broken link never holds up or cancels the others.

use futures::future::join_all;
use tracing::{debug, info, info_span, instrument, warn, Instrument};

use crate::attachment::{self, Attachment};
use crate::chat::ChatSink;
use crate::config::ListenerConfig;
use crate::github::{FetchError, GitHubClient};
use crate::links::{self, LinkKind, LinkMatch};
use crate::status;

pub const ISSUE_FETCH_ERROR: &str = "There was an error fetching the issue.";
pub const PULL_FETCH_ERROR: &str = "There was an error fetching the pull request.";

pub struct Listener {
    client: GitHubClient,
    config: ListenerConfig,
}

impl Listener {
    pub fn new(client: GitHubClient, config: ListenerConfig) -> Self {
        Self { client, config }
    }

    /// Handle one incoming message: post the review reminder for pull
    /// request listing links and one summary (or error notice) per pull
    /// request / issue link. Completion order across links is unspecified.
    #[instrument(skip_all, fields(message_len = text.len()))]
    pub async fn handle_message(&self, text: &str, sink: &dyn ChatSink) {
        let reminder = async {
            if links::mentions_pulls_listing(text) {
                info!("pull request listing mentioned, sending reminder");
                send_text(sink, &self.config.pulls_reminder).await;
            }
        };

        let pipelines = links::extract(text).map(|link| {
            let span = info_span!(
                "link",
                kind = %link.kind,
                owner = %link.owner,
                repo = %link.repo,
                number = link.number
            );
            self.handle_link(link, sink).instrument(span)
        });

        let (_, handled) = tokio::join!(reminder, join_all(pipelines));
        debug!(links = handled.len(), "message handled");
    }

    async fn handle_link(&self, link: LinkMatch, sink: &dyn ChatSink) {
        match link.kind {
            LinkKind::Issue => self.handle_issue(&link, sink).await,
            LinkKind::Pull => self.handle_pull_request(&link, sink).await,
        }
    }

    async fn handle_issue(&self, link: &LinkMatch, sink: &dyn ChatSink) {
        match self.client.fetch_issue(link).await {
            Ok(issue) => {
                let state = status::resolve_issue(&issue);
                debug!(state = %state, "resolved issue state");
                send_attachment(sink, &attachment::format_issue(&issue, state)).await;
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch issue");
                send_text(sink, ISSUE_FETCH_ERROR).await;
            }
        }
    }

    async fn handle_pull_request(&self, link: &LinkMatch, sink: &dyn ChatSink) {
        match self.pull_request_attachment(link).await {
            Ok(attachment) => send_attachment(sink, &attachment).await,
            Err(e) => {
                warn!(error = %e, "failed to fetch pull request");
                send_text(sink, PULL_FETCH_ERROR).await;
            }
        }
    }

    /// Pull request and linked issue are fetched concurrently; the status
    /// list needs the pull request's `statuses_url` so it goes last.
    async fn pull_request_attachment(&self, link: &LinkMatch) -> Result<Attachment, FetchError> {
        let (pr, issue) = tokio::try_join!(
            self.client.fetch_pull_request(link),
            self.client.fetch_issue(link),
        )?;
        let statuses = self.client.fetch_statuses(&pr).await?;

        let state = status::resolve_pull_request(&pr, &statuses);
        debug!(
            state = %state,
            merged = pr.merged,
            mergeable = ?pr.mergeable,
            statuses = statuses.len(),
            "resolved pull request state"
        );
        Ok(attachment::format_pull_request(&pr, &issue, state))
    }
}

async fn send_text(sink: &dyn ChatSink, text: &str) {
    if let Err(e) = sink.send_text(text).await {
        warn!(error = %e, "failed to send chat message");
    }
}

async fn send_attachment(sink: &dyn ChatSink, attachment: &Attachment) {
    if let Err(e) = sink.send_attachment(attachment).await {
        warn!(error = %e, "failed to send chat attachment");
    }
}
