pub mod types;

pub use types::{CommitStatus, Issue, ItemState, PullRequest, StatusState};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::GitHubConfig;
use crate::links::LinkMatch;

/// Why a fetch failed. Callers treat every variant as the same opaque
/// failure; the distinction only shows up in logs.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GitHub API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned an unreadable body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Authenticated GET-and-decode against the GitHub REST API.
/// One attempt per call, bounded by the configured timeout.
pub struct GitHubClient {
    http: reqwest::Client,
    token: Option<String>,
    api_base: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.token.is_none() {
            warn!("no GitHub token configured, requests will be unauthenticated");
        }

        Ok(Self {
            http,
            token: config.token.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// GET `url` and decode the JSON body into `T`.
    ///
    /// Non-2xx responses and timeouts are transport failures; a body that is
    /// not JSON, or not the expected shape, is a parse failure.
    #[instrument(skip(self))]
    pub async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        debug!(status = %response.status(), "received response");

        let body = response.text().await?;
        let decoded = serde_json::from_str(&body)?;
        Ok(decoded)
    }

    pub async fn fetch_pull_request(&self, link: &LinkMatch) -> Result<PullRequest, FetchError> {
        self.fetch(&link.pull_api_url(&self.api_base)).await
    }

    pub async fn fetch_issue(&self, link: &LinkMatch) -> Result<Issue, FetchError> {
        self.fetch(&link.issue_api_url(&self.api_base)).await
    }

    /// Commit statuses for the pull request's head, newest first.
    pub async fn fetch_statuses(&self, pr: &PullRequest) -> Result<Vec<CommitStatus>, FetchError> {
        self.fetch(&pr.statuses_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkKind;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, token: Option<&str>) -> GitHubConfig {
        GitHubConfig {
            token: token.map(str::to_string),
            api_base: server.uri(),
            timeout_secs: 2,
            ..GitHubConfig::default()
        }
    }

    fn issue_link() -> LinkMatch {
        LinkMatch {
            kind: LinkKind::Issue,
            owner: "foo".to_string(),
            repo: "foo-api".to_string(),
            number: 815,
        }
    }

    fn issue_json() -> serde_json::Value {
        json!({
            "number": 815,
            "title": "Broken thing",
            "html_url": "https://github.com/foo/foo-api/issues/815",
            "body": "It broke.",
            "user": {
                "login": "octocat",
                "html_url": "https://github.com/octocat",
                "avatar_url": "https://avatars.githubusercontent.com/u/1"
            },
            "state": "open",
            "labels": []
        })
    }

    #[tokio::test]
    async fn test_fetch_issue_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/foo/foo-api/issues/815"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(issue_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new(&config_for(&server, Some("secret"))).unwrap();
        let issue = client.fetch_issue(&issue_link()).await.unwrap();
        assert_eq!(issue.number, 815);
        assert_eq!(issue.body.as_deref(), Some("It broke."));
    }

    #[tokio::test]
    async fn test_fetch_not_found_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })),
            )
            .mount(&server)
            .await;

        let client = GitHubClient::new(&config_for(&server, None)).unwrap();
        let result = client.fetch_issue(&issue_link()).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_non_json_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = GitHubClient::new(&config_for(&server, None)).unwrap();
        let result = client.fetch_issue(&issue_link()).await;
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_wrong_shape_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "hi" })))
            .mount(&server)
            .await;

        let client = GitHubClient::new(&config_for(&server, None)).unwrap();
        let result = client.fetch_issue(&issue_link()).await;
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(issue_json())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = config_for(&server, None);
        config.timeout_secs = 1;
        let client = GitHubClient::new(&config).unwrap();
        let result = client.fetch_issue(&issue_link()).await;
        match result {
            Err(FetchError::Transport(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {:?}", other.map(|i| i.number)),
        }
    }

    #[tokio::test]
    async fn test_fetch_statuses_uses_pull_request_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/foo/foo-api/statuses/abc123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "state": "pending" }, { "state": "success" }])),
            )
            .mount(&server)
            .await;

        let client = GitHubClient::new(&config_for(&server, None)).unwrap();
        let pr: PullRequest = serde_json::from_value(json!({
            "number": 1,
            "title": "t",
            "html_url": "https://github.com/foo/foo-api/pull/1",
            "user": { "login": "u", "html_url": "h", "avatar_url": "a" },
            "commits": 1,
            "base": { "ref": "main" },
            "head": { "ref": "topic" },
            "state": "open",
            "merged": false,
            "mergeable": true,
            "statuses_url": format!("{}/repos/foo/foo-api/statuses/abc123", server.uri())
        }))
        .unwrap();

        let statuses = client.fetch_statuses(&pr).await.unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].state, StatusState::Pending);
    }
}
