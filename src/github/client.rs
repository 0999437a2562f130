//! GitHub API client
//!
//! Minimal REST client covering the calls the publisher makes: issue comment
//! listing and maintenance, and check run creation. Every call defines success
//! as one exact status code and reports anything else with a message naming the
//! owner, repository and the issue, comment or commit involved.

use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, app_err};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use strum::Display;

const LOG_TARGET: &str = "    github";

/// Public GitHub REST endpoint, used unless the runner points elsewhere.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const API_VERSION: &str = "2022-11-28";

/// An issue or pull request comment, with only the fields we need
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueComment {
    pub id: u64,

    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckRunStatus {
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    pub text: String,
}

/// Body of a check run creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCheckRun {
    pub name: String,
    pub head_sha: String,
    pub status: CheckRunStatus,
    pub conclusion: CheckConclusion,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub output: CheckRunOutput,
}

/// Operations the publisher needs from the code hosting service.
pub trait Forge {
    /// Every comment on an issue or pull request, across all pages.
    fn list_comments(&self, owner: &str, repo: &str, issue_number: u64) -> impl Future<Output = Result<Vec<IssueComment>>> + Send;

    fn create_comment(&self, owner: &str, repo: &str, issue_number: u64, body: &str) -> impl Future<Output = Result<()>> + Send;

    fn update_comment(&self, owner: &str, repo: &str, comment_id: u64, body: &str) -> impl Future<Output = Result<()>> + Send;

    fn delete_comment(&self, owner: &str, repo: &str, comment_id: u64) -> impl Future<Output = Result<()>> + Send;

    fn create_check_run(&self, owner: &str, repo: &str, check_run: &NewCheckRun) -> impl Future<Output = Result<()>> + Send;
}

/// [`Forge`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a new client with optional authentication token and base URL
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        _ = headers.insert(HeaderName::from_static("x-github-api-version"), HeaderValue::from_static(API_VERSION));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("dotnet-outdated")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{owner}/{repo}", self.base_url)
    }
}

fn check_status(response: &reqwest::Response, expected: StatusCode, failure: impl FnOnce() -> String) -> Result<()> {
    let status = response.status();
    if status == expected {
        return Ok(());
    }

    let message = failure();
    log::debug!(target: LOG_TARGET, "Unexpected status {status}, expected {expected}");
    Err(app_err!("{message}"))
}

impl Forge for GitHubClient {
    async fn list_comments(&self, owner: &str, repo: &str, issue_number: u64) -> Result<Vec<IssueComment>> {
        let failure = || format!("Request to retrieve comments failed for:\n\towner: {owner}\n\trepo: {repo}\n\tissueNumber: {issue_number}");
        log::debug!(target: LOG_TARGET, "Listing comments of {owner}/{repo}#{issue_number}");

        let mut comments = Vec::new();
        for page in 1.. {
            let url = format!(
                "{}/issues/{issue_number}/comments?per_page={PER_PAGE}&page={page}",
                self.repo_url(owner, repo)
            );

            let response = self.client.get(&url).send().await.into_app_err_with(failure)?;
            check_status(&response, StatusCode::OK, failure)?;

            let batch: Vec<IssueComment> = response.json().await.into_app_err_with(failure)?;
            let last_page = batch.len() < PER_PAGE;
            comments.extend(batch);

            if last_page {
                break;
            }
        }

        log::debug!(target: LOG_TARGET, "Fetched {} comments for PR #{issue_number}", comments.len());
        Ok(comments)
    }

    async fn create_comment(&self, owner: &str, repo: &str, issue_number: u64, body: &str) -> Result<()> {
        let failure = || format!("Request to create comment failed for:\n\towner: {owner}\n\trepo: {repo}\n\tissueNumber: {issue_number}");
        log::debug!(target: LOG_TARGET, "Creating a comment on {owner}/{repo}#{issue_number}");

        let url = format!("{}/issues/{issue_number}/comments", self.repo_url(owner, repo));
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .into_app_err_with(failure)?;

        check_status(&response, StatusCode::CREATED, failure)
    }

    async fn update_comment(&self, owner: &str, repo: &str, comment_id: u64, body: &str) -> Result<()> {
        let failure = || format!("Request to update comment failed for:\n\towner: {owner}\n\trepo: {repo}\n\tcommentId: {comment_id}");
        log::debug!(target: LOG_TARGET, "Updating comment {comment_id} on {owner}/{repo}");

        let url = format!("{}/issues/comments/{comment_id}", self.repo_url(owner, repo));
        let response = self
            .client
            .patch(&url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .into_app_err_with(failure)?;

        check_status(&response, StatusCode::OK, failure)
    }

    async fn delete_comment(&self, owner: &str, repo: &str, comment_id: u64) -> Result<()> {
        let failure = || format!("Request to delete comment failed for:\n\towner: {owner}\n\trepo: {repo}\n\tcommentId: {comment_id}");
        log::debug!(target: LOG_TARGET, "Deleting comment {comment_id} on {owner}/{repo}");

        let url = format!("{}/issues/comments/{comment_id}", self.repo_url(owner, repo));
        let response = self.client.delete(&url).send().await.into_app_err_with(failure)?;

        check_status(&response, StatusCode::NO_CONTENT, failure)
    }

    async fn create_check_run(&self, owner: &str, repo: &str, check_run: &NewCheckRun) -> Result<()> {
        let head_sha = &check_run.head_sha;
        let failure = || format!("Failed to create the check run for:\n\towner: {owner}\n\trepo: {repo}\n\theadSha: {head_sha}");
        log::debug!(target: LOG_TARGET, "Creating check run '{}' on {owner}/{repo} at {head_sha}", check_run.name);

        let url = format!("{}/check-runs", self.repo_url(owner, repo));
        let response = self.client.post(&url).json(check_run).send().await.into_app_err_with(failure)?;

        check_status(&response, StatusCode::CREATED, failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_issue_comment_deserialize() {
        let json = r#"[
            { "id": 1, "body": "<!-- marker -->\n\nhello", "user": { "login": "bot" } },
            { "id": 2, "body": null },
            { "id": 3 }
        ]"#;

        let comments: Vec<IssueComment> = serde_json::from_str(json).unwrap();
        assert_eq!(comments.len(), 3);
        assert_eq!(comments[0].body.as_deref(), Some("<!-- marker -->\n\nhello"));
        assert_eq!(comments[1].body, None);
        assert_eq!(comments[2].body, None);
    }

    #[test]
    fn test_check_run_serialize() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let check_run = NewCheckRun {
            name: "Dotnet Outdated".into(),
            head_sha: "abc".into(),
            status: CheckRunStatus::Completed,
            conclusion: CheckConclusion::Failure,
            started_at: at,
            completed_at: at,
            output: CheckRunOutput {
                title: "Dotnet Outdated".into(),
                summary: "summary".into(),
                text: "text".into(),
            },
        };

        let value = serde_json::to_value(&check_run).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["conclusion"], "failure");
        assert_eq!(value["head_sha"], "abc");
        assert_eq!(value["started_at"], "2024-01-15T10:30:00Z");
        assert_eq!(value["output"]["title"], "Dotnet Outdated");
        assert_eq!(value["output"]["text"], "text");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CheckRunStatus::Completed.to_string(), "completed");
        assert_eq!(CheckConclusion::Success.to_string(), "success");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = GitHubClient::new(Some("secret"), "http://localhost:1234/").unwrap();
        assert_eq!(client.repo_url("octo", "widgets"), "http://localhost:1234/repos/octo/widgets");
    }
}
