use camino::Utf8PathBuf;
use serde::Deserialize;
use thiserror::Error;

const LOG_TARGET: &str = "    github";

/// Why the workflow run context could not be determined.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("the '{0}' environment variable is not set")]
    MissingVariable(&'static str),

    #[error("'{0}' is not a repository in the 'owner/repo' form")]
    InvalidRepository(String),

    #[error("unable to read the event payload at '{path}'")]
    ReadEvent {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse the event payload at '{path}'")]
    ParseEvent {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The pull request that triggered the workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub head_sha: String,
    pub head_ref: String,
}

/// Repository, commit and pull request the workflow run is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub pull_request: Option<PullRequest>,
}

#[derive(Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
    head: HeadPayload,
}

#[derive(Deserialize)]
struct HeadPayload {
    sha: String,
    #[serde(rename = "ref")]
    git_ref: String,
}

impl RunContext {
    /// Read the context from the variables the Actions runner sets.
    pub fn from_env() -> Result<Self, ContextError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the context through an arbitrary variable lookup.
    ///
    /// A missing `GITHUB_EVENT_PATH` means the run is not for a pull request.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ContextError> {
        let repository = lookup("GITHUB_REPOSITORY")
            .filter(|r| !r.is_empty())
            .ok_or(ContextError::MissingVariable("GITHUB_REPOSITORY"))?;

        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
            .ok_or_else(|| ContextError::InvalidRepository(repository.clone()))?;

        let sha = lookup("GITHUB_SHA").ok_or(ContextError::MissingVariable("GITHUB_SHA"))?;

        let pull_request = match lookup("GITHUB_EVENT_PATH").filter(|p| !p.is_empty()) {
            Some(path) => read_pull_request(Utf8PathBuf::from(path))?,
            None => None,
        };

        log::debug!(target: LOG_TARGET, "Run context is {owner}/{repo} at {sha}, pull request {pull_request:?}");

        Ok(Self {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
            sha,
            pull_request,
        })
    }

    /// Commit to attach results to: the PR head when there is one, the triggering commit otherwise.
    #[must_use]
    pub fn head_sha(&self) -> &str {
        self.pull_request.as_ref().map_or(&self.sha, |pr| &pr.head_sha)
    }
}

fn read_pull_request(path: Utf8PathBuf) -> Result<Option<PullRequest>, ContextError> {
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(source) => return Err(ContextError::ReadEvent { path, source }),
    };

    let payload: EventPayload = match serde_json::from_str(&text) {
        Ok(payload) => payload,
        Err(source) => return Err(ContextError::ParseEvent { path, source }),
    };

    Ok(payload.pull_request.map(|pr| PullRequest {
        number: pr.number,
        head_sha: pr.head.sha,
        head_ref: pr.head.git_ref,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        move |name| map.get(name).cloned()
    }

    fn event_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_push_event_without_payload() {
        let context = RunContext::from_lookup(lookup(&[("GITHUB_REPOSITORY", "octo/widgets"), ("GITHUB_SHA", "abc123")])).unwrap();

        assert_eq!(context.owner, "octo");
        assert_eq!(context.repo, "widgets");
        assert_eq!(context.pull_request, None);
        assert_eq!(context.head_sha(), "abc123");
    }

    #[test]
    fn test_pull_request_event() {
        let file = event_file(r#"{"action":"opened","pull_request":{"number":42,"head":{"sha":"def456","ref":"feature/deps"}}}"#);
        let path = file.path().to_str().unwrap();

        let context = RunContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_SHA", "merge789"),
            ("GITHUB_EVENT_PATH", path),
        ]))
        .unwrap();

        assert_eq!(
            context.pull_request,
            Some(PullRequest {
                number: 42,
                head_sha: "def456".into(),
                head_ref: "feature/deps".into(),
            })
        );
        assert_eq!(context.head_sha(), "def456");
    }

    #[test]
    fn test_non_pull_request_event_payload() {
        let file = event_file(r#"{"ref":"refs/heads/main","after":"abc"}"#);
        let path = file.path().to_str().unwrap();

        let context = RunContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_SHA", "abc"),
            ("GITHUB_EVENT_PATH", path),
        ]))
        .unwrap();

        assert!(context.pull_request.is_none());
    }

    #[test]
    fn test_missing_repository() {
        let err = RunContext::from_lookup(lookup(&[("GITHUB_SHA", "abc")])).unwrap_err();
        assert!(matches!(err, ContextError::MissingVariable("GITHUB_REPOSITORY")));
    }

    #[test]
    fn test_invalid_repository() {
        let err = RunContext::from_lookup(lookup(&[("GITHUB_REPOSITORY", "widgets"), ("GITHUB_SHA", "abc")])).unwrap_err();
        assert_eq!(err.to_string(), "'widgets' is not a repository in the 'owner/repo' form");
    }

    #[test]
    fn test_unreadable_and_malformed_payload() {
        let err = RunContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_SHA", "abc"),
            ("GITHUB_EVENT_PATH", "/definitely/not/here.json"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ContextError::ReadEvent { .. }));

        let file = event_file("{ not json");
        let err = RunContext::from_lookup(lookup(&[
            ("GITHUB_REPOSITORY", "octo/widgets"),
            ("GITHUB_SHA", "abc"),
            ("GITHUB_EVENT_PATH", file.path().to_str().unwrap()),
        ]))
        .unwrap_err();
        assert!(matches!(err, ContextError::ParseEvent { .. }));
    }
}
