use super::client::{CheckConclusion, CheckRunOutput, CheckRunStatus, Forge, IssueComment, NewCheckRun};
use super::context::{ContextError, RunContext};
use crate::Result;
use crate::config::{CheckRunOptions, CommentOptions, InvalidInputError};
use chrono::Utc;
use ohno::app_err;

const LOG_TARGET: &str = " publisher";

/// Hidden first line that identifies the comment owned by a given key.
#[must_use]
pub fn comment_marker(key: &str) -> String {
    format!("<!-- dotnet-outdated-comment:{key} -->")
}

/// What to do with the pull request comment so that it reflects the latest report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentAction {
    Create { body: String },
    Update { comment_id: u64, body: String },
    Delete { comment_id: u64 },
    Nothing,
}

/// Decide how to converge the comments of a pull request on `body`.
///
/// The owned comment is the first one whose body starts with `marker`; comments from
/// other tools or other keys are left alone.
#[must_use]
pub fn plan_comment_action(comments: &[IssueComment], marker: &str, body: Option<&str>) -> CommentAction {
    let existing = comments
        .iter()
        .find(|c| c.body.as_deref().is_some_and(|b| b.starts_with(marker)))
        .map(|c| c.id);

    match (existing, body) {
        (Some(comment_id), None) => CommentAction::Delete { comment_id },
        (Some(comment_id), Some(body)) => CommentAction::Update {
            comment_id,
            body: format!("{marker}\n\n{body}"),
        },
        (None, Some(body)) => CommentAction::Create {
            body: format!("{marker}\n\n{body}"),
        },
        (None, None) => CommentAction::Nothing,
    }
}

/// Publishes results as a check run and a pull request comment.
///
/// Both operations only ever log their failures; publishing must not fail the run.
#[derive(Debug)]
pub struct Publisher<F> {
    forge: F,
    context: Result<RunContext, ContextError>,
    check_run: Result<CheckRunOptions, InvalidInputError>,
    comment: Result<CommentOptions, InvalidInputError>,
}

impl<F: Forge> Publisher<F> {
    #[must_use]
    pub const fn new(
        forge: F,
        context: Result<RunContext, ContextError>,
        check_run: Result<CheckRunOptions, InvalidInputError>,
        comment: Result<CommentOptions, InvalidInputError>,
    ) -> Self {
        Self {
            forge,
            context,
            check_run,
            comment,
        }
    }

    /// Attach a completed check run with both views to the head commit.
    ///
    /// The conclusion is a failure only when there are outdated top-level packages and
    /// the configuration asks for failing on them.
    pub async fn create_check_run(&self, summary: &str, detailed: &str, has_outdated: bool) {
        if let Err(e) = self.try_create_check_run(summary, detailed, has_outdated).await {
            log::error!(target: LOG_TARGET, "{e}");
        }
    }

    /// Create, update or delete this run's pull request comment.
    ///
    /// `None` means there is nothing to report, which removes a previously posted comment.
    pub async fn add_comment(&self, body: Option<&str>) {
        if let Err(e) = self.try_add_comment(body).await {
            log::error!(target: LOG_TARGET, "{e}");
        }
    }

    fn context(&self) -> Result<&RunContext> {
        self.context.as_ref().map_err(|e| app_err!("{e}"))
    }

    async fn try_create_check_run(&self, summary: &str, detailed: &str, has_outdated: bool) -> Result<()> {
        let options = self.check_run.as_ref().map_err(Clone::clone)?;
        if !options.enabled {
            log::debug!(target: LOG_TARGET, "Check run is disabled");
            return Ok(());
        }

        let context = self.context()?;
        log::debug!(target: LOG_TARGET, "owner: {}", context.owner);
        log::debug!(target: LOG_TARGET, "repo: {}", context.repo);
        log::debug!(target: LOG_TARGET, "name: {}", options.name);

        let head_sha = context.head_sha();
        log::debug!(target: LOG_TARGET, "headSha: {head_sha}");

        let status = CheckRunStatus::Completed;
        log::debug!(target: LOG_TARGET, "status: {status}");

        let conclusion = if has_outdated && options.fail_if_outdated {
            CheckConclusion::Failure
        } else {
            CheckConclusion::Success
        };
        log::debug!(target: LOG_TARGET, "conclusion: {conclusion}");

        let now = Utc::now();
        let check_run = NewCheckRun {
            name: options.name.clone(),
            head_sha: head_sha.to_owned(),
            status,
            conclusion,
            started_at: now,
            completed_at: now,
            output: CheckRunOutput {
                title: options.name.clone(),
                summary: summary.to_owned(),
                text: detailed.to_owned(),
            },
        };

        self.forge.create_check_run(&context.owner, &context.repo, &check_run).await?;
        log::debug!(target: LOG_TARGET, "Check run created successfully");
        Ok(())
    }

    async fn try_add_comment(&self, body: Option<&str>) -> Result<()> {
        let options = self.comment.as_ref().map_err(Clone::clone)?;
        if !options.enabled {
            log::debug!(target: LOG_TARGET, "PR comment is disabled");
            return Ok(());
        }

        let context = self.context()?;
        let Some(pull_request) = &context.pull_request else {
            log::warn!(target: LOG_TARGET, "This action cannot add a comment as the run is not for a PR");
            return Ok(());
        };

        let (owner, repo) = (context.owner.as_str(), context.repo.as_str());
        log::debug!(target: LOG_TARGET, "owner: {owner}");
        log::debug!(target: LOG_TARGET, "repo: {repo}");
        log::debug!(target: LOG_TARGET, "issueNumber: {}", pull_request.number);

        let key = options.key.as_deref().unwrap_or(&pull_request.head_ref);
        log::debug!(target: LOG_TARGET, "key: {key}");

        let marker = comment_marker(key);
        log::debug!(target: LOG_TARGET, "marker: {marker}");

        let comments = self.forge.list_comments(owner, repo, pull_request.number).await?;

        match plan_comment_action(&comments, &marker, body) {
            CommentAction::Create { body } => {
                self.forge.create_comment(owner, repo, pull_request.number, &body).await?;
                log::debug!(target: LOG_TARGET, "Comment added successfully");
            }
            CommentAction::Update { comment_id, body } => {
                log::debug!(target: LOG_TARGET, "commentId: {comment_id}");
                self.forge.update_comment(owner, repo, comment_id, &body).await?;
                log::debug!(target: LOG_TARGET, "Comment updated successfully");
            }
            CommentAction::Delete { comment_id } => {
                log::debug!(target: LOG_TARGET, "commentId: {comment_id}");
                self.forge.delete_comment(owner, repo, comment_id).await?;
                log::debug!(target: LOG_TARGET, "Comment deleted successfully");
            }
            CommentAction::Nothing => {
                log::debug!(target: LOG_TARGET, "Comment is null or empty, no action taken");
            }
        }

        Ok(())
    }
}
