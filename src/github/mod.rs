//! Publishing results to GitHub
//!
//! [`RunContext`] describes the repository, commit and pull request of the current
//! workflow run. [`Publisher`] turns the rendered views into a check run and a single
//! pull request comment per key, going through the [`Forge`] trait so the REST calls
//! made by [`GitHubClient`] can be replaced in tests.
//!
//! The comment is found again on later runs through a hidden marker line
//! ([`comment_marker`]), which makes publishing idempotent: it is created once, then
//! updated in place, and deleted when there is nothing left to report.

mod client;
mod context;
mod publisher;

pub use client::{
    CheckConclusion, CheckRunOutput, CheckRunStatus, DEFAULT_API_URL, Forge, GitHubClient, IssueComment, NewCheckRun,
};
pub use context::{ContextError, PullRequest, RunContext};
pub use publisher::{CommentAction, Publisher, comment_marker, plan_comment_action};
