//! Retrieval of the outdated package report from the .NET SDK
//!
//! The SDK's `dotnet list package --outdated --format json` command is treated as a
//! black box: [`build_arguments`] turns [`FetchOptions`](crate::config::FetchOptions)
//! into its command line, [`list_outdated_packages`] runs it, and
//! [`interpret_output`] classifies what came back.
//!
//! A zero exit code yields a [`Report`]. A non-zero exit code whose output still parses
//! as a report with `problems` becomes [`FetchError::CommandProblem`], naming the
//! offending project by file name only. Anything else is
//! [`FetchError::CommandExecution`] carrying the raw error text.

mod command;
mod error;
mod report;

pub use command::{CommandOutput, build_arguments, interpret_output, list_outdated_packages};
pub use error::FetchError;
pub use report::{FrameworkReport, PackageInfo, Problem, Project, Report, project_name};
