use super::report::{Problem, project_name};
use thiserror::Error;

/// Ways in which retrieving the outdated package report can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The command could not be started at all
    #[error("unable to execute '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The command failed without a structured explanation; carries the raw error text
    #[error("{0}")]
    CommandExecution(String),

    /// The command reported a problem for a specific project
    #[error("{message}")]
    CommandProblem { project_name: String, message: String },

    /// The command succeeded but its output is not a report
    #[error("unable to parse the output of '{program}'")]
    InvalidOutput {
        program: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Build a [`FetchError::CommandProblem`], redacting the project path down to its name.
    #[must_use]
    pub fn from_problem(problem: &Problem) -> Self {
        let project_name = project_name(&problem.project).to_owned();
        let message = if problem.project.is_empty() {
            problem.text.clone()
        } else {
            problem.text.replace(&problem.project, &project_name)
        };

        Self::CommandProblem { project_name, message }
    }
}
