use super::inputs::{Inputs, InvalidInputError};

/// Check run title used when `check-run-name` is not supplied.
pub const DEFAULT_CHECK_RUN_NAME: &str = "Dotnet Outdated";

const TARGET: &str = "target";
const INCLUDE_TRANSITIVE: &str = "include-transitive-dependencies";
const INCLUDE_PRERELEASE: &str = "include-prerelease-dependencies";
const HIGHEST_MINOR: &str = "include-highest-minor-only";
const HIGHEST_PATCH: &str = "include-highest-patch-only";
const NUGET_SOURCES: &str = "nuget-sources";
const NUGET_CONFIG: &str = "nuget-config-file-path";
const FRAMEWORKS: &str = "frameworks";
const ADD_CHECK_RUN: &str = "add-check-run";
const FAIL_CHECK_RUN: &str = "fail-check-run-if-contains-outdated";
const CHECK_RUN_NAME: &str = "check-run-name";
const ADD_PR_COMMENT: &str = "add-pr-comment";
const COMMENT_KEY: &str = "comment-key";

/// Options that shape the `dotnet list package --outdated` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Project or solution to inspect; the working directory when absent
    pub target: Option<String>,
    pub include_transitive: bool,
    pub include_prerelease: bool,
    pub highest_minor: bool,
    pub highest_patch: bool,
    pub sources: Vec<String>,
    pub config_file: Option<String>,
    pub frameworks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunOptions {
    pub enabled: bool,
    pub fail_if_outdated: bool,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentOptions {
    pub enabled: bool,

    /// Distinguishes comments from several workflows on one pull request; the head ref when absent
    pub key: Option<String>,
}

/// Typed configuration, read once from the action inputs.
///
/// Publishing options are kept as results: a bad publishing input must only
/// disable the operation that needs it, never the whole run.
#[derive(Debug, Clone)]
pub struct Config {
    pub fetch: FetchOptions,
    pub check_run: Result<CheckRunOptions, InvalidInputError>,
    pub comment: Result<CommentOptions, InvalidInputError>,
}

impl Config {
    /// Read every input.
    ///
    /// # Errors
    ///
    /// Returns an error if an input that drives the listing command is invalid
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, InvalidInputError> {
        Ok(Self {
            fetch: FetchOptions::from_inputs(inputs)?,
            check_run: CheckRunOptions::from_inputs(inputs),
            comment: CommentOptions::from_inputs(inputs),
        })
    }
}

impl FetchOptions {
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, InvalidInputError> {
        Ok(Self {
            target: inputs.get_string(TARGET),
            include_transitive: inputs.get_bool(INCLUDE_TRANSITIVE, false)?,
            include_prerelease: inputs.get_bool(INCLUDE_PRERELEASE, false)?,
            highest_minor: inputs.get_bool(HIGHEST_MINOR, false)?,
            highest_patch: inputs.get_bool(HIGHEST_PATCH, false)?,
            sources: inputs.get_string_list(NUGET_SOURCES),
            config_file: inputs.get_string(NUGET_CONFIG),
            frameworks: inputs.get_string_list(FRAMEWORKS),
        })
    }
}

impl CheckRunOptions {
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, InvalidInputError> {
        let enabled = inputs.get_bool(ADD_CHECK_RUN, false)?;

        // Nothing else matters once check runs are off
        if !enabled {
            return Ok(Self::disabled());
        }

        Ok(Self {
            enabled,
            fail_if_outdated: inputs.get_bool(FAIL_CHECK_RUN, false)?,
            name: inputs
                .get_string(CHECK_RUN_NAME)
                .unwrap_or_else(|| DEFAULT_CHECK_RUN_NAME.to_owned()),
        })
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            fail_if_outdated: false,
            name: DEFAULT_CHECK_RUN_NAME.to_owned(),
        }
    }
}

impl CommentOptions {
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, InvalidInputError> {
        Ok(Self {
            enabled: inputs.get_bool(ADD_PR_COMMENT, false)?,
            key: inputs.get_string(COMMENT_KEY),
        })
    }
}
