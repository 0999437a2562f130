//! Command-line entry point and orchestration for dotnet-outdated

use super::Host;
use crate::Result;
use crate::config::{Config, Inputs, InvalidInputError};
use crate::dotnet::FetchError;
use crate::github::{ContextError, DEFAULT_API_URL, GitHubClient, Publisher, RunContext};
use crate::{dotnet, reports};
use camino::Utf8PathBuf;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, ValueEnum};
use std::io::Write;
use thiserror::Error;

const LOG_TARGET: &str = "       run";

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

#[derive(Parser, Debug)]
#[command(name = "dotnet-outdated", author, version, long_about = None)]
#[command(about = "Report outdated NuGet packages as a GitHub check run and pull request comment")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LogLevel,

    /// The .NET SDK executable used to list packages
    #[arg(long, value_name = "PATH", default_value = "dotnet")]
    dotnet: String,

    /// Directory the listing command runs in
    #[arg(long, value_name = "PATH")]
    working_directory: Option<Utf8PathBuf>,

    /// Token used to publish the check run and the pull request comment
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    github_api_url: String,
}

/// Failures that end a run, reported to the workflow by their message alone.
#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InvalidInputError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unable to render the outdated package report")]
    Render,
}

/// Everything read from the workflow step besides the command line.
#[derive(Debug)]
pub struct Environment {
    pub inputs: Inputs,
    pub context: Result<RunContext, ContextError>,
}

impl Environment {
    /// Read the `INPUT_*` and `GITHUB_*` variables of the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            inputs: Inputs::from_env(),
            context: RunContext::from_env(),
        }
    }
}

/// Parse command-line arguments and run one pass against the current process environment
///
/// # Errors
///
/// Failures of the run itself are reported to the host as a workflow error and an exit
/// code of 1 rather than returned
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    run_in(host, args, Environment::from_process()).await
}

/// Same as [`run`], with the step environment supplied by the caller
///
/// # Errors
///
/// Failures of the run itself are reported to the host as a workflow error and an exit
/// code of 1 rather than returned
pub async fn run_in<I, T, H>(host: &mut H, args: I, environment: Environment) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    if let Err(e) = execute(&cli, environment).await {
        log::debug!(target: LOG_TARGET, "Run failed: {e:#}");
        writeln!(host.output(), "::error::{}", escape_workflow_data(&e.to_string()))?;
        host.exit(1);
    }

    Ok(())
}

async fn execute(cli: &Cli, environment: Environment) -> Result<(), RunError> {
    let config = Config::from_inputs(&environment.inputs)?;

    let report = dotnet::list_outdated_packages(&cli.dotnet, cli.working_directory.as_deref(), &config.fetch).await?;
    let has_outdated = report.has_outdated_top_level_packages();
    log::debug!(target: LOG_TARGET, "Outdated top-level packages found: {has_outdated}");

    let (summary, detailed) = render(&report).map_err(|e| {
        log::debug!(target: LOG_TARGET, "Rendering failed: {e:#}");
        RunError::Render
    })?;

    // An absent body removes the comment left by an earlier run
    let has_entries = report.projects.iter().any(|p| !p.frameworks.is_empty());
    let comment_body = has_entries.then_some(detailed.as_str());

    match GitHubClient::new(cli.github_token.as_deref(), cli.github_api_url.as_str()) {
        Ok(client) => {
            let publisher = Publisher::new(client, environment.context, config.check_run, config.comment);
            publisher.create_check_run(&summary, &detailed, has_outdated).await;
            publisher.add_comment(comment_body).await;
        }
        Err(e) => log::error!(target: LOG_TARGET, "Unable to create the GitHub client, nothing will be published: {e}"),
    }

    Ok(())
}

fn render(report: &dotnet::Report) -> Result<(String, String)> {
    Ok((reports::summary_view(report)?, reports::detailed_view(report)?))
}

/// Escape a message so that it survives as the data part of a workflow command.
fn escape_workflow_data(message: &str) -> String {
    message.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when running more than once in a process
    _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
