use super::error::FetchError;
use super::report::Report;
use crate::config::FetchOptions;
use camino::Utf8Path;
use std::process::Stdio;
use tokio::process::Command;

const LOG_TARGET: &str = "    dotnet";

/// Captured result of one process invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Arguments for `dotnet list [target] package --outdated ...`.
///
/// Order is fixed and options that are off or empty contribute no tokens at all.
#[must_use]
pub fn build_arguments(options: &FetchOptions) -> Vec<String> {
    let mut args = vec!["list".to_owned()];

    if let Some(target) = options.target.as_deref().filter(|t| !t.is_empty()) {
        args.push(target.to_owned());
    }

    args.extend(["package", "--outdated"].map(String::from));

    let flags = [
        (options.include_transitive, "--include-transitive"),
        (options.include_prerelease, "--include-prerelease"),
        (options.highest_minor, "--highest-minor"),
        (options.highest_patch, "--highest-patch"),
    ];
    args.extend(flags.into_iter().filter(|(on, _)| *on).map(|(_, flag)| flag.to_owned()));

    for source in options.sources.iter().filter(|s| !s.is_empty()) {
        args.extend(["--source".to_owned(), source.clone()]);
    }

    if let Some(config) = options.config_file.as_deref().filter(|c| !c.is_empty()) {
        args.extend(["--config".to_owned(), config.to_owned()]);
    }

    for framework in options.frameworks.iter().filter(|f| !f.is_empty()) {
        args.extend(["--framework".to_owned(), framework.clone()]);
    }

    args.extend(["--format", "json", "--verbosity", "q"].map(String::from));
    args
}

/// Turn captured process output into a report or a classified failure.
pub fn interpret_output(program: &str, output: &CommandOutput) -> Result<Report, FetchError> {
    if output.exit_code == Some(0) {
        return serde_json::from_str(&output.stdout).map_err(|source| FetchError::InvalidOutput {
            program: program.to_owned(),
            source,
        });
    }

    // The SDK has moved its structured problem list between streams, so look in both
    for stream in [&output.stderr, &output.stdout] {
        if let Ok(report) = serde_json::from_str::<Report>(stream)
            && let Some(problem) = report.problems.first()
        {
            return Err(FetchError::from_problem(problem));
        }
    }

    let message = if output.stderr.trim().is_empty() {
        match output.exit_code {
            Some(code) => format!("'{program}' exited with status code {code}"),
            None => format!("'{program}' was terminated by a signal"),
        }
    } else {
        output.stderr.trim_end().to_owned()
    };

    Err(FetchError::CommandExecution(message))
}

/// Run the listing command and parse its report.
pub async fn list_outdated_packages(
    program: &str,
    working_directory: Option<&Utf8Path>,
    options: &FetchOptions,
) -> Result<Report, FetchError> {
    log::info!(target: LOG_TARGET, "Determining outdated packages...");

    let args = build_arguments(options);
    let command_line = format!("{program} {}", args.join(" "));
    log::debug!(target: LOG_TARGET, "Going to execute \"{command_line}\"");

    let mut cmd = Command::new(program);
    _ = cmd.args(&args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = working_directory {
        _ = cmd.current_dir(dir);
    }

    let output: CommandOutput = cmd
        .output()
        .await
        .map_err(|source| FetchError::Spawn {
            program: program.to_owned(),
            source,
        })?
        .into();

    log::debug!(target: LOG_TARGET, "Executed \"{command_line}\" and the status code is {:?}", output.exit_code);
    if output.exit_code == Some(0) {
        log::debug!(target: LOG_TARGET, "Executed \"{command_line}\" and the output is {}", output.stdout);
    } else {
        log::debug!(target: LOG_TARGET, "Executed \"{command_line}\" and the output is {}", output.stderr);
    }

    interpret_output(program, &output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(exit_code: i32, stdout: &str, stderr: &str) -> CommandOutput {
        CommandOutput {
            exit_code: Some(exit_code),
            stdout: stdout.to_owned(),
            stderr: stderr.to_owned(),
        }
    }

    #[test]
    fn test_build_arguments_minimal() {
        let args = build_arguments(&FetchOptions::default());
        assert_eq!(args, vec!["list", "package", "--outdated", "--format", "json", "--verbosity", "q"]);
    }

    #[test]
    fn test_build_arguments_all_options() {
        let options = FetchOptions {
            target: Some("target".into()),
            include_transitive: true,
            include_prerelease: true,
            highest_minor: true,
            highest_patch: true,
            sources: vec!["source1".into(), "source2".into()],
            config_file: Some("nuget.config".into()),
            frameworks: vec!["net5.0".into(), "net6.0".into()],
        };

        assert_eq!(
            build_arguments(&options),
            vec![
                "list",
                "target",
                "package",
                "--outdated",
                "--include-transitive",
                "--include-prerelease",
                "--highest-minor",
                "--highest-patch",
                "--source",
                "source1",
                "--source",
                "source2",
                "--config",
                "nuget.config",
                "--framework",
                "net5.0",
                "--framework",
                "net6.0",
                "--format",
                "json",
                "--verbosity",
                "q",
            ]
        );
    }

    #[test]
    fn test_build_arguments_skips_empty_values() {
        let options = FetchOptions {
            target: Some(String::new()),
            config_file: Some(String::new()),
            sources: vec![String::new()],
            frameworks: vec![String::new(), "net8.0".into()],
            highest_patch: true,
            ..FetchOptions::default()
        };

        assert_eq!(
            build_arguments(&options),
            vec!["list", "package", "--outdated", "--highest-patch", "--framework", "net8.0", "--format", "json", "--verbosity", "q"]
        );
    }

    #[test]
    fn test_interpret_success() {
        let stdout = r#"{"version":1,"parameters":"--outdated","sources":[],"projects":[{"path":"/p/App.csproj"}]}"#;
        let report = interpret_output("dotnet", &output(0, stdout, "")).unwrap();
        assert_eq!(report.projects.len(), 1);
        assert_eq!(report.projects[0].path, "/p/App.csproj");
    }

    #[test]
    fn test_interpret_success_with_garbage() {
        let err = interpret_output("dotnet", &output(0, "not json", "")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidOutput { .. }));
    }

    #[test]
    fn test_interpret_structured_problem() {
        let stderr = r#"{"version":1,"parameters":"","problems":[{"project":"/a/b/Project.A.csproj","level":"error","text":"No assets file was found for `/a/b/Project.A.csproj`. Please run restore."}],"projects":[]}"#;

        match interpret_output("dotnet", &output(1, "", stderr)).unwrap_err() {
            FetchError::CommandProblem { project_name, message } => {
                assert_eq!(project_name, "Project.A");
                assert_eq!(message, "No assets file was found for `Project.A`. Please run restore.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interpret_structured_problem_on_stdout() {
        let stdout = r#"{"problems":[{"project":"/src/Api.csproj","level":"error","text":"broken /src/Api.csproj"}]}"#;
        let err = interpret_output("dotnet", &output(1, stdout, "")).unwrap_err();
        assert_eq!(err.to_string(), "broken Api");
    }

    #[test]
    fn test_interpret_unstructured_failure() {
        let err = interpret_output("dotnet", &output(1, "", "MSBUILD : error MSB1009: Project file does not exist.")).unwrap_err();
        match err {
            FetchError::CommandExecution(text) => assert_eq!(text, "MSBUILD : error MSB1009: Project file does not exist."),
            other => panic!("unexpected error: {other:?}"),
        }

        match interpret_output("dotnet", &output(1, "", "error: MSB1003\r\n")).unwrap_err() {
            FetchError::CommandExecution(text) => assert_eq!(text, "error: MSB1003"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interpret_json_without_problems_is_unstructured() {
        let stderr = r#"{"version":1,"projects":[]}"#;
        let err = interpret_output("dotnet", &output(1, "", stderr)).unwrap_err();
        assert!(matches!(err, FetchError::CommandExecution(_)));
    }

    #[test]
    fn test_interpret_failure_without_stderr() {
        let err = interpret_output("dotnet", &output(3, "", "")).unwrap_err();
        assert_eq!(err.to_string(), "'dotnet' exited with status code 3");
    }
}
