//! Report outdated NuGet packages on GitHub pull requests.
//!
//! # Overview
//!
//! `dotnet-outdated` runs `dotnet list package --outdated` for a .NET project or solution
//! and publishes the result to GitHub as a check run and as a pull request comment. It is
//! meant to run as a step of a GitHub Actions workflow.
//!
//! # Configuration
//!
//! Step inputs arrive as `INPUT_*` environment variables:
//!
//! ```yaml
//! - run: dotnet-outdated
//!   env:
//!     GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
//!     INPUT_INCLUDE-TRANSITIVE-DEPENDENCIES: "true"
//!     INPUT_ADD-CHECK-RUN: "true"
//!     INPUT_FAIL-CHECK-RUN-IF-CONTAINS-OUTDATED: "true"
//!     INPUT_ADD-PR-COMMENT: "true"
//! ```
//!
//! | Input | Default | Meaning |
//! |---|---|---|
//! | `target` | | Project or solution to inspect |
//! | `include-transitive-dependencies` | `false` | Also list transitive packages |
//! | `include-prerelease-dependencies` | `false` | Consider prerelease versions |
//! | `include-highest-minor-only` | `false` | Only consider versions with the same major |
//! | `include-highest-patch-only` | `false` | Only consider versions with the same major and minor |
//! | `nuget-sources` | | Comma-separated package sources |
//! | `nuget-config-file-path` | | NuGet configuration file |
//! | `frameworks` | | Comma-separated target frameworks |
//! | `add-check-run` | `false` | Create a check run with the results |
//! | `fail-check-run-if-contains-outdated` | `false` | Fail the check run on outdated top-level packages |
//! | `check-run-name` | `Dotnet Outdated` | Name and title of the check run |
//! | `add-pr-comment` | `false` | Keep a pull request comment up to date with the results |
//! | `comment-key` | PR branch | Distinguishes comments from several workflows |
//!
//! Run `dotnet-outdated --help` for the command-line options.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use dotnet_outdated::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host that talks to the real process.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
