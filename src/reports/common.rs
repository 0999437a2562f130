//! Common utilities shared across report generators.

use super::version_diff::VersionDifference;
use core::cmp::Ordering;
use strum::Display;

/// Text produced by every view when there is nothing to report.
pub const UP_TO_DATE_MESSAGE: &str = "All packages are up-to-date with the latest versions";

/// Whether a package is referenced directly by a project or pulled in by another package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DependencyType {
    #[strum(to_string = "Top Level")]
    TopLevel,
    Transitive,
}

/// Order package ids case-insensitively, lowercase first when ids differ only by case.
pub fn compare_ids(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| right.cmp(left))
}

/// Markdown color used for the latest version cell.
pub const fn color(difference: VersionDifference) -> &'static str {
    match difference {
        VersionDifference::Major | VersionDifference::Premajor => "red",
        VersionDifference::Minor | VersionDifference::Preminor => "yellow",
        VersionDifference::Patch | VersionDifference::Prepatch | VersionDifference::Prerelease | VersionDifference::Build => {
            "green"
        }
    }
}

/// Render a version as colored LaTeX math text, or plain when there is no difference.
pub fn format_version(version: &str, difference: Option<VersionDifference>) -> String {
    match difference {
        Some(difference) => {
            let color = color(difference);
            format!("$\\textcolor{{{color}}}{{\\textsf{{{version}}}}}$")
        }
        None => version.to_owned(),
    }
}
