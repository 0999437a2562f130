//! Markdown views of the outdated package report
//!
//! Two generators are provided, each accessed through a `generate` function writing
//! into any `core::fmt::Write` sink, plus a convenience wrapper returning a `String`:
//! - **Detailed**: one table per project and framework, listing every outdated
//!   package with its requested, resolved and latest versions and a color-coded
//!   severity, followed by a legend
//! - **Summary**: one row per project and dependency type with the number of
//!   distinct outdated packages
//!
//! Both produce [`UP_TO_DATE_MESSAGE`] when there is nothing to show, so callers
//! never publish an empty document.
//!
//! Severity comes from [`classify`], which compares two version strings using
//! semantic-version rules after coercing non-semver NuGet versions.

mod common;
mod detailed;
mod summary;
mod version_diff;

pub use common::{DependencyType, UP_TO_DATE_MESSAGE};
pub use detailed::{detailed_view, generate as generate_detailed};
pub use summary::{generate as generate_summary, summary_view};
pub use version_diff::{VersionDifference, classify};
