use super::common::{DependencyType, UP_TO_DATE_MESSAGE};
use crate::Result;
use crate::dotnet::{Project, Report};
use core::fmt::Write;
use core::hash::Hash;
use std::collections::HashSet;

const LOG_TARGET: &str = "   reports";

/// Packages counted once per project even when several frameworks list the same entry.
fn distinct_count<T: Eq + Hash>(packages: impl Iterator<Item = T>) -> usize {
    packages.collect::<HashSet<_>>().len()
}

fn counts(project: &Project) -> [(DependencyType, usize); 2] {
    [
        (
            DependencyType::TopLevel,
            distinct_count(project.frameworks.iter().flat_map(|f| &f.top_level_packages)),
        ),
        (
            DependencyType::Transitive,
            distinct_count(project.frameworks.iter().flat_map(|f| &f.transitive_packages)),
        ),
    ]
}

/// Write a table with the number of outdated packages per project and dependency type.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let rows: Vec<(&str, DependencyType, usize)> = report
        .projects
        .iter()
        .filter(|p| !p.frameworks.is_empty())
        .flat_map(|p| counts(p).map(|(kind, count)| (p.name(), kind, count)))
        .filter(|(_, _, count)| *count > 0)
        .collect();

    if rows.is_empty() {
        write!(writer, "{UP_TO_DATE_MESSAGE}")?;
        return Ok(());
    }

    writeln!(writer, "| Project Name | Type | Count |")?;
    writeln!(writer, "|----|----|---:|")?;
    for (name, kind, count) in rows {
        writeln!(writer, "| {name} | {kind} | {count} |")?;
    }

    Ok(())
}

/// Short markdown table suitable for a check run summary.
pub fn summary_view(report: &Report) -> Result<String> {
    log::info!(target: LOG_TARGET, "Generating summary view...");

    let mut markdown = String::new();
    generate(report, &mut markdown)?;

    log::debug!(target: LOG_TARGET, "Generated summary view {markdown}");
    Ok(markdown)
}
