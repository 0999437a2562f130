use super::common::{self, DependencyType, UP_TO_DATE_MESSAGE};
use super::version_diff::{self, VersionDifference};
use crate::Result;
use crate::dotnet::{FrameworkReport, PackageInfo, Report};
use core::fmt::Write;

const LOG_TARGET: &str = "   reports";

const TABLE_HEADER: &str = "| Package name | Type | Request version | Resolved version | Latest version | Severity |\n|---|---|---:|---:|---:|---:|\n";

const LEGEND: &str = "> __Note__\n\
>\n\
> 🔴: Major version update or pre-release version. Possible breaking changes.\n\
>\n\
> 🟡: Minor version update. Backwards-compatible features added.\n\
>\n\
> 🟢: Patch version update. Backwards-compatible bug fixes.\n";

struct Row<'a> {
    package: &'a PackageInfo,
    kind: DependencyType,
    difference: Option<VersionDifference>,
}

impl<'a> Row<'a> {
    fn new(package: &'a PackageInfo, kind: DependencyType) -> Self {
        // Top-level packages are judged on what the project asks for, transitive ones on what got resolved
        let basis = match kind {
            DependencyType::TopLevel => package.requested_version.as_deref(),
            DependencyType::Transitive => Some(package.resolved_version.as_str()),
        };

        Self {
            package,
            kind,
            difference: version_diff::classify(basis, Some(&package.latest_version)),
        }
    }
}

/// Write the per-project, per-framework markdown tables.
pub fn generate<W: Write>(report: &Report, writer: &mut W) -> Result<()> {
    let mut projects = report.projects.iter().filter(|p| !p.frameworks.is_empty()).peekable();
    if projects.peek().is_none() {
        write!(writer, "{UP_TO_DATE_MESSAGE}")?;
        return Ok(());
    }

    for project in projects {
        write!(writer, "## {}\n\n", project.name())?;

        for framework in &project.frameworks {
            write_framework(framework, writer)?;
        }
    }

    write!(writer, "{LEGEND}")?;
    Ok(())
}

fn write_framework<W: Write>(framework: &FrameworkReport, writer: &mut W) -> Result<()> {
    let mut rows: Vec<Row<'_>> = framework
        .top_level_packages
        .iter()
        .map(|p| Row::new(p, DependencyType::TopLevel))
        .chain(framework.transitive_packages.iter().map(|p| Row::new(p, DependencyType::Transitive)))
        .collect();
    rows.sort_by(|a, b| common::compare_ids(&a.package.id, &b.package.id));

    write!(writer, "### {}\n\n", framework.framework)?;
    write!(writer, "{TABLE_HEADER}")?;

    for row in rows {
        let package = row.package;
        let severity = row.difference.map(|d| d.to_string()).unwrap_or_default();

        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {severity} |",
            package.id,
            row.kind,
            package.requested_version.as_deref().unwrap_or_default(),
            package.resolved_version,
            common::format_version(&package.latest_version, row.difference),
        )?;
    }

    writeln!(writer)?;
    Ok(())
}

/// Markdown document listing every outdated package with its severity.
pub fn detailed_view(report: &Report) -> Result<String> {
    log::info!(target: LOG_TARGET, "Generating detailed view...");

    let mut markdown = String::new();
    generate(report, &mut markdown)?;

    log::debug!(target: LOG_TARGET, "Generated detailed view {markdown}");
    Ok(markdown)
}
