//! Semantic-version difference between an installed and an available version.

use regex::Regex;
use semver::Version;
use std::sync::LazyLock;
use strum::Display;

/// First `major[.minor[.patch]]` run of digits inside an arbitrary version string.
static COERCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])").expect("invalid regex")
});

/// Category of change needed to go from one version to a newer one.
///
/// The `Display` form is the label shown in the severity column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum VersionDifference {
    Major,
    Premajor,
    Minor,
    Preminor,
    Patch,
    Prepatch,
    Prerelease,
    Build,
}

/// Classify the change from `from` to `to`.
///
/// Each side is parsed strictly first and coerced leniently second (so four-part NuGet
/// versions such as `1.2.3.4` still compare). Returns `None` when either side is absent
/// or unusable, when both are equal, and when `to` is not newer than `from`.
#[must_use]
pub fn classify(from: Option<&str>, to: Option<&str>) -> Option<VersionDifference> {
    let from = resolve(from?)?;
    let to = resolve(to?)?;

    // Ordering includes build metadata, so `1.0.0` < `1.0.0+foo`
    if from >= to {
        return None;
    }

    Some(difference(&from, &to).unwrap_or(VersionDifference::Build))
}

fn resolve(version: &str) -> Option<Version> {
    parse_strict(version).or_else(|| coerce(version))
}

fn parse_strict(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(trimmed).ok()
}

fn coerce(version: &str) -> Option<Version> {
    let captures = COERCE.captures(version)?;
    let part = |index: usize| captures.get(index).map_or(Some(0), |m| m.as_str().parse::<u64>().ok());

    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Difference ignoring build metadata; `None` when the versions only differ in build metadata.
fn difference(from: &Version, to: &Version) -> Option<VersionDifference> {
    let has_pre = !from.pre.is_empty() || !to.pre.is_empty();

    let kind = if from.major != to.major {
        if has_pre { VersionDifference::Premajor } else { VersionDifference::Major }
    } else if from.minor != to.minor {
        if has_pre { VersionDifference::Preminor } else { VersionDifference::Minor }
    } else if from.patch != to.patch {
        if has_pre { VersionDifference::Prepatch } else { VersionDifference::Patch }
    } else if from.pre != to.pre {
        VersionDifference::Prerelease
    } else {
        return None;
    };

    Some(kind)
}
