use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Root of the JSON document produced by `dotnet list package --outdated --format json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub parameters: String,

    /// Package sources consulted, passed through untouched
    #[serde(default)]
    pub sources: Vec<serde_json::Value>,

    /// Present when the command could not complete for one or more projects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<Problem>,

    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default)]
    pub project: String,

    #[serde(default)]
    pub level: String,

    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub path: String,

    /// Empty when nothing is outdated for this project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<FrameworkReport>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkReport {
    pub framework: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_level_packages: Vec<PackageInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transitive_packages: Vec<PackageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub id: String,

    /// Only reported for top-level packages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_version: Option<String>,

    #[serde(default)]
    pub resolved_version: String,

    #[serde(default)]
    pub latest_version: String,
}

impl Report {
    /// Whether any project has at least one outdated top-level package.
    ///
    /// Transitive packages alone do not count.
    #[must_use]
    pub fn has_outdated_top_level_packages(&self) -> bool {
        self.projects
            .iter()
            .flat_map(|project| &project.frameworks)
            .any(|framework| !framework.top_level_packages.is_empty())
    }
}

impl Project {
    #[must_use]
    pub fn name(&self) -> &str {
        project_name(&self.path)
    }
}

/// The file name of a project manifest without its extension.
#[must_use]
pub fn project_name(path: &str) -> &str {
    Utf8Path::new(path).file_stem().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name() {
        assert_eq!(project_name("/a/b/Project.A.csproj"), "Project.A");
        assert_eq!(project_name("relative/App.fsproj"), "App");
        assert_eq!(project_name("NoExtension"), "NoExtension");
    }

    #[test]
    fn test_deserialize_minimal_report() {
        let json = r#"{
            "version": 1,
            "parameters": "--outdated",
            "sources": ["https://api.nuget.org/v3/index.json"],
            "projects": [
                { "path": "/src/App/App.csproj" },
                {
                    "path": "/src/Lib/Lib.csproj",
                    "frameworks": [
                        {
                            "framework": "net8.0",
                            "topLevelPackages": [
                                { "id": "Serilog", "requestedVersion": "3.0.0", "resolvedVersion": "3.0.0", "latestVersion": "4.0.0" }
                            ]
                        }
                    ]
                }
            ]
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.version, 1);
        assert!(report.problems.is_empty());
        assert_eq!(report.projects.len(), 2);
        assert!(report.projects[0].frameworks.is_empty());

        let framework = &report.projects[1].frameworks[0];
        assert_eq!(framework.framework, "net8.0");
        assert!(framework.transitive_packages.is_empty());
        assert_eq!(framework.top_level_packages[0].requested_version.as_deref(), Some("3.0.0"));
        assert_eq!(report.projects[1].name(), "Lib");
    }

    #[test]
    fn test_deserialize_problems() {
        let json = r#"{
            "version": 1,
            "problems": [ { "project": "/a/App.csproj", "level": "error", "text": "boom" } ],
            "projects": []
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].level, "error");
    }

    #[test]
    fn test_has_outdated_top_level_packages() {
        let package = PackageInfo {
            id: "A".into(),
            requested_version: Some("1.0.0".into()),
            resolved_version: "1.0.0".into(),
            latest_version: "2.0.0".into(),
        };

        let mut report = Report {
            projects: vec![Project {
                path: "/p/App.csproj".into(),
                frameworks: vec![FrameworkReport {
                    framework: "net8.0".into(),
                    top_level_packages: Vec::new(),
                    transitive_packages: vec![package.clone()],
                }],
            }],
            ..Report::default()
        };
        assert!(!report.has_outdated_top_level_packages());

        report.projects[0].frameworks[0].top_level_packages.push(package);
        assert!(report.has_outdated_top_level_packages());

        assert!(!Report::default().has_outdated_top_level_packages());
    }
}
