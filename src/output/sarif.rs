use std::path::PathBuf;

use serde::Serialize;

use crate::checker::{ProblemRecord, ProblemType};
use crate::error::Result;
use crate::path_utils::relative_slash_path;
use crate::project::CheckRunResult;

use super::OutputFormatter;

/// SARIF 2.1.0 output formatter for code scanning tools.
#[derive(Default)]
pub struct SarifFormatter {
    root: Option<PathBuf>,
}

impl SarifFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Emit artifact URIs relative to `root`.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }
}

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "doc-doctor";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rule table, indexed by `ProblemType::code() - 1`.
const RULES: [(ProblemType, &str, &str, &str); 5] = [
    (
        ProblemType::ParamMissing,
        "ParamMissing",
        "Parameter is not documented",
        "Every parameter needs an @param tag followed by a description.",
    ),
    (
        ProblemType::ReturnMissing,
        "ReturnMissing",
        "Return value is not documented",
        "Functions returning a value need an @return tag followed by a description.",
    ),
    (
        ProblemType::BriefMissing,
        "BriefMissing",
        "Function has no description",
        "The comment before a function needs an @brief tag or free-text content.",
    ),
    (
        ProblemType::ContentChanged,
        "ContentChanged",
        "Documentation is out of date",
        "Reserved for documentation that no longer matches the function.",
    ),
    (
        ProblemType::SyntaxError,
        "SyntaxError",
        "File has syntax errors",
        "The file was not checked because it has error diagnostics.",
    ),
];

#[derive(Serialize)]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run>,
}

#[derive(Serialize)]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct Tool {
    driver: ToolDriver,
}

#[derive(Serialize)]
struct ToolDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: String,
    name: &'static str,
    short_description: MultiformatMessageString,
    full_description: MultiformatMessageString,
    default_configuration: ReportingConfiguration,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct MultiformatMessageString {
    text: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    rule_index: usize,
    level: &'static str,
    message: Message,
    locations: Vec<Location>,
    properties: ResultProperties,
}

#[derive(Serialize)]
struct Message {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
    uri_base_id: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: usize,
    start_column: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultProperties {
    function_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    function_signature: String,
}

fn rule_id(problem_type: ProblemType) -> String {
    format!("{TOOL_NAME}/{}", problem_type.as_str().to_lowercase().replace('_', "-"))
}

const fn level(problem_type: ProblemType) -> &'static str {
    match problem_type {
        ProblemType::SyntaxError => "error",
        _ => "warning",
    }
}

impl SarifFormatter {
    fn build_rules() -> Vec<ReportingDescriptor> {
        RULES
            .iter()
            .map(|&(problem_type, name, short, full)| ReportingDescriptor {
                id: rule_id(problem_type),
                name,
                short_description: MultiformatMessageString { text: short },
                full_description: MultiformatMessageString { text: full },
                default_configuration: ReportingConfiguration {
                    level: level(problem_type),
                },
            })
            .collect()
    }

    fn convert_problem(&self, problem: &ProblemRecord) -> SarifResult {
        SarifResult {
            rule_id: rule_id(problem.problem_type),
            rule_index: usize::from(problem.problem_type.code()) - 1,
            level: level(problem.problem_type),
            message: Message {
                text: format!("{}: {}", problem.function_name, problem.description),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: relative_slash_path(&problem.file_path, self.root.as_deref()),
                        uri_base_id: "%SRCROOT%",
                    },
                    region: Region {
                        start_line: problem.line,
                        start_column: problem.column,
                    },
                },
            }],
            properties: ResultProperties {
                function_name: problem.function_name.clone(),
                function_signature: problem.function_signature.clone(),
            },
        }
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, result: &CheckRunResult) -> Result<String> {
        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules: Self::build_rules(),
                    },
                },
                results: result
                    .problems
                    .iter()
                    .map(|p| self.convert_problem(p))
                    .collect(),
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
