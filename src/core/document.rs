//! Feature-document ingestion.
//!
//! The Gherkin grammar itself is parsed by the `gherkin` crate; this module
//! reduces its output to the ordered feature → scenario → step tree the
//! execution engine consumes, so the engine never depends on the parser's
//! types.

use gherkin::GherkinEnv;
use std::fmt;
use std::path::Path;

/// One step of a scenario: its keyword ("Given", "When", ...) and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDoc {
    pub keyword: String,
    pub text: String,
}

/// One scenario: a name and its steps in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDoc {
    pub name: String,
    pub steps: Vec<StepDoc>,
}

/// A parsed feature document: its name, the source path it came from, and
/// its scenarios in declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDoc {
    pub name: String,
    pub file: String,
    pub scenarios: Vec<ScenarioDoc>,
}

impl FeatureDoc {
    /// Parses a feature file from disk.
    ///
    /// A malformed document is fatal for the whole run; the error is
    /// surfaced as a single [`DocumentParseError`] before any step executes.
    pub fn load(path: &Path) -> Result<Self, DocumentParseError> {
        let feature = gherkin::Feature::parse_path(path, GherkinEnv::default()).map_err(|e| {
            DocumentParseError {
                file: path.display().to_string(),
                detail: e.to_string(),
            }
        })?;

        let scenarios = feature
            .scenarios
            .iter()
            .map(|scenario| ScenarioDoc {
                name: scenario.name.clone(),
                steps: scenario
                    .steps
                    .iter()
                    .map(|step| StepDoc {
                        keyword: step.keyword.trim().to_string(),
                        text: step.value.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(Self {
            name: feature.name.clone(),
            file: path.display().to_string(),
            scenarios,
        })
    }
}

/// Fatal error: the feature document could not be parsed. Nothing runs.
/// 致命错误：feature 文档无法解析。不会执行任何步骤。
#[derive(Debug, Clone)]
pub struct DocumentParseError {
    pub file: String,
    pub detail: String,
}

impl fmt::Display for DocumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to parse feature document {}: {}",
            self.file, self.detail
        )
    }
}

impl std::error::Error for DocumentParseError {}
