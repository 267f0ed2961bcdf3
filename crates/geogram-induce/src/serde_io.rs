use std::path::Path;

use geogram_core::{ErrorInfo, GeogramError, Result};
use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisReport;
use crate::grammar::Grammar;
use crate::isogroup::Isogroups;
use crate::placed::PlacedGraph;

/// Version tag written into every isogroup export.
pub const ISOGROUPS_SCHEMA_VERSION: u32 = 1;

/// Plain export of an isogroup partition: group sizes plus member geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsogroupsExport {
    /// Export format version.
    pub schema_version: u32,
    /// Highest order reached, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
    /// Number of groups.
    pub size: usize,
    /// Groups in discovery order.
    pub groups: Vec<GroupExport>,
}

/// One exported group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupExport {
    /// Member count.
    pub size: usize,
    /// Edge count shared by every member.
    pub order: usize,
    /// Members with their origin maps.
    pub members: Vec<PlacedGraph>,
}

impl IsogroupsExport {
    /// Builds the export view of `groups`.
    pub fn new(groups: &Isogroups, order: Option<usize>) -> Self {
        Self {
            schema_version: ISOGROUPS_SCHEMA_VERSION,
            order,
            size: groups.size(),
            groups: groups
                .iter()
                .map(|group| GroupExport {
                    size: group.len(),
                    order: group
                        .representative()
                        .map_or(0, |member| member.graph().n_edges()),
                    members: group.members().to_vec(),
                })
                .collect(),
        }
    }

    /// Rebuilds the partition.
    pub fn into_isogroups(self) -> Result<Isogroups> {
        if self.schema_version > ISOGROUPS_SCHEMA_VERSION {
            return Err(GeogramError::serde(
                "schema-version",
                "isogroup export was written by a newer version",
            )
            .with_context("found", self.schema_version)
            .with_context("supported", ISOGROUPS_SCHEMA_VERSION));
        }
        Ok(self
            .groups
            .into_iter()
            .map(|group| group.members.into())
            .collect())
    }
}

/// Serialises isogroups into indented JSON.
pub fn isogroups_to_json(groups: &Isogroups) -> Result<String> {
    to_pretty(&IsogroupsExport::new(groups, None), "isogroups-serialize")
}

/// Serialises a full analysis report into indented JSON.
pub fn report_to_json(report: &AnalysisReport) -> Result<String> {
    to_pretty(
        &IsogroupsExport::new(&report.isogroups, Some(report.order)),
        "isogroups-serialize",
    )
}

/// Deserialises isogroups from JSON text.
pub fn isogroups_from_json(json: &str) -> Result<Isogroups> {
    let export: IsogroupsExport = serde_json::from_str(json)
        .map_err(|err| GeogramError::Serde(ErrorInfo::new("isogroups-deserialize", err.to_string())))?;
    export.into_isogroups()
}

/// Serialises a grammar into indented JSON.
pub fn grammar_to_json(grammar: &Grammar) -> Result<String> {
    to_pretty(grammar, "grammar-serialize")
}

/// Deserialises a grammar from JSON text and checks its consistency.
pub fn grammar_from_json(json: &str) -> Result<Grammar> {
    let grammar: Grammar = serde_json::from_str(json)
        .map_err(|err| GeogramError::Serde(ErrorInfo::new("grammar-deserialize", err.to_string())))?;
    grammar.validate()?;
    Ok(grammar)
}

/// Writes a JSON payload to disk.
pub fn write_json(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json).map_err(|err| {
        GeogramError::Serde(
            ErrorInfo::new("json-write", err.to_string())
                .with_context("path", path.display()),
        )
    })
}

/// Reads a JSON payload from disk.
pub fn read_json(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| {
        GeogramError::Serde(
            ErrorInfo::new("json-read", err.to_string())
                .with_context("path", path.display()),
        )
    })
}

fn to_pretty<T: Serialize>(value: &T, code: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| GeogramError::Serde(ErrorInfo::new(code, err.to_string())))
}
