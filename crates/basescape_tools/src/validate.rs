//! Data validation utilities.
//!
//! Bases in data files are trusted by the engine: their facilities are
//! seeded without running placement rules. This module is where those files
//! get checked instead.

use std::collections::HashMap;
use std::path::Path;

use basescape_core::data::BaseData;
use basescape_core::ruleset::Ruleset;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::loader::load_data_directory;

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The base loads but behaves oddly.
    Warning,
    /// The base is inconsistent.
    Error,
}

/// One problem found in a base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Base the issue was found in.
    pub base: String,
    /// Severity.
    pub severity: Severity,
    /// Human readable description.
    pub message: String,
}

/// Result of validating a data directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of bases checked.
    pub bases_checked: usize,
    /// All issues, in base order.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Number of issues with [`Severity::Error`].
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .count()
    }

    /// Number of issues with [`Severity::Warning`].
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }

    /// Whether no errors were found.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

struct IssueSink<'a> {
    base: &'a str,
    issues: Vec<ValidationIssue>,
}

impl IssueSink<'_> {
    fn push(&mut self, severity: Severity, message: String) {
        self.issues.push(ValidationIssue {
            base: self.base.to_string(),
            severity,
            message,
        });
    }
}

/// Check one saved base against a ruleset and board size.
#[must_use]
pub fn validate_base(data: &BaseData, ruleset: &Ruleset, board_size: u32) -> Vec<ValidationIssue> {
    let mut sink = IssueSink {
        base: &data.name,
        issues: Vec::new(),
    };

    if data.facilities.is_empty() {
        sink.push(Severity::Warning, "base has no facilities".to_string());
    }

    let mut owners: HashMap<(u32, u32), usize> = HashMap::new();
    let mut operational = 0;
    let mut hangar_capacity = 0u32;

    for (index, placement) in data.facilities.iter().enumerate() {
        let Some(rule) = ruleset.facility(&placement.kind) else {
            sink.push(
                Severity::Error,
                format!("facility #{index}: unknown type '{}'", placement.kind),
            );
            continue;
        };

        let size = rule.size();
        let fits = |origin: u32| origin.checked_add(size).is_some_and(|end| end <= board_size);
        if !fits(placement.x) || !fits(placement.y) {
            sink.push(
                Severity::Error,
                format!(
                    "facility #{index} ({}) at ({}, {}) extends past the {board_size}x{board_size} board",
                    placement.kind, placement.x, placement.y
                ),
            );
            continue;
        }

        for y in placement.y..placement.y + size {
            for x in placement.x..placement.x + size {
                if let Some(&other) = owners.get(&(x, y)) {
                    sink.push(
                        Severity::Error,
                        format!("facility #{index} ({}) overlaps facility #{other} at ({x}, {y})", placement.kind),
                    );
                } else {
                    owners.insert((x, y), index);
                }
            }
        }

        if placement.build_time == 0 {
            operational += 1;
            hangar_capacity = hangar_capacity.saturating_add(rule.crafts());
        }
    }

    for kind in &data.crafts {
        if ruleset.craft(kind).is_none() {
            sink.push(Severity::Error, format!("unknown craft type '{kind}'"));
        }
    }

    if !data.facilities.is_empty() && operational == 0 {
        sink.push(
            Severity::Warning,
            "no operational facility, nothing can be built next to it".to_string(),
        );
    }
    if data.crafts.len() > hangar_capacity as usize {
        sink.push(
            Severity::Warning,
            format!(
                "{} craft but only {hangar_capacity} operational hangar slot(s), extra craft are not shown",
                data.crafts.len()
            ),
        );
    }

    sink.issues
}

/// Validate all RON data files in a directory.
///
/// Unreadable or unparsable files are errors; problems inside bases are
/// collected into the report.
pub fn validate_data_directory(path: &Path) -> Result<ValidationReport> {
    let data = load_data_directory(path)?;
    let mut report = ValidationReport {
        bases_checked: data.bases.len(),
        issues: Vec::new(),
    };

    for file in &data.bases {
        let issues = validate_base(&file.data, &data.ruleset, data.config.board_size);
        for issue in &issues {
            warn!(
                file = %file.path.display(),
                severity = ?issue.severity,
                "{}", issue.message
            );
        }
        report.issues.extend(issues);
    }

    info!(
        bases = report.bases_checked,
        errors = report.error_count(),
        warnings = report.warning_count(),
        "Validation finished"
    );
    Ok(report)
}
