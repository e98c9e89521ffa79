//! Structured diagnostics for skipped and repaired records.

use serde::Serialize;
use std::fmt;

/// Why a record was dropped from the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Input is neither a Polygon nor a MultiPolygon
    UnsupportedGeometryType,
    /// Repair left the geometry empty or still invalid
    InvalidGeometryUnrepairable,
    /// Repair turned the geometry into a non-polygonal type
    TypeDriftAfterRepair,
    /// Geometry object or its coordinates could not be parsed
    MalformedGeometry,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::UnsupportedGeometryType => "unsupported geometry type",
            SkipReason::InvalidGeometryUnrepairable => "invalid geometry, repair failed",
            SkipReason::TypeDriftAfterRepair => "geometry type changed during repair",
            SkipReason::MalformedGeometry => "malformed geometry",
        };
        f.write_str(s)
    }
}

/// Pipeline stage that rejected the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Load,
    TypeGate,
    Repair,
    TypeDrift,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => write!(f, "load"),
            Stage::TypeGate => write!(f, "type_gate"),
            Stage::Repair => write!(f, "repair"),
            Stage::TypeDrift => write!(f, "type_drift"),
        }
    }
}

/// One skipped record, kept for later data-quality review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipDiagnostic {
    pub reason: SkipReason,
    pub name: String,
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SkipDiagnostic {
    pub fn new(reason: SkipReason, name: impl Into<String>, stage: Stage) -> Self {
        Self {
            reason,
            name: name.into(),
            stage,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for SkipDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {} at {}: {}", self.name, self.stage, self.reason)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({})", detail)?;
        }
        Ok(())
    }
}

/// Validity state around a zero-buffer repair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairRecord {
    pub name: String,
    pub before_valid: bool,
    pub before_reason: String,
    pub after_valid: bool,
    pub after_type: String,
}
