use std::fmt;
use std::path::PathBuf;

use crate::data::model::Field;

// ---------------------------------------------------------------------------
// Geometry / search – leaf errors
// ---------------------------------------------------------------------------

/// Failures of two-point line math.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Both points are the same, so no line is defined.
    #[error("points ({x}, {y}) coincide, no line through them")]
    CoincidentPoints { x: f64, y: f64 },

    /// The two lines never meet (or are the same line).
    #[error("lines are parallel, no single intersection")]
    ParallelLines,
}

/// Failure of the nearest-value lookup.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("value {target} is not bracketed by the sequence")]
    ValueNotFound { target: f64 },
}

// ---------------------------------------------------------------------------
// Curve analysis
// ---------------------------------------------------------------------------

/// Reasons a metric cannot be derived from a curve.
///
/// `Clone` so a memoized failure can be handed out on every access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("curve has no data points")]
    EmptyData,

    /// A sample lacks the field the x or y axis projects.
    #[error("row {row} has no {field} value")]
    IncompleteCurve { field: Field, row: usize },

    #[error("value {target} is not bracketed by the curve")]
    ValueNotFound { target: f64 },

    /// The two secant points do not define a usable modulus line.
    #[error("secant points ({x1}, {y1}) and ({x2}, {y2}) give a degenerate modulus line")]
    DegenerateModulus { x1: f64, y1: f64, x2: f64, y2: f64 },

    #[error("lines are parallel, no single intersection")]
    ParallelLines,

    #[error("curve never crosses the modulus line offset by {offset}")]
    NoYieldFound { offset: f64 },
}

impl From<SearchError> for AnalysisError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::ValueNotFound { target } => AnalysisError::ValueNotFound { target },
        }
    }
}

/// The metric a [`SpecimenError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Peak,
    PeakPosition,
    Modulus,
    Yield,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Peak => "peak",
            Metric::PeakPosition => "peak position",
            Metric::Modulus => "modulus",
            Metric::Yield => "yield",
        };
        f.write_str(name)
    }
}

/// An analysis failure tagged with the specimen and metric it belongs to.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("specimen '{specimen}': {metric} failed: {source}")]
pub struct SpecimenError {
    pub specimen: String,
    pub metric: Metric,
    #[source]
    pub source: AnalysisError,
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// Errors raised while turning delimited text into a specimen record.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("specimen directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("specimen path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read specimen '{specimen}': {source}")]
    Io {
        specimen: String,
        #[source]
        source: std::io::Error,
    },

    /// A row's column count differs from the first data row's.
    #[error("specimen '{specimen}': line {line} has {found} columns, expected {expected}")]
    RowShape {
        specimen: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("specimen '{specimen}': {field} mapped to column {column} but rows have {width} columns")]
    ColumnOutOfRange {
        specimen: String,
        field: Field,
        column: usize,
        width: usize,
    },

    #[error("specimen '{specimen}': CSV parsing error: {source}")]
    Csv {
        specimen: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("modulus bounds must satisfy 0 < lower < upper <= 1, got {lower} and {upper}")]
    InvalidThresholds { lower: f64, upper: f64 },

    #[error("yield offset must be finite and positive, got {0}")]
    InvalidOffset(f64),

    #[error("compliance must be finite, got {0}")]
    InvalidCompliance(f64),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),
}
