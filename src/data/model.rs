use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Field – a named column of a test recording
// ---------------------------------------------------------------------------

/// The scalar quantities a testing machine records per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    Time,
    Load,
    Displacement,
    Stress,
    Strain,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Time,
        Field::Load,
        Field::Displacement,
        Field::Stress,
        Field::Strain,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Time => "time",
            Field::Load => "load",
            Field::Displacement => "displacement",
            Field::Stress => "stress",
            Field::Strain => "strain",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Sample – one recorded row
// ---------------------------------------------------------------------------

/// One row of a test file. `None` means the value was not read or did not
/// parse; it is never the same thing as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub time: Option<f64>,
    pub load: Option<f64>,
    pub displacement: Option<f64>,
    pub stress: Option<f64>,
    pub strain: Option<f64>,
}

impl Sample {
    pub fn get(&self, field: Field) -> Option<f64> {
        match field {
            Field::Time => self.time,
            Field::Load => self.load,
            Field::Displacement => self.displacement,
            Field::Stress => self.stress,
            Field::Strain => self.strain,
        }
    }

    pub fn set(&mut self, field: Field, value: Option<f64>) {
        let slot = match field {
            Field::Time => &mut self.time,
            Field::Load => &mut self.load,
            Field::Displacement => &mut self.displacement,
            Field::Stress => &mut self.stress,
            Field::Strain => &mut self.strain,
        };
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// CellIssue – a cell that could not be read as a number
// ---------------------------------------------------------------------------

/// A cell whose text failed float conversion. The sample keeps the field
/// absent; the issue is kept so reports can show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellIssue {
    /// Zero-based index of the data row (header lines excluded).
    pub row: usize,
    pub column: usize,
    pub field: Field,
    pub text: String,
}

impl fmt::Display for CellIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column {} ({}): '{}' is not a number",
            self.row, self.column, self.field, self.text
        )
    }
}

// ---------------------------------------------------------------------------
// SpecimenRecord – the full recording of one specimen
// ---------------------------------------------------------------------------

/// All rows read for one specimen, in file order. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecimenRecord {
    name: String,
    samples: Vec<Sample>,
    issues: Vec<CellIssue>,
}

impl SpecimenRecord {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self::with_issues(name, samples, Vec::new())
    }

    pub fn with_issues(name: impl Into<String>, samples: Vec<Sample>, issues: Vec<CellIssue>) -> Self {
        SpecimenRecord {
            name: name.into(),
            samples,
            issues,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Cells that failed conversion during ingestion.
    pub fn issues(&self) -> &[CellIssue] {
        &self.issues
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the record holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
