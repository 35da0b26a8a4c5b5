//! Explicit configuration for ingestion and analysis.
//!
//! Every entry point takes one of these by reference; nothing is read from
//! ambient state. A [`Config`] can be loaded from JSON, where every field is
//! optional and falls back to the defaults below:
//!
//! ```json
//! {
//!   "reader": { "header_lines": 4, "delimiter": "\t",
//!               "columns": { "load": 0, "displacement": 1, "stress": null } },
//!   "analysis": { "x_axis": "Strain", "y_axis": "Stress", "yield_offset": 0.002 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::model::Field;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Axis – which fields make up the analysed curve
// ---------------------------------------------------------------------------

/// A field that can be plotted on one axis of the analysed curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Load,
    Displacement,
    Stress,
    Strain,
}

impl Axis {
    pub fn field(self) -> Field {
        match self {
            Axis::Load => Field::Load,
            Axis::Displacement => Field::Displacement,
            Axis::Stress => Field::Stress,
            Axis::Strain => Field::Strain,
        }
    }
}

// ---------------------------------------------------------------------------
// Reader configuration
// ---------------------------------------------------------------------------

/// Column index of each field. `None` means the field is not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub time: Option<usize>,
    pub load: Option<usize>,
    pub displacement: Option<usize>,
    pub stress: Option<usize>,
    pub strain: Option<usize>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            time: None,
            load: Some(0),
            displacement: Some(1),
            stress: Some(2),
            strain: Some(5),
        }
    }
}

impl ColumnMap {
    /// A map that reads nothing.
    pub fn empty() -> Self {
        ColumnMap {
            time: None,
            load: None,
            displacement: None,
            stress: None,
            strain: None,
        }
    }

    pub fn get(&self, field: Field) -> Option<usize> {
        match field {
            Field::Time => self.time,
            Field::Load => self.load,
            Field::Displacement => self.displacement,
            Field::Stress => self.stress,
            Field::Strain => self.strain,
        }
    }

    /// `(field, column)` for every mapped field.
    pub fn mapped(&self) -> Vec<(Field, usize)> {
        Field::ALL
            .iter()
            .filter_map(|&f| self.get(f).map(|col| (f, col)))
            .collect()
    }
}

/// How a delimited specimen file is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Leading lines discarded before the first data row.
    pub header_lines: usize,
    pub delimiter: char,
    pub columns: ColumnMap,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            header_lines: 4,
            delimiter: ',',
            columns: ColumnMap::default(),
        }
    }
}

impl ReaderConfig {
    /// The delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::InvalidDelimiter(self.delimiter))
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Axis selection and the numeric parameters of the curve analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// Fraction of peak for the lower secant point.
    pub modulus_lower_bound: f64,
    /// Fraction of peak for the upper secant point.
    pub modulus_upper_bound: f64,
    /// Shift of the modulus line along x for the offset-yield method. Must be
    /// positive, otherwise the offset line runs through the curve's origin.
    pub yield_offset: f64,
    /// Machine compliance (displacement per unit load) removed from the
    /// displacement axis. Zero disables the correction.
    pub compliance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            x_axis: Axis::Displacement,
            y_axis: Axis::Load,
            modulus_lower_bound: 0.4,
            modulus_upper_bound: 0.75,
            yield_offset: 0.2,
            compliance: 0.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (lower, upper) = (self.modulus_lower_bound, self.modulus_upper_bound);
        if !(lower > 0.0 && lower < upper && upper <= 1.0) {
            return Err(ConfigError::InvalidThresholds { lower, upper });
        }
        if !self.yield_offset.is_finite() || self.yield_offset <= 0.0 {
            return Err(ConfigError::InvalidOffset(self.yield_offset));
        }
        if !self.compliance.is_finite() {
            return Err(ConfigError::InvalidCompliance(self.compliance));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config – everything together
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reader: ReaderConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reader.delimiter_byte()?;
        self.analysis.validate()
    }
}
