//! Mechanical test metrics from recorded load/displacement or
//! stress/strain curves: peak value, secant modulus and offset yield.
//!
//! ```no_run
//! use std::path::Path;
//! use tensile_metrics::{load_file, Config, Specimen, SpecimenReport};
//!
//! let config = Config::default();
//! let record = load_file(Path::new("100-001.Dat"), &config.reader)?;
//! let specimen = Specimen::new(record, config.analysis);
//! println!("peak load {}", specimen.peak()?);
//! let report = SpecimenReport::from_specimen(&specimen);
//! # let _ = report;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod report;

pub use analysis::curve::{Curve, Modulus};
pub use analysis::geometry::{intersection_of_lines, slope_intercept, Line, Point};
pub use analysis::search::nearest_index;
pub use analysis::specimen::Specimen;
pub use config::{AnalysisConfig, Axis, ColumnMap, Config, ReaderConfig};
pub use data::loader::{load_file, read_specimen, SpecimenDirectory};
pub use data::model::{CellIssue, Field, Sample, SpecimenRecord};
pub use error::{AnalysisError, ConfigError, IngestError, Metric, SpecimenError};
pub use report::{MetricOutcome, SpecimenReport};
