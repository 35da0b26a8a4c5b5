use log::info;
use serde::Serialize;

use crate::analysis::curve::Modulus;
use crate::analysis::geometry::Point;
use crate::analysis::specimen::Specimen;
use crate::config::Axis;
use crate::data::model::CellIssue;
use crate::error::SpecimenError;

// ---------------------------------------------------------------------------
// MetricOutcome – a result or the reason there is none
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricOutcome<T> {
    Computed(T),
    Failed { reason: String },
}

impl<T> MetricOutcome<T> {
    pub fn ok(&self) -> Option<&T> {
        match self {
            MetricOutcome::Computed(value) => Some(value),
            MetricOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MetricOutcome::Failed { .. })
    }
}

impl<T> From<Result<T, SpecimenError>> for MetricOutcome<T> {
    fn from(result: Result<T, SpecimenError>) -> Self {
        match result {
            Ok(value) => MetricOutcome::Computed(value),
            Err(err) => MetricOutcome::Failed {
                reason: err.source.to_string(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// SpecimenReport
// ---------------------------------------------------------------------------

/// Everything known about one specimen, including partial results.
#[derive(Debug, Clone, Serialize)]
pub struct SpecimenReport {
    pub name: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub samples: usize,
    /// Cells that did not parse during ingestion.
    pub cell_issues: Vec<CellIssue>,
    pub peak: MetricOutcome<f64>,
    pub peak_position: MetricOutcome<f64>,
    pub modulus: MetricOutcome<Modulus>,
    pub yield_point: MetricOutcome<Point>,
}

impl SpecimenReport {
    /// Compute every metric of `specimen` and collect the outcomes. One
    /// failing metric does not hide the others.
    pub fn from_specimen(specimen: &Specimen) -> Self {
        let report = SpecimenReport {
            name: specimen.name().to_string(),
            x_axis: specimen.config().x_axis,
            y_axis: specimen.config().y_axis,
            samples: specimen.record().len(),
            cell_issues: specimen.record().issues().to_vec(),
            peak: specimen.peak().into(),
            peak_position: specimen.peak_position().into(),
            modulus: specimen.modulus().into(),
            yield_point: specimen.yield_point().into(),
        };
        info!(
            "{}: {} of 4 metrics computed",
            report.name,
            report.computed_count()
        );
        report
    }

    fn computed_count(&self) -> usize {
        [
            self.peak.is_failed(),
            self.peak_position.is_failed(),
            self.modulus.is_failed(),
            self.yield_point.is_failed(),
        ]
        .iter()
        .filter(|failed| !**failed)
        .count()
    }
}
