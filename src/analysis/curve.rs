//! The analysed x/y curve and the metrics derived from it.
//!
//! All functions here are pure; caching lives in
//! [`Specimen`](super::specimen::Specimen).

use serde::Serialize;

use super::geometry::{slope_intercept, Line, Point};
use super::search::nearest_index;
use crate::config::{AnalysisConfig, Axis};
use crate::data::model::{Field, SpecimenRecord};
use crate::error::{AnalysisError, GeometryError};

// ---------------------------------------------------------------------------
// Modulus – result of the secant fit
// ---------------------------------------------------------------------------

/// Secant stiffness between two fractions of the peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Modulus {
    pub slope: f64,
    /// Where the modulus line meets `y = 0`.
    pub x_intercept: f64,
    /// Secant point at the lower fraction of peak.
    pub lower: Point,
    /// Secant point at the upper fraction of peak.
    pub upper: Point,
}

// ---------------------------------------------------------------------------
// Curve – projected axis data
// ---------------------------------------------------------------------------

/// `x` and `y` arrays of equal length, in sample order. `x` is expected to
/// be non-decreasing; nothing checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    #[cfg(test)]
    pub(crate) fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "curve axes differ in length");
        Curve { x, y }
    }

    /// Build the curve of `record` for the configured axes.
    ///
    /// With the x axis on displacement and a non-zero compliance, each x is
    /// `displacement - compliance * load`.
    pub fn project(record: &SpecimenRecord, config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let corrected = config.x_axis == Axis::Displacement && config.compliance != 0.0;
        let x_field = config.x_axis.field();
        let y_field = config.y_axis.field();

        let mut x = Vec::with_capacity(record.len());
        let mut y = Vec::with_capacity(record.len());
        for (row, sample) in record.samples().iter().enumerate() {
            let missing = |field| AnalysisError::IncompleteCurve { field, row };

            let mut x_value = sample.get(x_field).ok_or_else(|| missing(x_field))?;
            if corrected {
                let load = sample.load.ok_or_else(|| missing(Field::Load))?;
                x_value -= config.compliance * load;
            }
            x.push(x_value);
            y.push(sample.get(y_field).ok_or_else(|| missing(y_field))?);
        }
        Ok(Curve { x, y })
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, index: usize) -> Point {
        Point::new(self.x[index], self.y[index])
    }

    /// Largest y value.
    pub fn peak(&self) -> Result<f64, AnalysisError> {
        if self.is_empty() {
            return Err(AnalysisError::EmptyData);
        }
        Ok(self.y.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// x at the first sample whose y equals `peak`.
    pub fn peak_position(&self, peak: f64) -> Result<f64, AnalysisError> {
        let index = nearest_index(peak, &self.y)?;
        Ok(self.x[index])
    }

    /// The sample whose y is nearest to `fraction * peak`, searching from
    /// the start of the curve.
    pub fn secant_point(&self, fraction: f64, peak: f64) -> Result<Point, AnalysisError> {
        let index = nearest_index(fraction * peak, &self.y)?;
        Ok(self.point(index))
    }

    /// Slope of the secant through the points at `lower` and `upper`
    /// fractions of `peak`.
    pub fn modulus(&self, peak: f64, lower: f64, upper: f64) -> Result<Modulus, AnalysisError> {
        let lower_point = self.secant_point(lower, peak)?;
        let upper_point = self.secant_point(upper, peak)?;

        let degenerate = || AnalysisError::DegenerateModulus {
            x1: lower_point.x,
            y1: lower_point.y,
            x2: upper_point.x,
            y2: upper_point.y,
        };
        if lower_point.x == upper_point.x || lower_point.y == upper_point.y {
            return Err(degenerate());
        }

        let line = slope_intercept(lower_point, upper_point).map_err(|_| degenerate())?;
        let (Line::Sloped { slope, .. }, Some(x_intercept)) = (line, line.x_intercept()) else {
            return Err(degenerate());
        };
        Ok(Modulus {
            slope,
            x_intercept,
            lower: lower_point,
            upper: upper_point,
        })
    }

    /// Offset-yield point: where the curve first drops from above the
    /// modulus line shifted right by `offset` to on or below it.
    ///
    /// A sample lying exactly on the shifted line is returned as is,
    /// otherwise the crossing is interpolated between the two samples.
    pub fn offset_yield(&self, modulus: &Modulus, offset: f64) -> Result<Point, AnalysisError> {
        let shift = modulus.x_intercept + offset;
        let offset_line = Line::through_x_intercept(modulus.slope, shift);
        let line_at = |x: f64| modulus.slope * (x - shift);

        for i in 0..self.len() {
            let here = self.point(i);
            let line_here = line_at(here.x);
            if here.y == line_here {
                return Ok(here);
            }
            if i + 1 == self.len() {
                break;
            }

            let next = self.point(i + 1);
            let line_next = line_at(next.x);
            if here.y > line_here && next.y <= line_next {
                if next.y == line_next {
                    return Ok(next);
                }
                let segment = slope_intercept(here, next).map_err(geometry_failure)?;
                return segment.intersection(&offset_line).map_err(geometry_failure);
            }
        }
        Err(AnalysisError::NoYieldFound { offset })
    }
}

fn geometry_failure(err: GeometryError) -> AnalysisError {
    match err {
        GeometryError::ParallelLines => AnalysisError::ParallelLines,
        // a crossing segment always has two distinct points
        GeometryError::CoincidentPoints { .. } => AnalysisError::ParallelLines,
    }
}
