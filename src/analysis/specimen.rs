use log::{debug, warn};

use super::curve::{Curve, Modulus};
use super::geometry::Point;
use super::state::{Memo, MetricState};
use crate::config::AnalysisConfig;
use crate::data::model::SpecimenRecord;
use crate::error::{AnalysisError, Metric, SpecimenError};

// ---------------------------------------------------------------------------
// Specimen – a record plus its lazily computed metrics
// ---------------------------------------------------------------------------

/// One specimen under analysis.
///
/// Metrics are computed on first access, in dependency order
/// (curve → peak → modulus → yield), and cached for the life of the value.
/// A failed metric stays failed and every later access reports the same
/// error tagged with the specimen name and metric.
#[derive(Debug)]
pub struct Specimen {
    record: SpecimenRecord,
    config: AnalysisConfig,
    curve: Memo<Curve>,
    peak: Memo<f64>,
    peak_position: Memo<f64>,
    modulus: Memo<Modulus>,
    yield_point: Memo<Point>,
}

impl Specimen {
    pub fn new(record: SpecimenRecord, config: AnalysisConfig) -> Self {
        Specimen {
            record,
            config,
            curve: Memo::new(),
            peak: Memo::new(),
            peak_position: Memo::new(),
            modulus: Memo::new(),
            yield_point: Memo::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn record(&self) -> &SpecimenRecord {
        &self.record
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The x/y curve for the configured axes.
    pub fn curve(&self) -> Result<&Curve, AnalysisError> {
        self.curve
            .get_or_compute(|| Curve::project(&self.record, &self.config))
            .map_err(|err| err.clone())
    }

    /// Largest y value.
    pub fn peak(&self) -> Result<f64, SpecimenError> {
        let result = self
            .peak
            .get_or_compute(|| self.logged(Metric::Peak, self.compute_peak()));
        self.finish(Metric::Peak, result.copied())
    }

    /// x value at the peak.
    pub fn peak_position(&self) -> Result<f64, SpecimenError> {
        let result = self.peak_position.get_or_compute(|| {
            self.logged(Metric::PeakPosition, self.compute_peak_position())
        });
        self.finish(Metric::PeakPosition, result.copied())
    }

    /// Secant modulus between the configured fractions of peak.
    pub fn modulus(&self) -> Result<Modulus, SpecimenError> {
        let result = self
            .modulus
            .get_or_compute(|| self.logged(Metric::Modulus, self.compute_modulus()));
        self.finish(Metric::Modulus, result.copied())
    }

    /// Offset-yield point as `(x, y)`, i.e. (yield strain, yield stress) on
    /// a stress/strain curve.
    pub fn yield_point(&self) -> Result<Point, SpecimenError> {
        let result = self
            .yield_point
            .get_or_compute(|| self.logged(Metric::Yield, self.compute_yield()));
        self.finish(Metric::Yield, result.copied())
    }

    /// y value of the yield point.
    pub fn yield_stress(&self) -> Result<f64, SpecimenError> {
        self.yield_point().map(|p| p.y)
    }

    /// x value of the yield point.
    pub fn yield_strain(&self) -> Result<f64, SpecimenError> {
        self.yield_point().map(|p| p.x)
    }

    /// Current state of `metric` without computing anything.
    pub fn state(&self, metric: Metric) -> MetricState<'_, ()> {
        fn erase<T>(state: MetricState<'_, T>) -> MetricState<'_, ()> {
            match state {
                MetricState::Uncomputed => MetricState::Uncomputed,
                MetricState::Computed(_) => MetricState::Computed(&()),
                MetricState::Failed(err) => MetricState::Failed(err),
            }
        }
        match metric {
            Metric::Peak => erase(self.peak.state()),
            Metric::PeakPosition => erase(self.peak_position.state()),
            Metric::Modulus => erase(self.modulus.state()),
            Metric::Yield => erase(self.yield_point.state()),
        }
    }

    fn compute_peak(&self) -> Result<f64, AnalysisError> {
        let peak = self.curve()?.peak()?;
        debug!("{}: peak {peak}", self.name());
        Ok(peak)
    }

    fn compute_peak_position(&self) -> Result<f64, AnalysisError> {
        let peak = upstream(self.peak())?;
        self.curve()?.peak_position(peak)
    }

    fn compute_modulus(&self) -> Result<Modulus, AnalysisError> {
        let peak = upstream(self.peak())?;
        let modulus = self.curve()?.modulus(
            peak,
            self.config.modulus_lower_bound,
            self.config.modulus_upper_bound,
        )?;
        debug!(
            "{}: modulus {} through {:?} and {:?}",
            self.name(),
            modulus.slope,
            modulus.lower,
            modulus.upper
        );
        Ok(modulus)
    }

    fn compute_yield(&self) -> Result<Point, AnalysisError> {
        let modulus = upstream(self.modulus())?;
        let point = self.curve()?.offset_yield(&modulus, self.config.yield_offset)?;
        debug!("{}: yield at ({}, {})", self.name(), point.x, point.y);
        Ok(point)
    }

    /// Log a failed computation. Runs once per metric, on the computing call.
    fn logged<T>(&self, metric: Metric, result: Result<T, AnalysisError>) -> Result<T, AnalysisError> {
        if let Err(err) = &result {
            warn!("{}: {metric} failed: {err}", self.name());
        }
        result
    }

    fn finish<T>(&self, metric: Metric, result: Result<T, &AnalysisError>) -> Result<T, SpecimenError> {
        result.map_err(|source| SpecimenError {
            specimen: self.name().to_string(),
            metric,
            source: source.clone(),
        })
    }
}

/// Failure of a metric another one depends on, reduced to its cause.
fn upstream<T>(result: Result<T, SpecimenError>) -> Result<T, AnalysisError> {
    result.map_err(|err| err.source)
}
