use std::cell::OnceCell;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Per-metric memoization
// ---------------------------------------------------------------------------

/// Where a single metric stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricState<'a, T> {
    Uncomputed,
    Computed(&'a T),
    Failed(&'a AnalysisError),
}

/// A metric computed at most once. Success and failure are both final: a
/// failed metric reports the same error on every later access without
/// running the computation again.
#[derive(Debug, Clone)]
pub struct Memo<T> {
    cell: OnceCell<Result<T, AnalysisError>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Memo {
            cell: OnceCell::new(),
        }
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored outcome, running `compute` first if there is none yet.
    pub fn get_or_compute<F>(&self, compute: F) -> Result<&T, &AnalysisError>
    where
        F: FnOnce() -> Result<T, AnalysisError>,
    {
        self.cell.get_or_init(compute).as_ref()
    }

    pub fn state(&self) -> MetricState<'_, T> {
        match self.cell.get() {
            None => MetricState::Uncomputed,
            Some(Ok(value)) => MetricState::Computed(value),
            Some(Err(err)) => MetricState::Failed(err),
        }
    }
}
