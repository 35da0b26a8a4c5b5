/// Curve analysis: peak, secant modulus and offset yield.
///
/// Architecture:
/// ```text
///   SpecimenRecord + AnalysisConfig
///        │
///        ▼
///   ┌──────────┐
///   │ specimen  │  lazy, memoized per metric (state)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  curve    │  project axes → peak → modulus → yield
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ geometry, search  │  line math, nearest-index lookup
///   └──────────────────┘
/// ```

pub mod curve;
pub mod geometry;
pub mod search;
pub mod specimen;
pub mod state;
