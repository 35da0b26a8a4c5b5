/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  delimited text (.Dat / .csv / .tsv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  skip headers, map columns → SpecimenRecord
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ SpecimenRecord  │  Vec<Sample>, cell issues
///   └────────────────┘
/// ```

pub mod loader;
pub mod model;
