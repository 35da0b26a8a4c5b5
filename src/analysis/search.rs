use crate::error::SearchError;

/// Index of the entry in `values` closest to `target`.
///
/// Scans in index order and stops at the first of:
/// * an entry equal to `target`, returned as is;
/// * a pair `values[i-1] < target < values[i]`, returning whichever of the
///   two is closer (the lower index on a tie).
///
/// Meant for non-decreasing data. On a curve that rises and falls the scan
/// still finds the first crossing on the rising side, which is what the
/// secant search relies on. A target that is never bracketed fails.
pub fn nearest_index(target: f64, values: &[f64]) -> Result<usize, SearchError> {
    for (i, &value) in values.iter().enumerate() {
        if value == target {
            return Ok(i);
        }
        if i > 0 {
            let below = values[i - 1];
            if below < target && target < value {
                let lower_err = (target - below).abs();
                let upper_err = (value - target).abs();
                return Ok(if lower_err <= upper_err { i - 1 } else { i });
            }
        }
    }
    Err(SearchError::ValueNotFound { target })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn sorted_with_target() -> impl Strategy<Value = (Vec<f64>, f64)> {
        proptest::collection::vec(-1e3_f64..1e3, 2..=50).prop_flat_map(|mut v| {
            v.sort_by(|a, b| a.total_cmp(b));
            let lo = v[0];
            let hi = v[v.len() - 1];
            let target = if hi > lo { (lo..hi).boxed() } else { Just(lo).boxed() };
            (Just(v), target)
        })
    }

    proptest! {
        #[test]
        fn nearest_is_no_worse_than_both_neighbors((values, target) in sorted_with_target()) {
            let idx = nearest_index(target, &values).unwrap();
            let dist = |i: usize| (values[i] - target).abs();
            let d = dist(idx);
            let worse_than_left = idx > 0 && dist(idx - 1) < d;
            let worse_than_right = idx + 1 < values.len() && dist(idx + 1) < d;
            prop_assert!(!(worse_than_left && worse_than_right),
                "index {idx} of {values:?} for {target}");
        }

        #[test]
        fn in_range_targets_are_found((values, target) in sorted_with_target()) {
            prop_assert!(nearest_index(target, &values).is_ok());
        }
    }
}
