//! Boundary computation for the two classification strategies.
//!
//! Both strategies return `num_classes + 1` breakpoints whose first entry is
//! the minimum value and whose last entry is the maximum value.

use choropleth_classify_models::{Boundaries, ClassMethod};

/// Computes boundaries with the given strategy.
///
/// Returns `None` if `values` is empty or `num_classes` is zero.
#[must_use]
pub fn compute(method: ClassMethod, values: &[f64], num_classes: usize) -> Option<Boundaries> {
    match method {
        ClassMethod::EqualInterval => equal_interval(values, num_classes),
        ClassMethod::Quantile => quantile(values, num_classes),
    }
}

/// Splits `min..=max` into `num_classes` slices of equal width.
///
/// When every value is identical all breakpoints collapse onto that value.
/// Returns `None` if `values` is empty or `num_classes` is zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
pub fn equal_interval(values: &[f64], num_classes: usize) -> Option<Boundaries> {
    if values.is_empty() || num_classes == 0 {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / num_classes as f64;

    let breaks = (0..=num_classes)
        .map(|i| {
            // Pin the top edge so accumulated rounding never leaves the
            // maximum outside the last class.
            if i == num_classes {
                max
            } else {
                min + i as f64 * step
            }
        })
        .collect();

    Some(Boundaries::new(breaks))
}

/// Picks breakpoints at evenly spaced ranks of the sorted values.
///
/// Breakpoint `i` is the value at rank `floor(i * len / num_classes)`,
/// clamped to the last rank. Asking for more classes than there are values
/// yields repeated breakpoints rather than an error.
/// Returns `None` if `values` is empty or `num_classes` is zero.
#[must_use]
pub fn quantile(values: &[f64], num_classes: usize) -> Option<Boundaries> {
    if values.is_empty() || num_classes == 0 {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let len = sorted.len();

    let breaks = (0..=num_classes)
        .map(|i| sorted[(i * len / num_classes).min(len - 1)])
        .collect();

    Some(Boundaries::new(breaks))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_TO_TEN: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

    fn is_non_decreasing(breaks: &[f64]) -> bool {
        breaks.windows(2).all(|pair| pair[0] <= pair[1])
    }

    #[test]
    fn equal_interval_one_to_ten_in_three() {
        let breaks = equal_interval(&ONE_TO_TEN, 3).unwrap();
        assert_eq!(breaks.as_slice(), &[1.0, 4.0, 7.0, 10.0]);
    }

    #[test]
    fn quantile_one_to_ten_in_four() {
        let breaks = quantile(&ONE_TO_TEN, 4).unwrap();
        assert_eq!(breaks.as_slice(), &[1.0, 3.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn quantile_sorts_before_ranking() {
        let shuffled = [8.0, 3.0, 10.0, 1.0, 6.0, 4.0, 9.0, 2.0, 7.0, 5.0];
        let breaks = quantile(&shuffled, 4).unwrap();
        assert_eq!(breaks.as_slice(), &[1.0, 3.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn quantile_with_more_classes_than_values() {
        let breaks = quantile(&[5.0, 1.0, 3.0], 6).unwrap();
        assert_eq!(breaks.as_slice(), &[1.0, 1.0, 3.0, 3.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn equal_interval_degenerate_range() {
        let breaks = equal_interval(&[4.0, 4.0, 4.0], 3).unwrap();
        assert_eq!(breaks.as_slice(), &[4.0, 4.0, 4.0, 4.0]);
    }

    #[test]
    fn breakpoints_span_min_to_max() {
        let samples: [&[f64]; 4] = [
            &[0.3, 12.7, 5.5, 99.1, 42.0],
            &[-3.0, -1.5, 2.25],
            &[7.0],
            &[1e6, 0.1, 333.3, 0.1, 1e6],
        ];

        for values in samples {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            for n in 1..=6 {
                for method in ClassMethod::all() {
                    let breaks = compute(*method, values, n).unwrap();
                    let breaks = breaks.as_slice();
                    assert_eq!(breaks.len(), n + 1, "{method} {values:?} n={n}");
                    assert_eq!(breaks[0], min, "{method} {values:?} n={n}");
                    assert_eq!(breaks[n], max, "{method} {values:?} n={n}");
                    assert!(is_non_decreasing(breaks), "{method} {values:?} n={n}");
                }

                let quantiles = quantile(values, n).unwrap();
                assert!(quantiles.as_slice().iter().all(|b| values.contains(b)));
            }
        }
    }

    #[test]
    #[allow(clippy::cast_precision_loss, clippy::suboptimal_flops)]
    fn interior_edges_are_min_plus_multiples_of_step() {
        let values = [0.1, 0.35, 0.7];
        let breaks = equal_interval(&values, 7).unwrap();
        let step = (0.7 - 0.1) / 7.0;

        for (i, edge) in breaks.as_slice()[..7].iter().enumerate() {
            assert_eq!(*edge, 0.1 + i as f64 * step);
        }
        assert_eq!(breaks.as_slice()[7], 0.7);
    }

    #[test]
    fn rejects_empty_input_and_zero_classes() {
        assert!(equal_interval(&[], 3).is_none());
        assert!(quantile(&[], 3).is_none());
        assert!(equal_interval(&ONE_TO_TEN, 0).is_none());
        assert!(quantile(&ONE_TO_TEN, 0).is_none());
    }
}
