//! Mapping of values onto classes.

/// Returns the class index of `value` given ascending `boundaries`.
///
/// Each class includes both of its edges, so a value sitting exactly on an
/// edge shared by two classes goes to the lower one. Values outside
/// `boundaries[0]..=boundaries[last]` (including `NaN`) fall back to the
/// last class.
#[must_use]
pub fn assign_bin(value: f64, boundaries: &[f64]) -> usize {
    boundaries
        .windows(2)
        .position(|pair| pair[0] <= value && value <= pair[1])
        .unwrap_or_else(|| boundaries.len().saturating_sub(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKS: [f64; 4] = [1.0, 4.0, 7.0, 10.0];

    #[test]
    fn assigns_interior_value() {
        assert_eq!(assign_bin(5.0, &BREAKS), 1);
        assert_eq!(assign_bin(2.5, &BREAKS), 0);
        assert_eq!(assign_bin(8.0, &BREAKS), 2);
    }

    #[test]
    fn shared_edge_goes_to_lower_class() {
        assert_eq!(assign_bin(4.0, &BREAKS), 0);
        assert_eq!(assign_bin(7.0, &BREAKS), 1);
    }

    #[test]
    fn outer_edges_are_inclusive() {
        assert_eq!(assign_bin(1.0, &BREAKS), 0);
        assert_eq!(assign_bin(10.0, &BREAKS), 2);
    }

    #[test]
    fn out_of_range_falls_back_to_last_class() {
        assert_eq!(assign_bin(11.0, &BREAKS), 2);
        assert_eq!(assign_bin(-5.0, &BREAKS), 2);
        assert_eq!(assign_bin(f64::NAN, &BREAKS), 2);
    }

    #[test]
    fn collapsed_boundaries_use_first_class() {
        assert_eq!(assign_bin(4.0, &[4.0, 4.0, 4.0, 4.0]), 0);
    }

    #[test]
    fn every_in_range_value_gets_one_class() {
        for step in 0..=90 {
            let value = 1.0 + f64::from(step) * 0.1;
            let bin = assign_bin(value, &BREAKS);
            assert!(bin < BREAKS.len() - 1, "value {value} got bin {bin}");
            assert!(BREAKS[bin] <= value && value <= BREAKS[bin + 1] + 1e-9);
        }
    }
}
