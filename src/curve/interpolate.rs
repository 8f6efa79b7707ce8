//! Piecewise linear interpolation of cost curves onto whole ownership years

use super::point::ControlPoint;

/// Expand sparse control points into one cost per year `0..length`.
///
/// - no points: all zeros
/// - one point: that cost for every year
/// - otherwise: linear between the bracketing pair of points, and linear
///   extrapolation along the first/last segment outside the covered years
///
/// Points are sorted on a working copy. The sort is stable, so points sharing
/// a year keep their supplied order, but callers should not rely on which of
/// them wins.
pub fn interpolate(points: &[ControlPoint], length: usize) -> Vec<f64> {
    match points {
        [] => vec![0.0; length],
        [only] => vec![only.cost; length],
        _ => {
            let mut sorted = points.to_vec();
            sorted.sort_by_key(|p| p.year);

            (0..length)
                .map(|year| {
                    let (left, right) = bracket(&sorted, year as u64);
                    value_at(left, right, year as f64)
                })
                .collect()
        }
    }
}

/// Find the segment `(left, right)` with `left.year <= year < right.year`,
/// falling back to the first or last segment outside the covered range.
///
/// `sorted` must hold at least two points in ascending year order.
fn bracket(sorted: &[ControlPoint], year: u64) -> (&ControlPoint, &ControlPoint) {
    let n = sorted.len();
    // Number of points at or before this year
    let pos = sorted.partition_point(|p| u64::from(p.year) <= year);

    let right = if pos == 0 {
        1
    } else if pos >= n {
        n - 1
    } else {
        pos
    };

    (&sorted[right - 1], &sorted[right])
}

fn value_at(left: &ControlPoint, right: &ControlPoint, year: f64) -> f64 {
    if left.year == right.year {
        return left.cost;
    }

    let left_year = f64::from(left.year);
    let t = (year - left_year) / (f64::from(right.year) - left_year);
    left.cost + t * (right.cost - left.cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn points(pairs: &[(u32, f64)]) -> Vec<ControlPoint> {
        pairs.iter().map(|&(y, c)| ControlPoint::new(y, c)).collect()
    }

    #[test]
    fn test_no_points_gives_zeros() {
        for n in [0, 1, 7, 20] {
            let values = interpolate(&[], n);
            assert_eq!(values.len(), n);
            assert!(values.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn test_single_point_is_constant() {
        let values = interpolate(&points(&[(3, 1234.5)]), 6);
        assert_eq!(values, vec![1234.5; 6]);
    }

    #[test]
    fn test_zero_length_is_empty() {
        assert!(interpolate(&points(&[(0, 1.0), (5, 2.0)]), 0).is_empty());
    }

    #[test]
    fn test_midpoint_and_endpoints() {
        let values = interpolate(&points(&[(0, 100.0), (10, 200.0)]), 11);
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 100.0);
        assert_eq!(values[5], 150.0);
        assert_eq!(values[10], 200.0);
    }

    #[test]
    fn test_unsorted_points_are_sorted_first() {
        let sorted = interpolate(&points(&[(0, 1000.0), (5, 2000.0), (10, 3500.0)]), 12);
        let shuffled = interpolate(&points(&[(10, 3500.0), (0, 1000.0), (5, 2000.0)]), 12);
        assert_eq!(sorted, shuffled);
    }

    #[test]
    fn test_caller_order_untouched() {
        let input = points(&[(10, 3500.0), (0, 1000.0)]);
        let _ = interpolate(&input, 4);
        assert_eq!(input[0].year, 10);
    }

    #[test]
    fn test_extrapolates_past_last_point() {
        // Final segment slope is 300/year
        let values = interpolate(&points(&[(0, 1000.0), (5, 2000.0), (10, 3500.0), (15, 5000.0)]), 20);
        assert_relative_eq!(values[15], 5000.0);
        assert_relative_eq!(values[17], 5600.0);
        assert_relative_eq!(values[19], 6200.0);
    }

    #[test]
    fn test_extrapolates_below_first_point() {
        let values = interpolate(&points(&[(2, 200.0), (4, 400.0)]), 3);
        assert_relative_eq!(values[0], 0.0);
        assert_relative_eq!(values[1], 100.0);
        assert_relative_eq!(values[2], 200.0);
    }

    #[test]
    fn test_identical_years_are_flat() {
        let values = interpolate(&points(&[(3, 500.0), (3, 900.0)]), 6);
        assert!(values.iter().all(|&v| v == 500.0));
    }

    #[test]
    fn test_piecewise_segments() {
        let values = interpolate(&points(&[(0, 14000.0), (5, 11000.0), (15, 6500.0)]), 15);
        assert_relative_eq!(values[1], 13400.0);
        assert_relative_eq!(values[5], 11000.0);
        assert_relative_eq!(values[6], 10550.0);
        assert_relative_eq!(values[14], 6950.0);
    }

    #[test]
    fn test_monotonic_between_two_points() {
        let rising = interpolate(&points(&[(2, 100.0), (8, 700.0)]), 10);
        assert!(rising[2..=8].windows(2).all(|w| w[0] <= w[1]));

        let falling = interpolate(&points(&[(2, 700.0), (8, 100.0)]), 10);
        assert!(falling[2..=8].windows(2).all(|w| w[0] >= w[1]));
    }
}
