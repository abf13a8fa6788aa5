//! Mapping from the display sequence to screen coordinates.
//!
//! The temperature axis is fixed at [20, 50] degrees regardless of the
//! data; values outside that band map off-canvas rather than clamping.
//! The x axis runs oldest (index 0, left) to newest (last index, right).

use crate::display::DisplayPoint;

/// Bottom of the fixed temperature axis, in degrees Celsius.
pub const AXIS_MIN_TEMP: f64 = 20.0;

/// Top of the fixed temperature axis, in degrees Celsius.
pub const AXIS_MAX_TEMP: f64 = 50.0;

/// Pointer distance, in pixels, beyond which hit-testing gives up.
pub const HIT_THRESHOLD_PX: f64 = 20.0;

/// Horizontal position for a sequence index.
///
/// Index 0 lands on the left edge and the last index on the right edge.
/// A one-point sequence is centered; an empty sequence (or an index past
/// the end) has no position.
#[must_use]
pub fn x_for_index(index: usize, len: usize, width: f64) -> Option<f64> {
    if index >= len {
        return None;
    }
    if len == 1 {
        return Some(width / 2.0);
    }
    Some(width * index as f64 / (len - 1) as f64)
}

/// Vertical position for a temperature.
///
/// Linear [`AXIS_MIN_TEMP`, `AXIS_MAX_TEMP`] -> [height, 0]; values
/// outside the axis are NOT clamped and map outside [0, height].
#[must_use]
pub fn y_for_temperature(temperature: f64, height: f64) -> f64 {
    let fraction = (temperature - AXIS_MIN_TEMP) / (AXIS_MAX_TEMP - AXIS_MIN_TEMP);
    height * (1.0 - fraction)
}

/// Screen coordinates for the whole sequence, visited in display order.
#[must_use]
pub fn polyline(points: &[DisplayPoint], width: f64, height: f64) -> Vec<(f64, f64)> {
    let len = points.len();
    points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| {
            let x = x_for_index(index, len, width)?;
            Some((x, y_for_temperature(point.temperature, height)))
        })
        .collect()
}

/// Index of the point nearest to the pointer on the x axis.
///
/// Distance is horizontal only. Comparison is strict, so on an exact tie
/// the earlier point wins. Returns `None` when the nearest point is at
/// least [`HIT_THRESHOLD_PX`] away or the sequence is empty.
#[must_use]
pub fn hit_test(xs: &[f64], pointer_x: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &x) in xs.iter().enumerate() {
        let distance = (x - pointer_x).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.and_then(|(index, distance)| (distance < HIT_THRESHOLD_PX).then_some(index))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;
    use crate::display::DisplayPoint;
    use therm_proto::ReadingId;

    fn point(index: usize, temperature: f64) -> DisplayPoint {
        DisplayPoint {
            index,
            temperature,
            time_label: "12:00:00".to_owned(),
            reading_id: ReadingId::new(index as i64 + 1),
            device_id: "test".to_owned(),
        }
    }

    // ===================
    // Horizontal scale
    // ===================

    #[test_case(0, 3, 90.0 => Some(0.0); "oldest on the left edge")]
    #[test_case(2, 3, 90.0 => Some(90.0); "newest on the right edge")]
    #[test_case(1, 3, 90.0 => Some(45.0); "interior point interpolates")]
    #[test_case(0, 1, 90.0 => Some(45.0); "single point is centered")]
    #[test_case(0, 0, 90.0 => None; "empty sequence has no positions")]
    #[test_case(3, 3, 90.0 => None; "index past the end has no position")]
    fn x_scale(index: usize, len: usize, width: f64) -> Option<f64> {
        x_for_index(index, len, width)
    }

    // ===================
    // Vertical scale
    // ===================

    #[test]
    fn test_y_scale_endpoints() {
        assert!((y_for_temperature(AXIS_MIN_TEMP, 300.0) - 300.0).abs() < f64::EPSILON);
        assert!(y_for_temperature(AXIS_MAX_TEMP, 300.0).abs() < f64::EPSILON);
        assert!((y_for_temperature(35.0, 300.0) - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_y_scale_does_not_clamp() {
        // Off-axis temperatures land off-canvas.
        assert!(y_for_temperature(65.0, 300.0) < 0.0);
        assert!(y_for_temperature(5.0, 300.0) > 300.0);
    }

    // ===================
    // Polyline
    // ===================

    #[test]
    fn test_polyline_visits_points_in_order() {
        let points = vec![point(0, 20.0), point(1, 35.0), point(2, 50.0)];

        let path = polyline(&points, 100.0, 300.0);

        assert_eq!(path.len(), 3);
        assert!((path[0].0 - 0.0).abs() < f64::EPSILON);
        assert!((path[1].0 - 50.0).abs() < f64::EPSILON);
        assert!((path[2].0 - 100.0).abs() < f64::EPSILON);
        // x strictly increases left to right.
        assert!(path[0].0 < path[1].0 && path[1].0 < path[2].0);
        assert!((path[0].1 - 300.0).abs() < f64::EPSILON);
        assert!(path[2].1.abs() < f64::EPSILON);
    }

    #[test]
    fn test_polyline_empty_sequence() {
        assert!(polyline(&[], 100.0, 300.0).is_empty());
    }

    // ===================
    // Hit-testing
    // ===================

    #[test]
    fn test_hit_test_picks_nearest() {
        let xs = [0.0, 50.0, 100.0];
        assert_eq!(hit_test(&xs, 49.0), Some(1));
        assert_eq!(hit_test(&xs, 95.0), Some(2));
    }

    #[test]
    fn test_hit_test_rejects_far_pointer() {
        let xs = [0.0, 50.0, 100.0];
        // Nearest point is 30 px away.
        assert_eq!(hit_test(&xs, 130.0), None);
    }

    #[test]
    fn test_hit_test_threshold_is_strict() {
        let xs = [100.0];
        assert_eq!(hit_test(&xs, 120.0), None);
        assert_eq!(hit_test(&xs, 119.9), Some(0));
    }

    #[test]
    fn test_hit_test_tie_goes_to_first_point() {
        let xs = [40.0, 60.0];
        assert_eq!(hit_test(&xs, 50.0), Some(0));
    }

    #[test]
    fn test_hit_test_empty() {
        assert_eq!(hit_test(&[], 10.0), None);
    }

    proptest! {
        #[test]
        fn prop_hit_test_minimizes_distance(
            xs in prop::collection::vec(0.0f64..1000.0, 0..40),
            pointer in -100.0f64..1100.0
        ) {
            match hit_test(&xs, pointer) {
                Some(found) => {
                    let found_distance = (xs[found] - pointer).abs();
                    prop_assert!(found_distance < HIT_THRESHOLD_PX);
                    for (i, &x) in xs.iter().enumerate() {
                        let distance = (x - pointer).abs();
                        if i < found {
                            prop_assert!(distance > found_distance);
                        } else {
                            prop_assert!(distance >= found_distance);
                        }
                    }
                }
                None => {
                    for &x in &xs {
                        prop_assert!((x - pointer).abs() >= HIT_THRESHOLD_PX);
                    }
                }
            }
        }
    }
}
