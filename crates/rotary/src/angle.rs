//! Drag step to rotation delta.
//!
//! Each drag step is measured as the angle between two rays leaving the dial
//! center: one through the previous touch point and one through the current
//! one. The angle comes from the slopes of both rays,
//! `tan θ = (m2 - m1) / (1 + m1·m2)`, so it is only meaningful for small steps
//! (|θ| < 90°), which is what a stream of pointer-move events delivers.

use crate::geometry::Point;

/// Slope of the ray from `center` through `point`, `None` when the ray is vertical.
fn slope(center: Point, point: Point) -> Option<f64> {
    let dx = point.x - center.x;
    if dx == 0.0 {
        return None;
    }
    Some((point.y - center.y) / dx)
}

/// Signed rotation in whole degrees (truncated toward zero) from the ray through
/// `previous` to the ray through `current`.
///
/// In screen coordinates (y grows downward) a clockwise drag yields a negative
/// delta. Returns `None` when either ray is vertical or the two rays are
/// perpendicular, since the slope formula has no finite answer there; callers
/// treat that as no rotation for this step.
pub fn rotation_delta(center: Point, previous: Point, current: Point) -> Option<i32> {
    let m1 = slope(center, current)?;
    let m2 = slope(center, previous)?;

    let tan_theta = (m2 - m1) / (1.0 + m1 * m2);
    if !tan_theta.is_finite() {
        return None;
    }

    Some(tan_theta.atan().to_degrees() as i32)
}

/// Decides whether a delta may be applied to the current rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_rotation_bound: i32,
}

impl RotationPolicy {
    pub fn new(max_rotation_bound: i32) -> Self {
        Self { max_rotation_bound }
    }

    /// The rotation after applying `delta`, or `None` if the step is rejected.
    ///
    /// The dial only turns away from rest (non-positive angles) and never
    /// reaches the bound. A zero delta is rejected so the caller keeps its
    /// reference point and small movements accumulate.
    pub fn accept(&self, current: i32, delta: i32) -> Option<i32> {
        if delta == 0 {
            return None;
        }
        let candidate = current.saturating_add(delta);
        (candidate.abs() < self.max_rotation_bound && candidate <= 0).then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Point = Point { x: 0.0, y: 0.0 };

    #[test]
    fn test_clockwise_drag_is_negative() {
        let delta = rotation_delta(CENTER, Point::new(100.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(delta, Some(-45));
    }

    #[test]
    fn test_counter_clockwise_drag_is_positive() {
        let delta = rotation_delta(CENTER, Point::new(100.0, 100.0), Point::new(100.0, 0.0));
        assert_eq!(delta, Some(45));
    }

    #[test]
    fn test_delta_truncates_toward_zero() {
        // atan(0.5) is ~26.57 degrees
        let delta = rotation_delta(CENTER, Point::new(100.0, 0.0), Point::new(100.0, 50.0));
        assert_eq!(delta, Some(-26));
        let delta = rotation_delta(CENTER, Point::new(100.0, 50.0), Point::new(100.0, 0.0));
        assert_eq!(delta, Some(26));
    }

    #[test]
    fn test_delta_is_relative_to_center() {
        let center = Point::new(300.0, 300.0);
        let delta = rotation_delta(center, Point::new(400.0, 300.0), Point::new(400.0, 400.0));
        assert_eq!(delta, Some(-45));
    }

    #[test]
    fn test_vertical_ray_is_rejected() {
        assert_eq!(
            rotation_delta(CENTER, Point::new(100.0, 0.0), Point::new(0.0, 100.0)),
            None
        );
        assert_eq!(
            rotation_delta(CENTER, Point::new(0.0, -50.0), Point::new(100.0, 0.0)),
            None
        );
    }

    #[test]
    fn test_perpendicular_rays_are_rejected() {
        let delta = rotation_delta(CENTER, Point::new(100.0, 100.0), Point::new(-100.0, 100.0));
        assert_eq!(delta, None);
    }

    #[test]
    fn test_policy_accepts_pull_within_bound() {
        let policy = RotationPolicy::new(340);
        assert_eq!(policy.accept(0, -30), Some(-30));
        assert_eq!(policy.accept(-300, -39), Some(-339));
        assert_eq!(policy.accept(-100, 40), Some(-60));
        assert_eq!(policy.accept(-40, 40), Some(0));
    }

    #[test]
    fn test_policy_rejects_past_rest_and_bound() {
        let policy = RotationPolicy::new(340);
        assert_eq!(policy.accept(0, 10), None);
        assert_eq!(policy.accept(-5, 10), None);
        assert_eq!(policy.accept(-330, -10), None);
        assert_eq!(policy.accept(-339, -45), None);
    }

    #[test]
    fn test_policy_rejects_zero_delta() {
        let policy = RotationPolicy::new(340);
        assert_eq!(policy.accept(-100, 0), None);
        assert_eq!(policy.accept(0, 0), None);
    }
}
