//! Where things go on the dial face. Pure layout, no painting.

use crate::code::Digit;
use crate::geometry::{Geometry, Point};

pub const TEXT_INSET_FROM_BORDER: f64 = 40.0;
pub const HOLE_RADIUS: f64 = 40.0;
/// Angle of digit 0's hole at rest, measured with `x = r·sin`, `y = r·cos`
/// so that 180° is straight up.
pub const FIRST_HOLE_ANGLE: f64 = 180.0;
pub const HOLE_SPACING: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub digit: Digit,
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct DialFace {
    geometry: Geometry,
}

impl DialFace {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// Radius of the circle the hole centers sit on.
    pub fn ring_radius(&self) -> f64 {
        (self.geometry.radius - (TEXT_INSET_FROM_BORDER + HOLE_RADIUS)).max(0.0)
    }

    fn position(&self, angle_deg: f64) -> Point {
        let r = self.ring_radius();
        let rad = angle_deg.to_radians();
        Point::new(
            self.geometry.center.x + r * rad.sin(),
            self.geometry.center.y + r * rad.cos(),
        )
    }

    /// Finger holes of the plate, turned by `rotation` degrees.
    pub fn holes(&self, rotation: i32) -> impl Iterator<Item = Hole> + '_ {
        Digit::ALL.into_iter().map(move |digit| {
            let angle = FIRST_HOLE_ANGLE
                + f64::from(rotation)
                + HOLE_SPACING * f64::from(digit.value());
            Hole {
                digit,
                center: self.position(angle),
                radius: HOLE_RADIUS,
            }
        })
    }

    /// Digit labels printed under the plate. They never turn.
    pub fn labels(&self) -> impl Iterator<Item = (Digit, Point)> + '_ {
        self.holes(0).map(|hole| (hole.digit, hole.center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_ten_holes_on_the_ring() {
        let face = DialFace::new(Geometry::compute(Size::square(600)));
        assert_eq!(face.ring_radius(), 220.0);

        let holes: Vec<Hole> = face.holes(0).collect();
        assert_eq!(holes.len(), 10);
        for hole in &holes {
            let (dx, dy) = (hole.center.x - 300.0, hole.center.y - 300.0);
            assert!((dx.hypot(dy) - 220.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_sits_at_top_at_rest() {
        let face = DialFace::new(Geometry::compute(Size::square(600)));
        let zero = face.holes(0).next().unwrap();
        assert_eq!(zero.digit.value(), 0);
        assert_close(zero.center, Point::new(300.0, 80.0));
    }

    #[test]
    fn test_rotation_moves_holes_but_not_labels() {
        let face = DialFace::new(Geometry::compute(Size::square(600)));
        let turned: Vec<Hole> = face.holes(-90).collect();
        // pulled a quarter turn clockwise, digit 0 is now on the right
        assert_close(turned[0].center, Point::new(520.0, 300.0));

        let (digit, label) = face.labels().next().unwrap();
        assert_eq!(digit.value(), 0);
        assert_close(label, Point::new(300.0, 80.0));
    }

    #[test]
    fn test_tiny_widget_collapses_ring() {
        let face = DialFace::new(Geometry::compute(Size::square(100)));
        assert_eq!(face.ring_radius(), 0.0);
    }
}
