/// Size a host lays the dial out at when it has no exact size to offer.
pub const DEFAULT_DIMENSION: i32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn square(side: i32) -> Self {
        Self::new(side, side)
    }
}

/// Center and radius of the dial disc for a given layout size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub center: Point,
    pub radius: f64,
}

impl Geometry {
    pub fn compute(size: Size) -> Self {
        let (w, h) = (size.width.max(0) as f64, size.height.max(0) as f64);
        Self {
            center: Point::new(w / 2.0, h / 2.0),
            radius: w.min(h) / 2.0,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let (dx, dy) = (point.x - self.center.x, point.y - self.center.y);
        dx.hypot(dy) <= self.radius
    }
}

impl From<Size> for Geometry {
    fn from(size: Size) -> Self {
        Self::compute(size)
    }
}
