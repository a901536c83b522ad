//! Plane geometry shared by room analysis and furniture placement
//!
//! All coordinates are room-local meters. The origin is the top-left corner of
//! the floor plan; `x` grows to the right and `y` grows down the plan.

use serde::Serialize;

/// Tolerance used for containment checks on computed coordinates
const EPSILON: f64 = 1e-9;

/// A 2D point in room coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Midpoint between this point and another
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered_on(center: Point, width: f64, height: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// The four corners, clockwise from the top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Check if this rectangle contains a point (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Check if another rectangle lies entirely inside this one
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// Check if this rectangle overlaps another; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expand(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2.0 * margin,
            self.height + 2.0 * margin,
        )
    }

    /// Same rectangle with width and height swapped, keeping the top-left corner
    pub fn transposed(&self) -> Rect {
        Rect::new(self.x, self.y, self.height, self.width)
    }

    /// Shift the rectangle so it lies inside `bounds` where possible.
    ///
    /// A rectangle larger than `bounds` along an axis is aligned to the
    /// bounds' leading edge on that axis.
    pub fn shifted_inside(&self, bounds: &Rect) -> Rect {
        let x = self.x.min(bounds.right() - self.width).max(bounds.x);
        let y = self.y.min(bounds.bottom() - self.height).max(bounds.y);
        Rect::new(x, y, self.width, self.height)
    }

    /// Check if every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Shortest distance from a point to the segment `a`–`b` (clamped projection)
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Check whether the segment `a`–`b` passes through the interior of `rect`.
///
/// Liang–Barsky clipping; a segment that only grazes an edge is not counted.
pub fn segment_intersects_rect(a: Point, b: Point, rect: &Rect) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, a.x - rect.x),
        (dx, rect.right() - a.x),
        (-dy, a.y - rect.y),
        (dy, rect.bottom() - a.y),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            if q <= 0.0 {
                return false;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 >= t1 {
            return false;
        }
    }
    true
}

/// Whole `step`s that fit in `extent`, so a grid can reach the far edge
pub fn steps_in(extent: f64, step: f64) -> usize {
    (extent / step + EPSILON).floor() as usize
}

/// Compass bearing in degrees (0 = top of the plan, clockwise) from one point to another
pub fn plan_bearing(from: Point, to: Point) -> f64 {
    let degrees = (to.x - from.x).atan2(-(to.y - from.y)).to_degrees();
    degrees.rem_euclid(360.0)
}
