//! The host engine's 2-D point.

use glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostPoint(DVec2);

impl HostPoint {
    pub fn new(x: f64, y: f64) -> Self {
        HostPoint(DVec2::new(x, y))
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn add(&self, other: &HostPoint) -> HostPoint {
        HostPoint(self.0 + other.0)
    }

    pub fn subtract(&self, other: &HostPoint) -> HostPoint {
        HostPoint(self.0 - other.0)
    }

    pub fn length(&self) -> f64 {
        self.0.length()
    }

    pub fn distance(a: &HostPoint, b: &HostPoint) -> f64 {
        a.0.distance(b.0)
    }

    /// Point between `a` and `b`: `a` at `f = 1`, `b` at `f = 0`.
    pub fn interpolate(a: &HostPoint, b: &HostPoint, f: f64) -> HostPoint {
        HostPoint(b.0.lerp(a.0, f))
    }

    pub fn polar(length: f64, angle: f64) -> HostPoint {
        HostPoint::new(length * angle.cos(), length * angle.sin())
    }

    /// Scales to `length`. A zero vector stays zero.
    pub fn normalize(&mut self, length: f64) {
        let current = self.length();
        if current > 0.0 {
            self.0 *= length / current;
        }
    }

    pub fn offset(&mut self, dx: f64, dy: f64) {
        self.0 += DVec2::new(dx, dy);
    }

    /// Component equality; NaN components never compare equal.
    pub fn equals(&self, other: &HostPoint) -> bool {
        self.0.x == other.0.x && self.0.y == other.0.y
    }
}
