//! Geometry primitives shared by the curve engine, the policy and the cursor.

use std::time::Duration;

use rand::Rng;

/// A 2D screen coordinate with optional pacing and element reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Time the injector should spend travelling to this point.
    pub duration: Option<Duration>,
    /// Element reference used to re-resolve the point after scrolling.
    pub locator: Option<String>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            duration: None,
            locator: None,
        }
    }

    pub fn with_duration(self, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..self
        }
    }

    pub fn with_locator(self, locator: impl Into<String>) -> Self {
        Self {
            locator: Some(locator.into()),
            ..self
        }
    }

    /// Point halfway between `a` and `b`. Pacing and locator are not carried over.
    pub fn midpoint(a: &Point, b: &Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    /// Euclidean distance.
    pub fn distance(a: &Point, b: &Point) -> f64 {
        (b.x - a.x).hypot(b.y - a.y)
    }

    /// New point offset by independent uniform draws in
    /// `[-max_offset_x, max_offset_x]` and `[-max_offset_y, max_offset_y]`.
    ///
    /// Panics when a bound is not finite.
    pub fn jittered<R: Rng>(
        &self,
        rng: &mut R,
        max_offset_x: f64,
        max_offset_y: f64,
    ) -> Point {
        assert!(
            max_offset_x.is_finite() && max_offset_y.is_finite(),
            "jitter bounds must be finite: ({max_offset_x}, {max_offset_y})"
        );
        let bound_x = max_offset_x.abs();
        let bound_y = max_offset_y.abs();
        let offset_x = rng.gen_range(-bound_x..=bound_x);
        let offset_y = rng.gen_range(-bound_y..=bound_y);
        Point::new(self.x + offset_x, self.y + offset_y)
    }

    /// Copy of the point pulled into `[0, max_x] x [0, max_y]`.
    pub fn clamped(&self, max_x: f64, max_y: f64) -> Point {
        Point {
            x: self.x.clamp(0.0, max_x.max(0.0)),
            y: self.y.clamp(0.0, max_y.max(0.0)),
            ..self.clone()
        }
    }
}
