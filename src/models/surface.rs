//! Geometry reported by the input and surface collaborators.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of an element in logical page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingRect {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Largest addressable coordinate of the visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenBounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl ScreenBounds {
    pub fn new(max_x: f64, max_y: f64) -> Self {
        Self { max_x, max_y }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.max_x / 2.0, self.max_y / 2.0)
    }
}
