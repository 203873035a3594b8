//! Capabilities the cursor drives but does not implement itself.

pub mod rdev_injector;

use std::time::Duration;

use crate::error::Result;
use crate::models::surface::{BoundingRect, ScreenBounds};

/// Moves the hardware pointer and presses its buttons.
pub trait InputInjector {
    /// Moves to `(x, y)`, taking `duration` to get there. Blocks until done.
    fn move_to(&mut self, x: f64, y: f64, duration: Duration) -> Result<()>;
    fn press_button(&mut self) -> Result<()>;
    fn release_button(&mut self) -> Result<()>;
    /// Scrolls the wheel by `amount` clicks.
    fn scroll_by(&mut self, amount: i64) -> Result<()>;
    fn current_position(&self) -> Result<(f64, f64)>;
    fn screen_bounds(&self) -> Result<ScreenBounds>;
}

/// Answers geometry questions about a rendered page.
///
/// Every call reflects the live page; results must not be cached across a scroll.
pub trait SurfaceInspector {
    /// Fails with [`crate::error::CursorError::LocatorNotFound`] when nothing matches.
    fn bounding_box_of(&self, locator: &str) -> Result<BoundingRect>;
    fn scroll_offset_y(&self) -> Result<f64>;
    fn viewport_inner_height(&self) -> Result<f64>;
    /// Height of the browser UI above the content area.
    fn chrome_height(&self) -> Result<f64>;
    fn window_position(&self) -> Result<(f64, f64)>;
}
