//! Movement orchestration: plans trajectories, keeps them on screen and
//! scrolls web targets into view before moving onto them.
//!
//! Everything here blocks the calling thread. Pointer position, screen
//! bounds and scroll state are re-queried whenever they are needed because
//! the surface can change between steps.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithm::strategy::{Trajectory, TrajectoryPolicy};
use crate::error::{CursorError, Result};
use crate::input::{InputInjector, SurfaceInspector};
use crate::models::config::CursorConfig;
use crate::models::point::Point;
use crate::motion::instruction::Instruction;

pub struct HumanCursor<P: TrajectoryPolicy, I: InputInjector> {
    policy: P,
    injector: I,
    surface: Option<Box<dyn SurfaceInspector>>,
    config: CursorConfig,
    /// Coin flips for wandering.
    rng: StdRng,
    sleeper: Box<dyn FnMut(Duration)>,
}

impl<P: TrajectoryPolicy, I: InputInjector> HumanCursor<P, I> {
    pub fn new(policy: P, injector: I, config: CursorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.rotate_left(32)),
            None => StdRng::from_entropy(),
        };
        Self {
            policy,
            injector,
            surface: None,
            config,
            rng,
            sleeper: Box::new(std::thread::sleep),
        }
    }

    /// Attaches a page inspector, enabling element lookup and scrolling.
    pub fn with_surface(mut self, surface: Box<dyn SurfaceInspector>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Replaces the blocking sleep used for pauses.
    pub fn with_sleeper(mut self, sleeper: impl FnMut(Duration) + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn follow<N: Instruction>(&mut self, instruction: &mut N) -> Result<()> {
        instruction.perform(self)
    }

    pub fn current_position(&self) -> Result<Point> {
        let (x, y) = self.injector.current_position()?;
        log::debug!("current_position: x={x} y={y}");
        Ok(Point::new(x, y))
    }

    fn pause(&mut self, label: &str, duration: Duration) {
        log::debug!("{label}: {}s", duration.as_secs_f64());
        (self.sleeper)(duration);
    }

    pub fn random_sleep(&mut self) {
        let duration = self.policy.sleep_duration();
        self.pause("random_sleep", duration);
    }

    pub fn random_click_sleep(&mut self) {
        let duration = self.policy.click_sleep_duration();
        self.pause("random_click_sleep", duration);
    }

    pub fn mouse_down(&mut self) -> Result<()> {
        log::debug!("mouse_down");
        self.injector.press_button()
    }

    pub fn mouse_up(&mut self) -> Result<()> {
        log::debug!("mouse_up");
        self.injector.release_button()
    }

    pub fn click(&mut self) -> Result<()> {
        log::debug!("click: started");
        self.random_sleep();
        self.mouse_down()?;
        self.random_click_sleep();
        self.mouse_up()?;
        log::debug!("click: finished");
        Ok(())
    }

    /// Moves to `to`, scrolling it into view first when needed.
    ///
    /// Returns the last executed point, or `None` for a zero-length move.
    pub fn move_to(&mut self, from: Point, to: Point) -> Result<Option<Point>> {
        self.move_with(from, to, true)
    }

    /// Like [`Self::move_to`] but never scrolls; off-screen targets are clamped.
    pub fn move_without_scroll(&mut self, from: Point, to: Point) -> Result<Option<Point>> {
        self.move_with(from, to, false)
    }

    fn move_with(
        &mut self,
        mut from: Point,
        mut to: Point,
        allow_scroll: bool,
    ) -> Result<Option<Point>> {
        log::debug!(
            "move: from=({}, {}) to=({}, {}) locator={:?}",
            from.x,
            from.y,
            to.x,
            to.y,
            to.locator
        );

        if allow_scroll && self.is_scroll_required(&to)? {
            log::debug!("move: scroll required");
            let locator = to.locator.clone().ok_or(CursorError::MissingLocator)?;
            let (offset_x, offset_y) = self.policy.screen_center_offsets();
            self.move_to_screen_center(offset_x, offset_y)?;
            self.scroll_to_element(&locator)?;

            let full_height = self.full_window_height()?;
            let current_bottom_y = full_height + self.scrolled_offset_y(false)?;
            to.y = full_height - (current_bottom_y - to.y);
            from = self.current_position()?;
        }

        match self.policy.trajectory(&from, &to) {
            Some(trajectory) => self.execute(trajectory),
            None => {
                log::debug!("move: zero distance, nothing to do");
                Ok(None)
            }
        }
    }

    /// Drives the injector through `trajectory` in order, clamping every
    /// point to the screen. Returns the last point executed.
    pub fn execute(&mut self, trajectory: Trajectory) -> Result<Option<Point>> {
        let bounds = self.injector.screen_bounds()?;
        let mut last = None;
        for point in trajectory {
            let point = point.clamped(bounds.max_x, bounds.max_y);
            let duration = point.duration.unwrap_or_default();
            log::debug!("point: {} {} {}", point.x, point.y, duration.as_secs_f64());
            self.injector.move_to(point.x, point.y, duration)?;
            last = Some(point);
        }
        Ok(last)
    }

    pub fn move_to_screen_center(&mut self, offset_x: f64, offset_y: f64) -> Result<Option<Point>> {
        let (center_x, center_y) = self.injector.screen_bounds()?.center();
        let center = Point::new(center_x + offset_x, center_y + offset_y);
        let from = self.current_position()?;
        self.move_with(from, center, false)
    }

    /// Idles around: each round a coin flip decides whether to wander once
    /// more. Always ends with one pause.
    pub fn random_wandering(&mut self) -> Result<()> {
        log::debug!("random_wandering: started");
        while self.rng.gen_bool(0.5) {
            let current = self.current_position()?;
            let destination = self.policy.wandering_destination(&current);
            self.random_sleep();
            self.move_without_scroll(current, destination)?;
        }
        log::debug!("random_wandering: finished");
        self.random_sleep();
        Ok(())
    }

    fn surface(&self) -> Result<&dyn SurfaceInspector> {
        self.surface
            .as_deref()
            .ok_or_else(|| CursorError::Surface("no surface inspector attached".to_string()))
    }

    /// Screen coordinates of an element's center, carrying its locator.
    pub fn element_center(&self, locator: &str) -> Result<Point> {
        let surface = self.surface()?;
        let rect = surface.bounding_box_of(locator)?;
        let chrome_height = surface.chrome_height()?;
        let (window_x, window_y) = surface.window_position()?;
        log::debug!("element_center: locator={locator} rect={rect:?} chrome={chrome_height}");

        let scale = self.config.scale_factor;
        let (center_x, center_y) = rect.center();
        let x = (center_x * scale).trunc() + window_x;
        let y = ((chrome_height + center_y) * scale).trunc() + window_y;
        Ok(Point::new(x, y).with_locator(locator))
    }

    /// Page scroll offset; with `bottom`, the offset of the viewport's lower edge.
    pub fn scrolled_offset_y(&self, bottom: bool) -> Result<f64> {
        let surface = self.surface()?;
        let offset = surface.scroll_offset_y()?;
        if bottom {
            return Ok(offset + surface.viewport_inner_height()?);
        }
        Ok(offset)
    }

    pub fn full_window_height(&self) -> Result<f64> {
        let surface = self.surface()?;
        Ok(surface.viewport_inner_height()? + surface.chrome_height()?)
    }

    /// Only targets below the screen on an inspected surface need scrolling.
    pub fn is_scroll_required(&self, point: &Point) -> Result<bool> {
        if self.surface.is_none() {
            return Ok(false);
        }
        Ok(point.y > self.injector.screen_bounds()?.max_y)
    }

    /// Scrolls until the element's center is above the viewport's lower edge.
    pub fn scroll_to_element(&mut self, locator: &str) -> Result<()> {
        let max_iterations = self.config.max_scroll_iterations;
        let mut iterations = 0usize;
        loop {
            let target_y = self.element_center(locator)?.y;
            let bottom_y = self.scrolled_offset_y(true)?;
            if target_y <= bottom_y {
                log::debug!("scroll_to_element: reached after {iterations} steps");
                return Ok(());
            }
            if iterations >= max_iterations {
                log::warn!("scroll_to_element: gave up locator={locator} target={target_y} bottom={bottom_y}");
                return Err(CursorError::ScrollDidNotConverge { iterations });
            }

            let amount = self.policy.scroll_increment();
            log::debug!("scroll_to_element: step={iterations} amount={amount} gap={}", target_y - bottom_y);
            self.injector.scroll_by(amount)?;
            iterations += 1;
            self.random_click_sleep();
        }
    }
}
