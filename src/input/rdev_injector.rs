//! Desktop input injection on top of rdev.
//!
//! rdev can synthesize events but cannot report where the pointer is, so
//! `RdevInjector::start` also spawns one hook thread (`hc-rdev-hook`) that
//! listens to global mouse moves and keeps the last seen position.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rdev::{Button, EventType};

use crate::error::{CursorError, Result};
use crate::input::InputInjector;
use crate::models::surface::ScreenBounds;

/// Shorter moves jump directly and then wait out their duration.
const MIN_TWEEN_DURATION: Duration = Duration::from_millis(100);
const TWEEN_HZ: f64 = 100.0;

pub struct RdevInjector {
    last_pos: Arc<Mutex<(f64, f64)>>,
    /// Wait inserted after every synthesized event.
    pause_between_actions: Duration,
}

impl RdevInjector {
    pub fn start(pause_between_actions: Duration) -> Result<Self> {
        let (width, height) = display_size()?;
        let last_pos = Arc::new(Mutex::new((width / 2.0, height / 2.0)));
        spawn_position_hook(last_pos.clone())?;
        log::info!(
            "rdev_injector: display={width}x{height} pause={}s",
            pause_between_actions.as_secs_f64()
        );
        Ok(Self {
            last_pos,
            pause_between_actions,
        })
    }

    fn send(&self, event: &EventType) -> Result<()> {
        rdev::simulate(event)
            .map_err(|e| CursorError::Injector(format!("simulate {event:?}: {e:?}")))?;
        if let EventType::MouseMove { x, y } = event {
            *lock_pos(&self.last_pos) = (*x, *y);
        }
        Ok(())
    }

    fn pause(&self) {
        if !self.pause_between_actions.is_zero() {
            std::thread::sleep(self.pause_between_actions);
        }
    }
}

impl InputInjector for RdevInjector {
    fn move_to(&mut self, x: f64, y: f64, duration: Duration) -> Result<()> {
        if duration < MIN_TWEEN_DURATION {
            self.send(&EventType::MouseMove { x, y })?;
            std::thread::sleep(duration);
        } else {
            let (start_x, start_y) = self.current_position()?;
            let steps = ((duration.as_secs_f64() * TWEEN_HZ).ceil() as u32).max(1);
            let step_sleep = duration / steps;
            for step in 1..=steps {
                let ratio = step as f64 / steps as f64;
                self.send(&EventType::MouseMove {
                    x: start_x + (x - start_x) * ratio,
                    y: start_y + (y - start_y) * ratio,
                })?;
                std::thread::sleep(step_sleep);
            }
        }
        self.pause();
        Ok(())
    }

    fn press_button(&mut self) -> Result<()> {
        self.send(&EventType::ButtonPress(Button::Left))?;
        self.pause();
        Ok(())
    }

    fn release_button(&mut self) -> Result<()> {
        self.send(&EventType::ButtonRelease(Button::Left))?;
        self.pause();
        Ok(())
    }

    fn scroll_by(&mut self, amount: i64) -> Result<()> {
        self.send(&EventType::Wheel {
            delta_x: 0,
            delta_y: amount,
        })?;
        self.pause();
        Ok(())
    }

    fn current_position(&self) -> Result<(f64, f64)> {
        Ok(*lock_pos(&self.last_pos))
    }

    fn screen_bounds(&self) -> Result<ScreenBounds> {
        let (width, height) = display_size()?;
        Ok(ScreenBounds::new(width, height))
    }
}

fn display_size() -> Result<(f64, f64)> {
    let (width, height) = rdev::display_size()
        .map_err(|e| CursorError::Injector(format!("display_size: {e:?}")))?;
    Ok((width as f64, height as f64))
}

fn lock_pos(pos: &Mutex<(f64, f64)>) -> std::sync::MutexGuard<'_, (f64, f64)> {
    pos.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs for the lifetime of the process; rdev offers no way to stop `listen`.
fn spawn_position_hook(last_pos: Arc<Mutex<(f64, f64)>>) -> Result<()> {
    std::thread::Builder::new()
        .name("hc-rdev-hook".to_string())
        .spawn(move || {
            if let Err(e) = rdev::listen(move |event| {
                if let EventType::MouseMove { x, y } = event.event_type {
                    *lock_pos(&last_pos) = (x, y);
                }
            }) {
                log::error!("rdev::listen error: {e:?}");
            }
        })
        .map_err(|e| CursorError::Injector(format!("failed to spawn rdev hook thread: {e}")))?;
    Ok(())
}
