pub mod algorithm;
pub mod error;
pub mod input;
pub mod models;
pub mod motion;

use std::path::Path;
use std::time::Duration;

use algorithm::strategy::HumanLikePolicy;
use error::Result;
use input::rdev_injector::RdevInjector;
use models::config::CursorConfig;
use motion::cursor::HumanCursor;
use motion::instruction::WanderAndClick;

/// Runs the desktop demo script. `config_path` points at a cursor.json;
/// defaults are used when it is absent.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    env_logger::init();

    let config = match config_path {
        Some(path) => CursorConfig::load(path)?,
        None => CursorConfig::default(),
    };
    let policy = match config.seed {
        Some(seed) => HumanLikePolicy::seeded(seed),
        None => HumanLikePolicy::from_entropy(),
    };
    let pause = Duration::from_secs_f64(config.pause_between_actions.max(0.0));
    let injector = RdevInjector::start(pause)?;

    let mut cursor = HumanCursor::new(policy, injector, config);
    cursor.follow(&mut WanderAndClick::default())
}
