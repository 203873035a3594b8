//! Construction parameters (cursor.json).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CursorError, Result};

fn default_pause_between_actions() -> f64 {
    0.011
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_max_scroll_iterations() -> usize {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CursorConfig {
    /// Seconds the injector waits after every injected event.
    #[serde(default = "default_pause_between_actions")]
    pub pause_between_actions: f64,
    /// Physical pixels per logical pixel (e.g. 1.25 for 125%).
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    /// Page the web-capable instructions start from.
    #[serde(default)]
    pub start_url: Option<String>,
    /// Upper bound on scroll steps while bringing a target into view.
    #[serde(default = "default_max_scroll_iterations")]
    pub max_scroll_iterations: usize,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        CursorConfig {
            pause_between_actions: default_pause_between_actions(),
            scale_factor: default_scale_factor(),
            start_url: None,
            max_scroll_iterations: default_max_scroll_iterations(),
            seed: None,
        }
    }
}

impl CursorConfig {
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("config: path={}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| CursorError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CursorError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config: CursorConfig = serde_json::from_str("{}").expect("parse empty config");
        assert_eq!(config, CursorConfig::default());
        assert!((config.pause_between_actions - 0.011).abs() < 1e-12);
        assert_eq!(config.max_scroll_iterations, 100);
    }

    #[test]
    fn reads_camel_case_fields() {
        let raw = r#"{
            "pauseBetweenActions": 0.05,
            "scaleFactor": 1.25,
            "startUrl": "https://www.autodraw.com/",
            "maxScrollIterations": 12,
            "seed": 42
        }"#;
        let config: CursorConfig = serde_json::from_str(raw).expect("parse config");
        assert_eq!(config.scale_factor, 1.25);
        assert_eq!(config.start_url.as_deref(), Some("https://www.autodraw.com/"));
        assert_eq!(config.max_scroll_iterations, 12);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/cursor.json");
        let err = CursorConfig::load(path).expect_err("missing file must fail");
        assert!(matches!(err, CursorError::Config { .. }));
        assert!(err.to_string().contains("cursor.json"));
    }
}
