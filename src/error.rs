use std::path::PathBuf;

/// Failures surfaced by the cursor engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    #[error("element not found for locator `{0}`")]
    LocatorNotFound(String),

    #[error("scroll required but the target point has no locator")]
    MissingLocator,

    #[error("scrolling did not reach the target after {iterations} iterations")]
    ScrollDidNotConverge { iterations: usize },

    #[error("input injection failed: {0}")]
    Injector(String),

    #[error("surface query failed: {0}")]
    Surface(String),

    #[error("failed to read config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CursorError>;
