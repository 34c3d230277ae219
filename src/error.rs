use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("API request failed: {0}")]
    Api(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to fetch {feed}: {reason}")]
    Upstream { feed: &'static str, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DashError {
    pub fn upstream(feed: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Upstream {
            feed,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
