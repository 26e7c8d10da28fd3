use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        url: String,
        reason: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("element is not attached to the document tree")]
    NotInTree,
    #[error("Config error: {0}")]
    Config(String),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn fetch(url: &str, reason: impl Into<String>) -> Self {
        Error::Fetch {
            url: url.to_string(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Error::Fetch {
            url: url.to_string(),
            reason: source.to_string(),
            source: Some(source),
        }
    }
}
