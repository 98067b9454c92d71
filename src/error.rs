use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Download of {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Parser error: {0}")]
    Parser(String),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
