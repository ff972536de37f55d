use thiserror::Error;

/// WeChat SDK error types
#[derive(Debug, Error)]
pub enum WechatError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure reported by a custom [`HttpClient`](crate::client::HttpClient)
    #[error("transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-zero `errcode` in the response envelope
    #[error("{code}|{message}")]
    Api { code: i64, message: String },

    #[error("Access token error: {0}")]
    Token(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Decryption error: {0}")]
    Crypto(String),

    #[error("Signature verification failed: {0}")]
    Signature(String),
}

impl WechatError {
    /// Returns the platform error code for [`WechatError::Api`] errors.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            WechatError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
