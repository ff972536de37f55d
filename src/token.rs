//! Access tokens
//!
//! The facades never cache or refresh tokens. Callers either pass a token
//! string to `do_action`, or hand a [`TokenProvider`] to `do_with` and keep
//! whatever caching policy they need behind it.

use serde::{Deserialize, Serialize};

use crate::client::BoxFuture;
use crate::error::WechatError;

/// Token issued by `/cgi-bin/token` or `/cgi-bin/gettoken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(rename = "access_token")]
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Source of the access token used by `do_with`.
pub trait TokenProvider: Send + Sync {
    fn get_token(&self) -> BoxFuture<'_, Result<String, WechatError>>;
}

/// Provider returning a fixed, caller-managed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn get_token(&self) -> BoxFuture<'_, Result<String, WechatError>> {
        Box::pin(async move {
            if self.0.is_empty() {
                return Err(WechatError::Token("access token is empty".to_string()));
            }
            Ok(self.0.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_deserialize() {
        let token: AccessToken =
            serde_json::from_str(r#"{"access_token":"ACCESS_TOKEN","expires_in":7200}"#).unwrap();
        assert_eq!(
            token,
            AccessToken {
                token: "ACCESS_TOKEN".to_string(),
                expires_in: 7200,
            }
        );
    }

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("ACCESS_TOKEN");
        assert_eq!(provider.get_token().await.unwrap(), "ACCESS_TOKEN");
    }

    #[tokio::test]
    async fn test_static_token_empty() {
        let provider = StaticToken::new("");
        let result = provider.get_token().await;
        assert!(matches!(result, Err(WechatError::Token(_))));
    }
}
