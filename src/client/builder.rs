use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Request as ReqwestRequest, Response as ReqwestResponse};
use tower::layer::util::Identity;
use tower::{Layer, Service};

use crate::error::WechatError;

use super::reqwest_client::{
    MiddlewareExecutor, ReqwestClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};

const DEFAULT_USER_AGENT: &str = concat!("wechat-sdk/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ReqwestClient`]
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use wechat_sdk::client::ReqwestClient;
/// use wechat_sdk::middleware::LoggingMiddleware;
///
/// let client = ReqwestClient::builder()
///     .timeout(Duration::from_secs(10))
///     .with_middleware(LoggingMiddleware::new())
///     .build()
///     .unwrap();
/// ```
#[must_use]
pub struct ReqwestClientBuilder<M = Identity> {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
    headers: Vec<(String, String)>,
    layer: Option<M>,
}

impl Default for ReqwestClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            layer: None,
        }
    }
}

impl<M> std::fmt::Debug for ReqwestClientBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClientBuilder")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .field("headers", &self.headers)
            .field("layer", &self.layer.is_some())
            .finish()
    }
}

impl<M> ReqwestClientBuilder<M> {
    /// Total time allowed for one exchange. Default: 30 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Default: 10 seconds
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Default: `wechat-sdk/<version>`
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Header sent with every request
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Wrap every request in a tower layer, e.g. [`LoggingMiddleware`](crate::middleware::LoggingMiddleware).
    ///
    /// Replaces any layer set before; compose several with
    /// [`ServiceBuilder`](crate::middleware::ServiceBuilder).
    pub fn with_middleware<L>(self, layer: L) -> ReqwestClientBuilder<L>
    where
        L: Layer<ReqwestClient> + Clone + Send + Sync + 'static,
    {
        ReqwestClientBuilder {
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent: self.user_agent,
            headers: self.headers,
            layer: Some(layer),
        }
    }

    fn header_map(&self) -> Result<HeaderMap, WechatError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| WechatError::Config(format!("invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| WechatError::Config(format!("invalid value for {}: {}", name, e)))?;
            map.append(name, value);
        }

        Ok(map)
    }

    /// # Errors
    /// `WechatError::Config` for a zero timeout or an invalid default header,
    /// `WechatError::Http` when reqwest cannot initialize its TLS backend.
    pub fn build(self) -> Result<ReqwestClient, WechatError>
    where
        M: Layer<ReqwestClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(WechatError::Config("timeouts must be non-zero".to_string()));
        }

        let http = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(self.header_map()?)
            .build()?;

        let client = ReqwestClient::from_parts(http);

        Ok(match self.layer {
            Some(layer) => {
                let executor = layered_executor(layer.layer(client.clone()));
                client.with_middleware_executor(executor)
            }
            None => client,
        })
    }
}

/// Erases the layered service so `ReqwestClient` stays non-generic.
fn layered_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    Arc::new(move |request: ReqwestRequest| {
        let mut service = service.clone();
        Box::pin(async move { service.call(request).await })
    })
}
