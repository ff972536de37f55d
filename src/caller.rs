//! Action execution shared by the product facades.

use std::sync::Arc;

use log::{debug, warn};

use crate::action::Action;
use crate::client::{HttpClient, RequestOptions};
use crate::error::WechatError;
use crate::middleware::redact_url;
use crate::token::TokenProvider;
use crate::types::Envelope;

/// Executes [`Action`]s against one API host.
///
/// Holds no token state; every call receives its access token explicitly.
#[derive(Clone)]
pub struct Caller {
    client: Arc<dyn HttpClient>,
    base_url: String,
}

impl std::fmt::Debug for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Caller")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Caller {
    pub fn new(client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &dyn HttpClient {
        self.client.as_ref()
    }

    pub fn set_client(&mut self, client: Arc<dyn HttpClient>) {
        self.client = client;
    }

    /// Points the caller at another host, e.g. a mock server.
    ///
    /// # Errors
    /// Returns `WechatError::Config` unless `base_url` is an http(s) URL.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<(), WechatError> {
        let base_url = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WechatError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }

        self.base_url = base_url;
        Ok(())
    }

    /// Executes `action` with `access_token` and the default request options.
    pub async fn do_action<T>(&self, access_token: &str, action: Action<T>) -> Result<T, WechatError> {
        self.do_action_with_options(access_token, action, &RequestOptions::default())
            .await
    }

    /// Executes `action`.
    ///
    /// Upload actions go through [`HttpClient::upload`], everything else
    /// through [`HttpClient::request`]. Transport errors are returned as-is.
    /// A response envelope with a non-zero `errcode` becomes
    /// [`WechatError::Api`] and the decoder is not run.
    pub async fn do_action_with_options<T>(
        &self,
        access_token: &str,
        action: Action<T>,
        options: &RequestOptions,
    ) -> Result<T, WechatError> {
        let url = action.url(&self.base_url, access_token);

        debug!("[wechat] {} {}", action.method(), redact_url(&url));

        let response = match action.upload_form() {
            Some(form) => {
                let form = form.load(self.client.as_ref()).await?;
                self.client.upload(&url, form, options).await?
            }
            None => {
                let body = action.body()?;
                self.client
                    .request(action.method().clone(), &url, body, options)
                    .await?
            }
        };

        if let Some(envelope) = Envelope::parse(&response) {
            if let Err(err) = envelope.into_result() {
                warn!("[wechat] {} failed: {}", action.path(), err);
                return Err(err);
            }
        }

        action.decode(&response)
    }

    /// Fetches a token from `provider`, then executes `action`.
    pub async fn do_with<T>(
        &self,
        provider: &dyn TokenProvider,
        action: Action<T>,
    ) -> Result<T, WechatError> {
        let access_token = provider.get_token().await?;
        self.do_action(&access_token, action).await
    }
}
