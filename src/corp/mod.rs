//! WeChat Work (enterprise accounts)
//!
//! [`Corp`] holds the corporation ID and the transport, builds the browser
//! authorization URLs and executes the actions built by the submodules.
//!
//! ```rust,ignore
//! use wechat_sdk::corp::{linkedcorp, Corp};
//! use wechat_sdk::types::CorpId;
//!
//! let corp = Corp::new(CorpId::new("ww1234567890")?)?;
//! let token = corp.access_token("CORP_SECRET").await?;
//! let perm = corp.do_action(&token.token, linkedcorp::list_agent_perm()).await?;
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::{decode_json, Action};
use crate::caller::Caller;
use crate::client::{HttpClient, RequestOptions, ReqwestClient};
use crate::error::WechatError;
use crate::token::{AccessToken, TokenProvider};
use crate::types::CorpId;
use crate::urls;
use crate::utils::nonce;

pub mod linkedcorp;

/// Scope of web page authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScope {
    /// Silent authorization, user ID only
    #[serde(rename = "snsapi_base")]
    Base,
    /// Manual authorization, basic member info
    #[serde(rename = "snsapi_userinfo")]
    UserInfo,
    /// Manual authorization, sensitive member info
    #[serde(rename = "snsapi_privateinfo")]
    PrivateInfo,
}

impl AuthScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScope::Base => "snsapi_base",
            AuthScope::UserInfo => "snsapi_userinfo",
            AuthScope::PrivateInfo => "snsapi_privateinfo",
        }
    }
}

/// WeChat Work facade
#[derive(Clone)]
pub struct Corp {
    corpid: CorpId,
    token: String,
    encoding_aes_key: String,
    caller: Caller,
}

impl std::fmt::Debug for Corp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Corp")
            .field("corpid", &self.corpid)
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}

impl Corp {
    /// Facade using a default [`ReqwestClient`].
    pub fn new(corpid: CorpId) -> Result<Self, WechatError> {
        Ok(Self::with_client(corpid, Arc::new(ReqwestClient::new()?)))
    }

    pub fn with_client(corpid: CorpId, client: Arc<dyn HttpClient>) -> Self {
        Self {
            corpid,
            token: String::new(),
            encoding_aes_key: String::new(),
            caller: Caller::new(client, urls::CORP_API_HOST),
        }
    }

    /// Override the API host (default `https://qyapi.weixin.qq.com`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, WechatError> {
        self.caller.set_base_url(base_url)?;
        Ok(self)
    }

    pub fn set_client(&mut self, client: Arc<dyn HttpClient>) {
        self.caller.set_client(client);
    }

    /// Callback server settings (Token and EncodingAESKey from the admin console)
    pub fn set_server_config(
        &mut self,
        token: impl Into<String>,
        encoding_aes_key: impl Into<String>,
    ) {
        self.token = token.into();
        self.encoding_aes_key = encoding_aes_key.into();
    }

    pub fn corpid(&self) -> &str {
        self.corpid.as_str()
    }

    pub fn server_token(&self) -> &str {
        &self.token
    }

    pub fn encoding_aes_key(&self) -> &str {
        &self.encoding_aes_key
    }

    /// Web page authorization URL.
    ///
    /// `redirect_url` is inserted as given and must already be URL-encoded.
    /// Without `state` a random 16 character one is generated.
    pub fn web_auth_url(&self, scope: AuthScope, redirect_url: &str, state: Option<&str>) -> String {
        let state = state.map_or_else(|| nonce(16), str::to_string);

        format!(
            "{}?appid={}&redirect_uri={}&response_type=code&scope={}&state={}#wechat_redirect",
            urls::OAUTH2_AUTHORIZE,
            self.corpid.as_str(),
            redirect_url,
            scope.as_str(),
            state
        )
    }

    /// QR code login URL for the application `agent_id`.
    ///
    /// `redirect_url` is inserted as given and must already be URL-encoded.
    /// Without `state` a random 16 character one is generated.
    pub fn qrcode_auth_url(&self, agent_id: &str, redirect_url: &str, state: Option<&str>) -> String {
        let state = state.map_or_else(|| nonce(16), str::to_string);

        format!(
            "{}?appid={}&agentid={}&redirect_uri={}&state={}",
            urls::CORP_QRCODE_AUTHORIZE,
            self.corpid.as_str(),
            agent_id,
            redirect_url,
            state
        )
    }

    /// Exchange an application secret for an access token.
    ///
    /// GET /cgi-bin/gettoken?corpid=ID&corpsecret=SECRET
    ///
    /// The token is not cached; re-acquire it before `expires_in` elapses.
    pub async fn access_token(&self, secret: &str) -> Result<AccessToken, WechatError> {
        let action = Action::get("/cgi-bin/gettoken", decode_json::<AccessToken>)
            .query("corpid", self.corpid.as_str())
            .query("corpsecret", secret);

        self.caller.do_action("", action).await
    }

    /// Execute `action` with `access_token`.
    pub async fn do_action<T>(&self, access_token: &str, action: Action<T>) -> Result<T, WechatError> {
        self.caller.do_action(access_token, action).await
    }

    pub async fn do_action_with_options<T>(
        &self,
        access_token: &str,
        action: Action<T>,
        options: &RequestOptions,
    ) -> Result<T, WechatError> {
        self.caller
            .do_action_with_options(access_token, action, options)
            .await
    }

    /// Execute `action` with a token taken from `provider`.
    pub async fn do_with<T>(
        &self,
        provider: &dyn TokenProvider,
        action: Action<T>,
    ) -> Result<T, WechatError> {
        self.caller.do_with(provider, action).await
    }
}
