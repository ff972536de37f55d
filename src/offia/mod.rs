//! Official accounts
//!
//! [`OffiA`] holds the AppID/AppSecret pair and the transport. Actions come
//! from the submodules, e.g. [`kf`] for customer service accounts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::{decode_json, Action};
use crate::caller::Caller;
use crate::client::{HttpClient, RequestOptions, ReqwestClient};
use crate::error::WechatError;
use crate::token::{AccessToken, TokenProvider};
use crate::types::{AppId, AppSecret};
use crate::urls;
use crate::utils::nonce;

pub mod kf;

/// Scope of web page authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthScope {
    #[serde(rename = "snsapi_base")]
    Base,
    #[serde(rename = "snsapi_userinfo")]
    UserInfo,
}

impl AuthScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthScope::Base => "snsapi_base",
            AuthScope::UserInfo => "snsapi_userinfo",
        }
    }
}

/// Web authorization token, distinct from the API access token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub openid: String,
    pub scope: String,
    #[serde(default)]
    pub unionid: Option<String>,
}

/// Official account facade
#[derive(Clone)]
pub struct OffiA {
    appid: AppId,
    appsecret: AppSecret,
    caller: Caller,
}

impl std::fmt::Debug for OffiA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OffiA")
            .field("appid", &self.appid)
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}

impl OffiA {
    /// Facade using a default [`ReqwestClient`].
    pub fn new(appid: AppId, appsecret: AppSecret) -> Result<Self, WechatError> {
        Ok(Self::with_client(
            appid,
            appsecret,
            Arc::new(ReqwestClient::new()?),
        ))
    }

    pub fn with_client(appid: AppId, appsecret: AppSecret, client: Arc<dyn HttpClient>) -> Self {
        Self {
            appid,
            appsecret,
            caller: Caller::new(client, urls::API_HOST),
        }
    }

    /// Override the API host (default `https://api.weixin.qq.com`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, WechatError> {
        self.caller.set_base_url(base_url)?;
        Ok(self)
    }

    pub fn set_client(&mut self, client: Arc<dyn HttpClient>) {
        self.caller.set_client(client);
    }

    pub fn appid(&self) -> &str {
        self.appid.as_str()
    }

    /// Web page authorization URL.
    ///
    /// `redirect_url` is inserted as given and must already be URL-encoded.
    /// Without `state` a random 16 character one is generated.
    pub fn oauth2_url(&self, scope: AuthScope, redirect_url: &str, state: Option<&str>) -> String {
        let state = state.map_or_else(|| nonce(16), str::to_string);

        format!(
            "{}?appid={}&redirect_uri={}&response_type=code&scope={}&state={}#wechat_redirect",
            urls::OAUTH2_AUTHORIZE,
            self.appid.as_str(),
            redirect_url,
            scope.as_str(),
            state
        )
    }

    /// Exchange a web authorization `code` for an [`AuthToken`].
    ///
    /// GET /sns/oauth2/access_token?appid=APPID&secret=SECRET&code=CODE&grant_type=authorization_code
    pub async fn code2_oauth_token(&self, code: &str) -> Result<AuthToken, WechatError> {
        let action = Action::get("/sns/oauth2/access_token", decode_json::<AuthToken>)
            .query("appid", self.appid.as_str())
            .query("secret", self.appsecret.as_str())
            .query("code", code)
            .query("grant_type", "authorization_code");

        self.caller.do_action("", action).await
    }

    /// Fetch an API access token.
    ///
    /// GET /cgi-bin/token?grant_type=client_credential&appid=APPID&secret=APPSECRET
    ///
    /// The token is not cached; re-acquire it before `expires_in` elapses.
    pub async fn access_token(&self) -> Result<AccessToken, WechatError> {
        let action = Action::get("/cgi-bin/token", decode_json::<AccessToken>)
            .query("grant_type", "client_credential")
            .query("appid", self.appid.as_str())
            .query("secret", self.appsecret.as_str());

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

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_offia(base_url: &str) -> OffiA {
        OffiA::new(
            AppId::new("APPID").unwrap(),
            AppSecret::new("APPSECRET").unwrap(),
        )
        .unwrap()
        .with_base_url(base_url)
        .unwrap()
    }

    #[test]
    fn test_oauth2_url() {
        let oa = test_offia("https://api.weixin.qq.com");
        let url = oa.oauth2_url(AuthScope::UserInfo, "https%3A%2F%2Fexample.com%2Fcb", Some("STATE"));

        assert_eq!(
            url,
            "https://open.weixin.qq.com/connect/oauth2/authorize?appid=APPID&redirect_uri=https%3A%2F%2Fexample.com%2Fcb&response_type=code&scope=snsapi_userinfo&state=STATE#wechat_redirect"
        );
    }

    #[tokio::test]
    async fn test_access_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cgi-bin/token"))
            .and(query_param("grant_type", "client_credential"))
            .and(query_param("appid", "APPID"))
            .and(query_param("secret", "APPSECRET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ACCESS_TOKEN",
                "expires_in": 7200
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let token = test_offia(&mock_server.uri()).access_token().await.unwrap();

        assert_eq!(token.token, "ACCESS_TOKEN");
        assert_eq!(token.expires_in, 7200);
    }

    #[tokio::test]
    async fn test_code2_oauth_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sns/oauth2/access_token"))
            .and(query_param("code", "CODE"))
            .and(query_param("grant_type", "authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ACCESS_TOKEN",
                "expires_in": 7200,
                "refresh_token": "REFRESH_TOKEN",
                "openid": "OPENID",
                "scope": "snsapi_userinfo"
            })))
            .mount(&mock_server)
            .await;

        let token = test_offia(&mock_server.uri())
            .code2_oauth_token("CODE")
            .await
            .unwrap();

        assert_eq!(
            token,
            AuthToken {
                access_token: "ACCESS_TOKEN".to_string(),
                expires_in: 7200,
                refresh_token: "REFRESH_TOKEN".to_string(),
                openid: "OPENID".to_string(),
                scope: "snsapi_userinfo".to_string(),
                unionid: None,
            }
        );
    }

    #[tokio::test]
    async fn test_code2_oauth_token_invalid_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sns/oauth2/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "errcode": 40029,
                "errmsg": "invalid code"
            })))
            .mount(&mock_server)
            .await;

        let err = test_offia(&mock_server.uri())
            .code2_oauth_token("BAD")
            .await
            .unwrap_err();

        assert!(matches!(err, WechatError::Api { code: 40029, .. }));
    }
}
