//! Mini programs
//!
//! [`Minip`] holds the AppID/AppSecret pair and the transport, handles the
//! login code exchange and decrypts data encrypted with a session key.
//! Actions come from the submodules, e.g. [`media`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::{decode_json, Action};
use crate::caller::Caller;
use crate::client::{HttpClient, RequestOptions, ReqwestClient};
use crate::crypto::{DecryptedUserData, UserDataCipher};
use crate::error::WechatError;
use crate::token::{AccessToken, TokenProvider};
use crate::types::{AppId, AppSecret, SessionKey};
use crate::urls;

pub mod media;

/// Result of exchanging a `wx.login` code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthSession {
    pub openid: String,
    pub session_key: String,
    #[serde(default)]
    pub unionid: Option<String>,
}

/// Mini program facade
#[derive(Clone)]
pub struct Minip {
    appid: AppId,
    appsecret: AppSecret,
    caller: Caller,
}

impl std::fmt::Debug for Minip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Minip")
            .field("appid", &self.appid)
            .field("caller", &self.caller)
            .finish_non_exhaustive()
    }
}

impl Minip {
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

    /// Exchange a `wx.login` code for the user's session.
    ///
    /// GET /sns/jscode2session?appid=APPID&secret=SECRET&js_code=JSCODE&grant_type=authorization_code
    pub async fn code2_session(&self, code: &str) -> Result<AuthSession, WechatError> {
        let action = Action::get("/sns/jscode2session", decode_json::<AuthSession>)
            .query("appid", self.appid.as_str())
            .query("secret", self.appsecret.as_str())
            .query("js_code", code)
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

    /// Decrypt data returned by `wx.getUserInfo`, `wx.getPhoneNumber`, etc.
    ///
    /// Fails with `WechatError::Signature` when the watermark was issued for
    /// another AppID.
    pub fn decrypt_auth_info(
        &self,
        session_key: &SessionKey,
        iv: &str,
        encrypted_data: &str,
    ) -> Result<DecryptedUserData, WechatError> {
        let data = UserDataCipher::new(session_key)?.decrypt(iv, encrypted_data)?;
        data.ensure_issued_for(self.appid.as_str())?;
        Ok(data)
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
    use crate::crypto::aes::tests::encrypt_for_test;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_minip(base_url: &str) -> Minip {
        Minip::new(
            AppId::new("wx4f4bc4dec97d474b").unwrap(),
            AppSecret::new("APPSECRET").unwrap(),
        )
        .unwrap()
        .with_base_url(base_url)
        .unwrap()
    }

    #[tokio::test]
    async fn test_code2_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sns/jscode2session"))
            .and(query_param("appid", "wx4f4bc4dec97d474b"))
            .and(query_param("js_code", "JSCODE"))
            .and(query_param("grant_type", "authorization_code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "openid": "OPENID",
                "session_key": "SESSIONKEY",
                "unionid": "UNIONID"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = test_minip(&mock_server.uri())
            .code2_session("JSCODE")
            .await
            .unwrap();

        assert_eq!(
            session,
            AuthSession {
                openid: "OPENID".to_string(),
                session_key: "SESSIONKEY".to_string(),
                unionid: Some("UNIONID".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_code2_session_invalid_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/sns/jscode2session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "errcode": 40029,
                "errmsg": "invalid code"
            })))
            .mount(&mock_server)
            .await;

        let err = test_minip(&mock_server.uri())
            .code2_session("BAD")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "40029|invalid code");
    }

    #[tokio::test]
    async fn test_access_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cgi-bin/token"))
            .and(query_param("grant_type", "client_credential"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ACCESS_TOKEN",
                "expires_in": 7200
            })))
            .mount(&mock_server)
            .await;

        let token = test_minip(&mock_server.uri()).access_token().await.unwrap();
        assert_eq!(token.token, "ACCESS_TOKEN");
    }

    #[test]
    fn test_decrypt_auth_info() {
        let minip = test_minip("https://api.weixin.qq.com");
        let (key, iv, data) = encrypt_for_test(
            r#"{"phoneNumber":"13580006666","watermark":{"timestamp":1637744274,"appid":"wx4f4bc4dec97d474b"}}"#,
        );

        let decrypted = minip
            .decrypt_auth_info(&key, &iv, &data)
            .unwrap();

        assert_eq!(decrypted.data["phoneNumber"], "13580006666");
    }

    #[test]
    fn test_decrypt_auth_info_watermark_mismatch() {
        let minip = test_minip("https://api.weixin.qq.com");
        let (key, iv, data) = encrypt_for_test(
            r#"{"phoneNumber":"13580006666","watermark":{"timestamp":1637744274,"appid":"wxother"}}"#,
        );

        let result = minip.decrypt_auth_info(&key, &iv, &data);
        assert!(matches!(result, Err(WechatError::Signature(_))));
    }
}
