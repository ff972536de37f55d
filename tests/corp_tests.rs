//! WeChat Work facade: token acquisition, token providers and auth URLs.

use std::sync::atomic::{AtomicU32, Ordering};

use wechat_sdk::client::BoxFuture;
use wechat_sdk::corp::{linkedcorp, AuthScope, Corp};
use wechat_sdk::types::CorpId;
use wechat_sdk::{TokenProvider, WechatError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_corp(mock_server: &MockServer) -> Corp {
    Corp::new(CorpId::new("CORPID").unwrap())
        .unwrap()
        .with_base_url(mock_server.uri())
        .unwrap()
}

/// Fetches a fresh token from `/cgi-bin/gettoken` on every call.
struct GettokenProvider {
    corp: Corp,
    secret: String,
    calls: AtomicU32,
}

impl TokenProvider for GettokenProvider {
    fn get_token(&self) -> BoxFuture<'_, Result<String, WechatError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let token = self.corp.access_token(&self.secret).await?;
            Ok(token.token)
        })
    }
}

#[tokio::test]
async fn test_access_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .and(query_param("corpid", "CORPID"))
        .and(query_param("corpsecret", "SECRET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "access_token": "ACCESS_TOKEN",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let token = create_test_corp(&mock_server)
        .access_token("SECRET")
        .await
        .unwrap();

    assert_eq!(token.token, "ACCESS_TOKEN");
    assert_eq!(token.expires_in, 7200);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("corpid=CORPID&corpsecret=SECRET")
    );
}

#[tokio::test]
async fn test_access_token_invalid_secret() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 40001,
            "errmsg": "invalid credential"
        })))
        .mount(&mock_server)
        .await;

    let err = create_test_corp(&mock_server)
        .access_token("WRONG")
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some(40001));
}

#[tokio::test]
async fn test_do_with_token_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "PROVIDED_TOKEN",
            "expires_in": 7200
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/linkedcorp/agent/get_perm_list"))
        .and(query_param("access_token", "PROVIDED_TOKEN"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 0,
            "errmsg": "ok",
            "userids": ["CORPID/USERID"],
            "department_ids": ["LINKEDID/DEPARTMENTID"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let corp = create_test_corp(&mock_server);
    let provider = GettokenProvider {
        corp: corp.clone(),
        secret: "SECRET".to_string(),
        calls: AtomicU32::new(0),
    };

    let perm = corp
        .do_with(&provider, linkedcorp::list_agent_perm())
        .await
        .unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert_eq!(perm.userids, vec!["CORPID/USERID".to_string()]);
    assert_eq!(perm.department_ids, vec!["LINKEDID/DEPARTMENTID".to_string()]);
}

#[tokio::test]
async fn test_do_with_provider_failure_skips_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/gettoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errcode": 42001,
            "errmsg": "access_token expired"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/linkedcorp/agent/get_perm_list"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let corp = create_test_corp(&mock_server);
    let provider = GettokenProvider {
        corp: corp.clone(),
        secret: "SECRET".to_string(),
        calls: AtomicU32::new(0),
    };

    let err = corp
        .do_with(&provider, linkedcorp::list_agent_perm())
        .await
        .unwrap_err();

    assert_eq!(err.api_code(), Some(42001));
}

#[test]
fn test_auth_urls() {
    let corp = Corp::new(CorpId::new("CORPID").unwrap()).unwrap();

    assert_eq!(
        corp.web_auth_url(AuthScope::PrivateInfo, "https%3A%2F%2Fexample.com%2Fcb%3Fa%3D1", Some("STATE")),
        "https://open.weixin.qq.com/connect/oauth2/authorize?appid=CORPID&redirect_uri=https%3A%2F%2Fexample.com%2Fcb%3Fa%3D1&response_type=code&scope=snsapi_privateinfo&state=STATE#wechat_redirect"
    );
    assert_eq!(
        corp.qrcode_auth_url("1000002", "https%3A%2F%2Fexample.com", Some("STATE")),
        "https://open.work.weixin.qq.com/wwopen/sso/qrConnect?appid=CORPID&agentid=1000002&redirect_uri=https%3A%2F%2Fexample.com&state=STATE"
    );
}
