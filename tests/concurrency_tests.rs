//! A facade is shared across tasks without any locking on the caller side.

use std::sync::Arc;

use wechat_sdk::minip::media::{self, MediaType};
use wechat_sdk::minip::Minip;
use wechat_sdk::r#pub::Subscriber;
use wechat_sdk::types::{AppId, AppSecret};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_concurrent_calls_share_one_facade() {
    let mock_server = MockServer::start().await;

    for i in 0..20 {
        let openid = format!("OPENID_{}", i);
        Mock::given(method("GET"))
            .and(path("/cgi-bin/user/info"))
            .and(query_param("openid", openid.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "subscribe": 1,
                "openid": openid,
                "nickname": format!("user{}", i)
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let subscriber = Arc::new(
        Subscriber::new()
            .unwrap()
            .with_base_url(mock_server.uri())
            .unwrap(),
    );

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let subscriber = Arc::clone(&subscriber);
            tokio::spawn(async move {
                subscriber
                    .get("ACCESS_TOKEN", &format!("OPENID_{}", i))
                    .await
            })
        })
        .collect();

    let results: Vec<_> = futures::future::join_all(handles).await;

    for (i, result) in results.into_iter().enumerate() {
        let info = result.unwrap().unwrap();
        assert_eq!(info.openid, format!("OPENID_{}", i));
        assert_eq!(info.nickname, format!("user{}", i));
    }
}

#[tokio::test]
async fn test_concurrent_uploads_and_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cgi-bin/media/upload"))
        .and(query_param("type", "image"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "image",
            "media_id": "MEDIA_ID",
            "created_at": 1606717010
        })))
        .expect(5)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cgi-bin/media/get"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"\xff\xd8\xff".to_vec(), "image/jpeg"))
        .expect(5)
        .mount(&mock_server)
        .await;

    let minip = Minip::new(AppId::new("APPID").unwrap(), AppSecret::new("APPSECRET").unwrap())
        .unwrap()
        .with_base_url(mock_server.uri())
        .unwrap();

    let uploads = (0..5).map(|i| {
        minip.do_action(
            "ACCESS_TOKEN",
            media::upload_temp_media_bytes(MediaType::Image, &format!("{}.jpg", i), vec![i as u8; 8]),
        )
    });
    let downloads = (0..5).map(|_| minip.do_action("ACCESS_TOKEN", media::get_temp_media("MEDIA_ID")));

    let (uploaded, downloaded) = futures::future::join(
        futures::future::join_all(uploads),
        futures::future::join_all(downloads),
    )
    .await;

    for result in uploaded {
        assert_eq!(result.unwrap().media_id, "MEDIA_ID");
    }
    for result in downloaded {
        assert_eq!(result.unwrap().buffer, b"\xff\xd8\xff".to_vec());
    }
}
