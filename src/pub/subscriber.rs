use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::action::{decode_json, Action};
use crate::caller::Caller;
use crate::client::{HttpClient, ReqwestClient};
use crate::error::WechatError;
use crate::urls;

/// Maximum number of openids returned by one [`Subscriber::get_list`] page
pub const MAX_SUBSCRIBER_LIST_COUNT: usize = 10000;

/// Subscriber profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriberInfo {
    /// 0 when the user has unsubscribed; the other fields are then empty
    #[serde(default)]
    pub subscribe: i64,
    #[serde(default)]
    pub openid: String,
    #[serde(default, alias = "nickName")]
    pub nickname: String,
    #[serde(default)]
    pub sex: i64,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "headimgurl", default)]
    pub avatar_url: String,
    #[serde(default)]
    pub subscribe_time: i64,
    #[serde(default)]
    pub unionid: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub groupid: i64,
    #[serde(default)]
    pub tagid_list: Vec<i64>,
    #[serde(default)]
    pub subscribe_scene: String,
    #[serde(default)]
    pub qr_scene: i64,
    #[serde(default)]
    pub qr_scene_str: String,
}

/// One page of subscriber openids
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriberList {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub count: i64,
    /// `{"openid": [...]}`
    #[serde(default)]
    pub data: HashMap<String, Vec<String>>,
    /// Empty on the last page
    #[serde(default)]
    pub next_openid: String,
}

impl SubscriberList {
    pub fn openids(&self) -> &[String] {
        self.data.get("openid").map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Deserialize)]
struct BatchGetResult {
    #[serde(default)]
    user_info_list: Vec<SubscriberInfo>,
}

fn decode_batch(body: &[u8]) -> Result<Vec<SubscriberInfo>, WechatError> {
    let result: BatchGetResult = serde_json::from_slice(body)?;
    Ok(result.user_info_list)
}

/// Official account subscriber API
#[derive(Debug, Clone)]
pub struct Subscriber {
    caller: Caller,
}

impl Subscriber {
    /// Client using a default [`ReqwestClient`].
    pub fn new() -> Result<Self, WechatError> {
        Ok(Self::with_client(Arc::new(ReqwestClient::new()?)))
    }

    pub fn with_client(client: Arc<dyn HttpClient>) -> Self {
        Self {
            caller: Caller::new(client, urls::API_HOST),
        }
    }

    /// Override the API host (default `https://api.weixin.qq.com`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, WechatError> {
        self.caller.set_base_url(base_url)?;
        Ok(self)
    }

    /// Get one subscriber's profile
    ///
    /// GET /cgi-bin/user/info?access_token=ACCESS_TOKEN&openid=OPENID&lang=zh_CN
    pub async fn get(&self, access_token: &str, openid: &str) -> Result<SubscriberInfo, WechatError> {
        let action = Action::get("/cgi-bin/user/info", decode_json::<SubscriberInfo>)
            .query("openid", openid)
            .query("lang", "zh_CN");

        self.caller.do_action(access_token, action).await
    }

    /// Get several profiles at once; an empty `openids` makes no request.
    ///
    /// POST /cgi-bin/user/info/batchget?access_token=ACCESS_TOKEN
    pub async fn batch_get(
        &self,
        access_token: &str,
        openids: &[&str],
    ) -> Result<Vec<SubscriberInfo>, WechatError> {
        if openids.is_empty() {
            return Ok(Vec::new());
        }

        let user_list: Vec<serde_json::Value> = openids
            .iter()
            .map(|openid| serde_json::json!({ "openid": openid, "lang": "zh_CN" }))
            .collect();

        let action = Action::post("/cgi-bin/user/info/batchget", decode_batch)
            .json(serde_json::json!({ "user_list": user_list }));

        self.caller.do_action(access_token, action).await
    }

    /// Get a page of subscriber openids, starting after `next_openid`
    ///
    /// GET /cgi-bin/user/get?access_token=ACCESS_TOKEN&next_openid=NEXT_OPENID
    pub async fn get_list(
        &self,
        access_token: &str,
        next_openid: Option<&str>,
    ) -> Result<SubscriberList, WechatError> {
        let mut action = Action::get("/cgi-bin/user/get", decode_json::<SubscriberList>);

        if let Some(next_openid) = next_openid {
            action = action.query("next_openid", next_openid);
        }

        self.caller.do_action(access_token, action).await
    }
}
