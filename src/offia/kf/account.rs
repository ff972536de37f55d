use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{decode_none, Action, UploadForm};
use crate::error::WechatError;

/// State of a pending binding invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Waiting,
    Rejected,
    Expired,
    #[serde(other)]
    Unknown,
}

/// Customer service account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    #[serde(rename = "kf_id", default)]
    pub id: String,
    #[serde(rename = "kf_account", default)]
    pub account: String,
    #[serde(rename = "kf_nick", default)]
    pub nickname: String,
    #[serde(rename = "kf_headimgurl", default)]
    pub head_img_url: String,
    /// Bound personal WeChat ID
    #[serde(rename = "kf_wx", default)]
    pub weixin: String,
    /// WeChat ID with a pending invitation
    #[serde(rename = "invite_wx", default)]
    pub invite_weixin: String,
    #[serde(default)]
    pub invite_expire_time: i64,
    #[serde(default)]
    pub invite_status: Option<InviteStatus>,
}

/// Online customer service account
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Online {
    #[serde(rename = "kf_id", default)]
    pub id: String,
    #[serde(rename = "kf_account", default)]
    pub account: String,
    /// 1: web client online
    #[serde(default)]
    pub status: i64,
    /// Sessions currently being served
    #[serde(default)]
    pub accepted_case: i64,
}

#[derive(Deserialize)]
struct AccountList {
    #[serde(default)]
    kf_list: Vec<Account>,
}

#[derive(Deserialize)]
struct OnlineList {
    #[serde(default)]
    kf_online_list: Vec<Online>,
}

fn decode_account_list(body: &[u8]) -> Result<Vec<Account>, WechatError> {
    let list: AccountList = serde_json::from_slice(body)?;
    Ok(list.kf_list)
}

fn decode_online_list(body: &[u8]) -> Result<Vec<Online>, WechatError> {
    let list: OnlineList = serde_json::from_slice(body)?;
    Ok(list.kf_online_list)
}

/// Get all customer service accounts
///
/// GET /cgi-bin/customservice/getkflist?access_token=ACCESS_TOKEN
pub fn get_account_list() -> Action<Vec<Account>> {
    Action::get("/cgi-bin/customservice/getkflist", decode_account_list)
}

/// Get the accounts that are online
///
/// GET /cgi-bin/customservice/getonlinekflist?access_token=ACCESS_TOKEN
pub fn get_online_list() -> Action<Vec<Online>> {
    Action::get("/cgi-bin/customservice/getonlinekflist", decode_online_list)
}

/// Add an account (`account` in `name@wechat_id` form)
///
/// POST /customservice/kfaccount/add?access_token=ACCESS_TOKEN
pub fn add_account(account: &str, nickname: &str) -> Action<()> {
    Action::post("/customservice/kfaccount/add", decode_none).json(serde_json::json!({
        "kf_account": account,
        "nickname": nickname,
    }))
}

/// Change an account's nickname
///
/// POST /customservice/kfaccount/update?access_token=ACCESS_TOKEN
pub fn update_account(account: &str, nickname: &str) -> Action<()> {
    Action::post("/customservice/kfaccount/update", decode_none).json(serde_json::json!({
        "kf_account": account,
        "nickname": nickname,
    }))
}

/// Invite a personal WeChat user to bind to `account`
///
/// POST /customservice/kfaccount/inviteworker?access_token=ACCESS_TOKEN
pub fn invite_worker(account: &str, invite_weixin: &str) -> Action<()> {
    Action::post("/customservice/kfaccount/inviteworker", decode_none).json(serde_json::json!({
        "kf_account": account,
        "invite_wx": invite_weixin,
    }))
}

/// Upload an avatar image read from `path`
///
/// POST /customservice/kfaccount/uploadheadimg?access_token=ACCESS_TOKEN&kf_account=KFACCOUNT
pub fn upload_avatar(account: &str, path: impl AsRef<Path>) -> Action<()> {
    Action::post("/customservice/kfaccount/uploadheadimg", decode_none)
        .query("kf_account", account)
        .upload(UploadForm::new().file_path("media", path))
}

/// Upload an avatar image from memory
pub fn upload_avatar_bytes(account: &str, filename: &str, data: Vec<u8>) -> Action<()> {
    Action::post("/customservice/kfaccount/uploadheadimg", decode_none)
        .query("kf_account", account)
        .upload(UploadForm::new().file_bytes("media", filename, data))
}

/// Delete an account
///
/// GET /customservice/kfaccount/del?access_token=ACCESS_TOKEN&kf_account=KFACCOUNT
pub fn delete_account(account: &str) -> Action<()> {
    Action::get("/customservice/kfaccount/del", decode_none).query("kf_account", account)
}
