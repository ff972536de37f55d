//! Request descriptions
//!
//! An [`Action`] describes one remote call without executing it: the HTTP
//! method, the endpoint path, query parameters, an optional JSON body or
//! multipart form, and the function that decodes a successful response.
//! Facades such as [`OffiA`](crate::offia::OffiA) execute actions with
//! `do_action`.
//!
//! ```rust,ignore
//! use wechat_sdk::offia::kf;
//!
//! let accounts = oa.do_action("ACCESS_TOKEN", kf::get_account_list()).await?;
//! ```

use std::path::{Path, PathBuf};

use http::Method;
use serde::de::DeserializeOwned;

use crate::client::{FormPart, HttpClient, MultipartForm, RequestOptions};
use crate::error::WechatError;
use crate::utils::url_encode;

/// Response decoder attached to an action.
pub type Decode<T> = fn(&[u8]) -> Result<T, WechatError>;

/// Decodes the whole response body as JSON.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, WechatError> {
    Ok(serde_json::from_slice(body)?)
}

/// Ignores the response body. Used by confirmation-only endpoints.
pub fn decode_none(_body: &[u8]) -> Result<(), WechatError> {
    Ok(())
}

/// Returns the raw response body.
pub fn decode_bytes(body: &[u8]) -> Result<Vec<u8>, WechatError> {
    Ok(body.to_vec())
}

#[derive(Debug, Clone)]
enum Payload {
    Empty,
    Json(serde_json::Value),
    Upload(UploadForm),
}

/// Description of one API call.
///
/// Built once, executed once by a facade and then dropped.
pub struct Action<T> {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    payload: Payload,
    decode: Decode<T>,
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            payload: self.payload.clone(),
            decode: self.decode,
        }
    }
}

impl<T> std::fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}

impl<T> Action<T> {
    pub fn new(method: Method, path: impl Into<String>, decode: Decode<T>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            payload: Payload::Empty,
            decode,
        }
    }

    /// GET action for `path`
    pub fn get(path: impl Into<String>, decode: Decode<T>) -> Self {
        Self::new(Method::GET, path, decode)
    }

    /// POST action for `path`
    pub fn post(path: impl Into<String>, decode: Decode<T>) -> Self {
        Self::new(Method::POST, path, decode)
    }

    /// Sets a query parameter, replacing any previous value for `key`.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();

        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Attaches a JSON body. Replaces an upload form if one was set.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// Attaches a multipart form. Replaces a JSON body if one was set.
    pub fn upload(mut self, form: UploadForm) -> Self {
        self.payload = Payload::Upload(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Builds the request URL.
    ///
    /// The access token and query parameters are sorted by key and
    /// percent-encoded. An empty `access_token` is left out.
    pub fn url(&self, base_url: &str, access_token: &str) -> String {
        let mut pairs: Vec<(&str, &str)> = self
            .query
            .iter()
            .filter(|(k, _)| access_token.is_empty() || k != "access_token")
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        if !access_token.is_empty() {
            pairs.push(("access_token", access_token));
        }

        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);

        if pairs.is_empty() {
            return url;
        }

        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let query = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", url_encode(k), url_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        url.push('?');
        url.push_str(&query);
        url
    }

    /// Serialized JSON body, `None` for body-less and upload actions.
    pub fn body(&self) -> Result<Option<Vec<u8>>, WechatError> {
        match &self.payload {
            Payload::Json(value) => Ok(Some(serde_json::to_vec(value)?)),
            _ => Ok(None),
        }
    }

    pub fn is_upload(&self) -> bool {
        matches!(self.payload, Payload::Upload(_))
    }

    pub fn upload_form(&self) -> Option<&UploadForm> {
        match &self.payload {
            Payload::Upload(form) => Some(form),
            _ => None,
        }
    }

    /// Runs the decoder over a response body that passed the envelope check.
    pub fn decode(&self, body: &[u8]) -> Result<T, WechatError> {
        (self.decode)(body)
    }
}

/// Where a file field's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Bytes(Vec<u8>),
    /// Read from disk when the action executes
    Path(PathBuf),
    /// Downloaded when the action executes
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadField {
    File {
        name: String,
        filename: String,
        source: FileSource,
    },
    Text {
        name: String,
        value: String,
    },
}

/// Multipart form description, resolved into bytes only at execution time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    fields: Vec<UploadField>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_bytes(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.fields.push(UploadField::File {
            name: name.into(),
            filename: filename.into(),
            source: FileSource::Bytes(data.into()),
        });
        self
    }

    /// File field read from `path`; the filename is the path's last component.
    pub fn file_path(mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.fields.push(UploadField::File {
            name: name.into(),
            filename,
            source: FileSource::Path(path.to_path_buf()),
        });
        self
    }

    pub fn file_url(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.fields.push(UploadField::File {
            name: name.into(),
            filename: filename.into(),
            source: FileSource::Url(url.into()),
        });
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(UploadField::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn fields(&self) -> &[UploadField] {
        &self.fields
    }

    /// Reads every file source and produces the form the transport sends.
    ///
    /// Remote sources are downloaded through `client`.
    pub async fn load(&self, client: &dyn HttpClient) -> Result<MultipartForm, WechatError> {
        let mut form = MultipartForm::default();

        for field in &self.fields {
            let part = match field {
                UploadField::Text { name, value } => FormPart::Text {
                    name: name.clone(),
                    value: value.clone(),
                },
                UploadField::File {
                    name,
                    filename,
                    source,
                } => {
                    let data = match source {
                        FileSource::Bytes(data) => data.clone(),
                        FileSource::Path(path) => tokio::fs::read(path).await?,
                        FileSource::Url(url) => {
                            client
                                .request(Method::GET, url, None, &RequestOptions::default())
                                .await?
                        }
                    };

                    FormPart::File {
                        name: name.clone(),
                        filename: filename.clone(),
                        data,
                    }
                }
            };

            form.parts.push(part);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_url_with_access_token_only() {
        let action = Action::get("/cgi-bin/customservice/getkflist", decode_none);
        assert_eq!(
            action.url("https://api.weixin.qq.com", "ACCESS_TOKEN"),
            "https://api.weixin.qq.com/cgi-bin/customservice/getkflist?access_token=ACCESS_TOKEN"
        );
    }

    #[test]
    fn test_url_sorts_and_encodes_query() {
        let action = Action::get("/cgi-bin/user/info", decode_none)
            .query("openid", "o6_bmjrPTlm6_2sgVt7hMZOPfL2M")
            .query("lang", "zh_CN");

        assert_eq!(
            action.url("https://api.weixin.qq.com/", "TOKEN"),
            "https://api.weixin.qq.com/cgi-bin/user/info?access_token=TOKEN&lang=zh_CN&openid=o6_bmjrPTlm6_2sgVt7hMZOPfL2M"
        );

        let action = Action::get("/customservice/kfaccount/del", decode_none)
            .query("kf_account", "test1@test");
        assert_eq!(
            action.url("https://api.weixin.qq.com", "a b+c"),
            "https://api.weixin.qq.com/customservice/kfaccount/del?access_token=a%20b%2Bc&kf_account=test1%40test"
        );
    }

    #[test]
    fn test_url_without_token_or_query() {
        let action = Action::post("/cgi-bin/linkedcorp/agent/get_perm_list", decode_none);
        assert_eq!(
            action.url("https://qyapi.weixin.qq.com", ""),
            "https://qyapi.weixin.qq.com/cgi-bin/linkedcorp/agent/get_perm_list"
        );
    }

    #[test]
    fn test_url_is_pure() {
        let action = Action::get("/cgi-bin/media/get", decode_bytes).query("media_id", "MEDIA");
        let first = action.url("https://api.weixin.qq.com", "TOKEN");
        let second = action.url("https://api.weixin.qq.com", "TOKEN");
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_replaces_existing_key() {
        let action = Action::get("/path", decode_none)
            .query("type", "image")
            .query("type", "voice");
        assert_eq!(action.url("http://host", ""), "http://host/path?type=voice");
    }

    #[test]
    fn test_token_overrides_query_access_token() {
        let action = Action::get("/path", decode_none).query("access_token", "stale");
        assert_eq!(
            action.url("http://host", "fresh"),
            "http://host/path?access_token=fresh"
        );
    }

    #[test]
    fn test_body_is_sorted_json() {
        let action = Action::post("/customservice/kfaccount/inviteworker", decode_none).json(
            serde_json::json!({
                "kf_account": "test1@test",
                "invite_wx": "test_kfwx",
            }),
        );

        let body = action.body().unwrap().unwrap();
        assert_eq!(
            body,
            br#"{"invite_wx":"test_kfwx","kf_account":"test1@test"}"#.to_vec()
        );
        assert!(!action.is_upload());
    }

    #[test]
    fn test_upload_and_body_are_exclusive() {
        let action = Action::post("/path", decode_none)
            .json(serde_json::json!({"a": 1}))
            .upload(UploadForm::new().file_bytes("media", "a.jpg", b"data".to_vec()));

        assert!(action.is_upload());
        assert!(action.body().unwrap().is_none());
        assert_eq!(action.upload_form().unwrap().fields().len(), 1);

        let action = action.json(serde_json::json!({"a": 1}));
        assert!(!action.is_upload());
        assert!(action.upload_form().is_none());
    }

    #[test]
    fn test_decode_json() {
        let action = Action::get("/path", decode_json::<Sample>);
        let sample = action.decode(br#"{"name":"wechat","errcode":0}"#).unwrap();
        assert_eq!(
            sample,
            Sample {
                name: "wechat".to_string()
            }
        );

        let err = action.decode(br#"{"name":1}"#).unwrap_err();
        assert!(matches!(err, WechatError::Json(_)));
    }

    #[test]
    fn test_file_path_filename() {
        let form = UploadForm::new().file_path("media", "/tmp/avatars/test.jpg");
        assert_eq!(
            form.fields()[0],
            UploadField::File {
                name: "media".to_string(),
                filename: "test.jpg".to_string(),
                source: FileSource::Path(PathBuf::from("/tmp/avatars/test.jpg")),
            }
        );
    }
}
