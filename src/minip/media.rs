//! Temporary media for customer service messages
//!
//! Uploaded media stays available for 3 days.
//!
//! ```rust,ignore
//! use wechat_sdk::minip::media::{self, MediaType};
//!
//! let uploaded = minip
//!     .do_action(&token, media::upload_temp_media(MediaType::Image, "photos/cat.jpg"))
//!     .await?;
//! let media = minip.do_action(&token, media::get_temp_media(&uploaded.media_id)).await?;
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::action::{decode_json, Action, UploadForm};
use crate::error::WechatError;

/// Media type accepted by temporary media upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Image file (jpg, png)
    Image,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
        }
    }
}

/// Result of a temporary media upload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResultMediaUpload {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub media_id: String,
    /// Unix timestamp
    pub created_at: i64,
}

/// Downloaded temporary media
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Media {
    pub buffer: Vec<u8>,
}

fn decode_media(body: &[u8]) -> Result<Media, WechatError> {
    Ok(Media {
        buffer: body.to_vec(),
    })
}

fn upload(media_type: MediaType, form: UploadForm) -> Action<ResultMediaUpload> {
    Action::post("/cgi-bin/media/upload", decode_json::<ResultMediaUpload>)
        .query("type", media_type.as_str())
        .upload(form)
}

/// Upload a temporary media file read from `path`
///
/// POST /cgi-bin/media/upload?access_token=ACCESS_TOKEN&type=TYPE
pub fn upload_temp_media(media_type: MediaType, path: impl AsRef<Path>) -> Action<ResultMediaUpload> {
    upload(media_type, UploadForm::new().file_path("media", path))
}

/// Upload a temporary media file downloaded from `url`
///
/// The download goes through the facade's transport when the action runs.
pub fn upload_temp_media_by_url(
    media_type: MediaType,
    filename: &str,
    url: &str,
) -> Action<ResultMediaUpload> {
    upload(media_type, UploadForm::new().file_url("media", filename, url))
}

/// Upload a temporary media file from memory
pub fn upload_temp_media_bytes(
    media_type: MediaType,
    filename: &str,
    data: Vec<u8>,
) -> Action<ResultMediaUpload> {
    upload(media_type, UploadForm::new().file_bytes("media", filename, data))
}

/// Download a temporary media file
///
/// GET /cgi-bin/media/get?access_token=ACCESS_TOKEN&media_id=MEDIA_ID
pub fn get_temp_media(media_id: &str) -> Action<Media> {
    Action::get("/cgi-bin/media/get", decode_media).query("media_id", media_id)
}
