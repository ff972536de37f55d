use serde_json::Value;

use crate::error::WechatError;

/// The `{errcode, errmsg}` wrapper present on every platform response.
///
/// Missing fields default, so a successful payload without them reads as code `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub errcode: i64,
    pub errmsg: String,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.errcode == 0
    }

    /// Parses the envelope out of a raw response body.
    ///
    /// Returns `None` when the body is not a JSON object (e.g. binary media).
    /// Fields are read leniently: the platform sometimes sends `errcode` as a
    /// string and `errmsg` as `null`, and neither may hide an error.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let object = value.as_object()?;

        Some(Self {
            errcode: object.get("errcode").map(read_code).unwrap_or_default(),
            errmsg: match object.get("errmsg") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
            },
        })
    }

    /// `Ok` on success, otherwise the matching [`WechatError::Api`].
    pub fn into_result(self) -> Result<(), WechatError> {
        if self.is_success() {
            return Ok(());
        }
        Err(WechatError::Api {
            code: self.errcode,
            message: self.errmsg,
        })
    }
}

fn read_code(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}
