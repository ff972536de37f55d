//! API hosts and browser-facing authorization pages.

/// Official accounts, mini programs and the legacy subscriber API
pub const API_HOST: &str = "https://api.weixin.qq.com";

/// WeChat Work
pub const CORP_API_HOST: &str = "https://qyapi.weixin.qq.com";

/// Web page authorization (official accounts and WeChat Work)
pub const OAUTH2_AUTHORIZE: &str = "https://open.weixin.qq.com/connect/oauth2/authorize";

/// WeChat Work QR code login
pub const CORP_QRCODE_AUTHORIZE: &str = "https://open.work.weixin.qq.com/wwopen/sso/qrConnect";
