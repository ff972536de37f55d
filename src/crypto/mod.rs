//! Decryption of mini program encrypted data
//!
//! Sensitive fields returned by `wx.getUserInfo`, `wx.getPhoneNumber` and
//! similar mini program APIs arrive encrypted with the user's session key.
//! [`Minip::decrypt_auth_info`](crate::minip::Minip::decrypt_auth_info) is
//! the usual entry point; the functions here are exposed for callers that
//! keep session keys elsewhere.
//!
//! The session key must stay on the server.

pub mod aes;

pub use crate::types::Watermark;
pub use aes::{decrypt_user_data, DecryptedUserData, UserDataCipher};
