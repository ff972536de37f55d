//! AES-128-CBC decryption for mini program encrypted data

use aes::cipher::{BlockDecryptMut, KeyIvInit};
use aes::Aes128;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use cbc::cipher::block_padding::Pkcs7;
use cbc::Decryptor;
use serde::Deserialize;

use crate::error::WechatError;
use crate::types::{SessionKey, Watermark};

const BLOCK_LEN: usize = 16;

/// Decrypted payload with its watermark
#[derive(Debug, Clone, Deserialize)]
pub struct DecryptedUserData {
    /// Scenario specific fields (openId, unionId, phoneNumber, ...)
    #[serde(flatten)]
    pub data: serde_json::Value,
    pub watermark: Watermark,
}

impl DecryptedUserData {
    /// Fails with `WechatError::Signature` unless the watermark names `appid`.
    pub fn ensure_issued_for(&self, appid: &str) -> Result<(), WechatError> {
        if self.watermark.is_issued_for(appid) {
            return Ok(());
        }
        Err(WechatError::Signature(format!(
            "watermark issued for {}, not {}",
            self.watermark.appid, appid
        )))
    }
}

/// A user's session key, decoded once and reusable across payloads.
#[derive(Clone)]
pub struct UserDataCipher {
    key: [u8; BLOCK_LEN],
}

impl std::fmt::Debug for UserDataCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserDataCipher([REDACTED])")
    }
}

impl UserDataCipher {
    pub fn new(session_key: &SessionKey) -> Result<Self, WechatError> {
        Ok(Self {
            key: decode_block("session_key", session_key.as_str())?,
        })
    }

    /// Decrypts one base64 `encrypted_data` payload with its base64 `iv`.
    pub fn decrypt(&self, iv: &str, encrypted_data: &str) -> Result<DecryptedUserData, WechatError> {
        let iv = decode_block("iv", iv)?;
        let mut buffer = decode_field("encrypted_data", encrypted_data)?;

        let plaintext = Decryptor::<Aes128>::new((&self.key).into(), (&iv).into())
            .decrypt_padded_mut::<Pkcs7>(&mut buffer)
            .map_err(|_| {
                WechatError::Crypto("encrypted_data does not decrypt with this session_key".to_string())
            })?;

        serde_json::from_slice(plaintext)
            .map_err(|e| WechatError::Crypto(format!("decrypted payload is not user data: {}", e)))
    }
}

/// One-shot form of [`UserDataCipher::decrypt`].
pub fn decrypt_user_data(
    session_key: &SessionKey,
    iv: &str,
    encrypted_data: &str,
) -> Result<DecryptedUserData, WechatError> {
    UserDataCipher::new(session_key)?.decrypt(iv, encrypted_data)
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, WechatError> {
    BASE64
        .decode(value)
        .map_err(|e| WechatError::Crypto(format!("{} is not valid base64: {}", name, e)))
}

fn decode_block(name: &str, value: &str) -> Result<[u8; BLOCK_LEN], WechatError> {
    let bytes = decode_field(name, value)?;
    <[u8; BLOCK_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
        WechatError::Crypto(format!(
            "{} must decode to {} bytes, got {}",
            name,
            BLOCK_LEN,
            bytes.len()
        ))
    })
}
