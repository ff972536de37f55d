//! WeChat SDK for Rust
//!
//! Server-side client for the WeChat API family:
//!
//! | Module | Product |
//! |--------|---------|
//! | [`offia`] | Official accounts |
//! | [`corp`] | WeChat Work (enterprise) |
//! | [`minip`] | Mini programs |
//! | [`r#pub`] | Legacy official account subscriber client |
//! | [`mch`] | Payment gateway constants |
//!
//! ## Quick Start
//!
//! Every endpoint is an [`Action`]: a description of one HTTP call plus a
//! decoder for its response. A product facade executes it with an access
//! token supplied by the caller.
//!
//! ```rust,ignore
//! use wechat_sdk::offia::{self, OffiA};
//! use wechat_sdk::types::{AppId, AppSecret};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let oa = OffiA::new(AppId::new("wx1234567890abcdef")?, AppSecret::new("secret")?)?;
//!
//!     let token = oa.access_token().await?;
//!     let accounts = oa.do_action(&token.token, offia::kf::get_account_list()).await?;
//!     println!("{} customer service accounts", accounts.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! Tokens are never cached by the SDK. Either pass a token string to
//! `do_action`, or implement [`TokenProvider`] and call `do_with`.
//!
//! ## Error Handling
//!
//! ```rust,ignore
//! use wechat_sdk::WechatError;
//!
//! match result {
//!     Ok(response) => { /* handle success */ }
//!     Err(WechatError::Api { code, message }) => {
//!         eprintln!("API error: {}|{}", code, message);
//!     }
//!     Err(WechatError::Http(e)) => {
//!         eprintln!("HTTP error: {}", e);
//!     }
//!     Err(e) => {
//!         eprintln!("Other error: {}", e);
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! Requests are logged through the [`log`](https://docs.rs/log) facade under
//! a `[wechat]` prefix, with tokens and secrets redacted. Add
//! [`middleware::LoggingMiddleware`] to the client for per-exchange timing.

pub mod action;
pub mod caller;
pub mod client;
pub mod corp;
pub mod crypto;
pub mod error;
pub mod mch;
pub mod middleware;
pub mod minip;
pub mod offia;
pub mod r#pub;
pub mod token;
pub mod types;
pub mod urls;
mod utils;

pub use action::Action;
pub use caller::Caller;
pub use client::{HttpClient, ReqwestClient, ReqwestClientBuilder, RequestOptions};
pub use error::WechatError;
pub use token::{AccessToken, StaticToken, TokenProvider};
