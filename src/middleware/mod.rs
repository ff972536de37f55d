//! Tower middleware for [`ReqwestClient`](crate::client::ReqwestClient).
//!
//! ```ignore
//! use wechat_sdk::client::ReqwestClient;
//! use wechat_sdk::middleware::LoggingMiddleware;
//!
//! let client = ReqwestClient::builder()
//!     .with_middleware(LoggingMiddleware::new().verbose())
//!     .build()?;
//! ```

// Re-export tower types for convenience
pub use tower::{Layer, Service, ServiceBuilder};

mod logging;

pub(crate) use logging::redact_url;
pub use logging::{LoggingMiddleware, LoggingMiddlewareService};
