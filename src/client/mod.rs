//! HTTP transport
//!
//! [`HttpClient`] is the seam between the facades and the network: it issues
//! GET/POST requests and multipart uploads and hands back raw response bytes.
//! [`ReqwestClient`] is the default implementation; anything else (a test
//! double, a client with custom TLS or proxies) can be plugged into a facade
//! with `with_client`.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use http::Method;

use crate::error::WechatError;

mod reqwest_client;
pub use reqwest_client::ReqwestClient;

mod builder;
pub use builder::ReqwestClientBuilder;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Per-call transport options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One part of a loaded multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    File {
        name: String,
        filename: String,
        data: Vec<u8>,
    },
    Text {
        name: String,
        value: String,
    },
}

/// Multipart form with all file contents in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

/// Transport used by the facades.
///
/// Implementations return the response body of a successful (2xx) exchange
/// and report everything else as an error. They must not interpret the
/// `errcode` envelope.
pub trait HttpClient: Send + Sync {
    /// Sends a request. `body`, when present, is a JSON document.
    fn request<'a>(
        &'a self,
        method: Method,
        url: &'a str,
        body: Option<Vec<u8>>,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Vec<u8>, WechatError>>;

    /// Sends a `multipart/form-data` POST.
    fn upload<'a>(
        &'a self,
        url: &'a str,
        form: MultipartForm,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Vec<u8>, WechatError>>;
}
