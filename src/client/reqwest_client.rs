//! Default transport built on reqwest.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use http::Method;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tower::Service;

use super::{BoxFuture, FormPart, HttpClient, MultipartForm, RequestOptions, ReqwestClientBuilder};
use crate::error::WechatError;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor =
    Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// reqwest-backed [`HttpClient`]
///
/// Requests go through the tower middleware configured on the builder,
/// if any.
#[derive(Clone)]
pub struct ReqwestClient {
    http: Client,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Create a new client builder
    pub fn builder() -> ReqwestClientBuilder {
        ReqwestClientBuilder::default()
    }

    /// Client with the default timeouts and no middleware
    pub fn new() -> Result<Self, WechatError> {
        Self::builder().build()
    }

    pub(crate) fn from_parts(http: Client) -> Self {
        Self {
            http,
            middleware_executor: None,
        }
    }

    /// Returns the underlying [`reqwest::Client`].
    ///
    /// Requests made through it bypass the middleware pipeline.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    async fn send_request(&self, request: reqwest::Request) -> Result<Vec<u8>, WechatError> {
        let response = if let Some(executor) = &self.middleware_executor {
            (executor)(request).await?
        } else {
            self.http.execute(request).await?
        };

        if let Err(e) = response.error_for_status_ref() {
            return Err(e.into());
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn apply_options(
        mut builder: reqwest::RequestBuilder,
        options: &RequestOptions,
    ) -> reqwest::RequestBuilder {
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    fn multipart(form: MultipartForm) -> Form {
        form.parts
            .into_iter()
            .fold(Form::new(), |multipart, part| match part {
                FormPart::File {
                    name,
                    filename,
                    data,
                } => multipart.part(name, Part::bytes(data).file_name(filename)),
                FormPart::Text { name, value } => multipart.text(name, value),
            })
    }
}

impl HttpClient for ReqwestClient {
    fn request<'a>(
        &'a self,
        method: Method,
        url: &'a str,
        body: Option<Vec<u8>>,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Vec<u8>, WechatError>> {
        Box::pin(async move {
            let mut builder = self.http.request(method, url);
            if let Some(body) = body {
                builder = builder
                    .header(CONTENT_TYPE, "application/json; charset=utf-8")
                    .body(body);
            }

            let request = Self::apply_options(builder, options).build()?;
            self.send_request(request).await
        })
    }

    fn upload<'a>(
        &'a self,
        url: &'a str,
        form: MultipartForm,
        options: &'a RequestOptions,
    ) -> BoxFuture<'a, Result<Vec<u8>, WechatError>> {
        Box::pin(async move {
            let builder = self.http.post(url).multipart(Self::multipart(form));
            let request = Self::apply_options(builder, options).build()?;
            self.send_request(request).await
        })
    }
}

impl Service<reqwest::Request> for ReqwestClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}
