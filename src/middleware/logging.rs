use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use log::{log, warn, Level};
use reqwest::{Request, Response};
use tower::{Layer, Service};

/// Query parameters whose values never reach the log.
const SENSITIVE_PARAMS: &[&str] = &[
    "access_token",
    "secret",
    "corpsecret",
    "appsecret",
    "session_key",
    "code",
    "js_code",
    "password",
];

/// Replaces the values of sensitive query parameters with `[REDACTED]`.
pub(crate) fn redact_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };

    let redacted: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some((key, _)) if SENSITIVE_PARAMS.iter().any(|s| key.eq_ignore_ascii_case(s)) => {
                format!("{key}=[REDACTED]")
            }
            _ => param.to_string(),
        })
        .collect();

    format!("{base}?{}", redacted.join("&"))
}

/// Tower layer logging every exchange made by a
/// [`ReqwestClient`](crate::client::ReqwestClient).
///
/// One line per request and one per response (status, elapsed time), at
/// `info` by default. Non-2xx statuses and transport errors always go out
/// at `warn`.
#[derive(Clone, Copy, Debug)]
pub struct LoggingMiddleware {
    level: Level,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { level: Level::Info }
    }

    /// Log successful exchanges at `level` instead of `info`.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Shorthand for `level(Level::Debug)`.
    pub fn verbose(self) -> Self {
        self.level(Level::Debug)
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware {
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            level: self.level,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    level: Level,
}

impl<S> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let level = self.level;
        let line = format!("{} {}", req.method(), redact_url(req.url().as_str()));
        let mut inner = self.inner.clone();

        Box::pin(async move {
            log!(level, "[wechat] >>> {}", line);
            let started = Instant::now();

            match inner.call(req).await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        log!(level, "[wechat] <<< {} {} ({:?})", status.as_u16(), line, started.elapsed());
                    } else {
                        warn!("[wechat] <<< {} {} ({:?})", status.as_u16(), line, started.elapsed());
                    }
                    Ok(response)
                }
                Err(e) => {
                    warn!("[wechat] {} failed after {:?}: {}", line, started.elapsed(), e);
                    Err(e)
                }
            }
        })
    }
}
