//! Pooled HTTP transport, traffic dumps and cancellation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::watch;
use tracing::{debug, error};

use super::{ClientError, TransportError};
use crate::config::{ClientConfig, TraceSink, TransportConfig};
use crate::http::{HttpRequest, HttpResponse};

/// Sends one request and returns the fully read response.
///
/// Implementations must read the body to the end before returning, whatever
/// the status, so pooled connections can be reused.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

/// [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build the pooled client. The configuration is final: nothing about
    /// the client changes after this returns.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.skip_tls_verify);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::Build)?;
        Ok(Self { http })
    }

    /// Wrap a preconfigured `reqwest::Client` (proxy, custom timeouts, ...).
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // Drained before returning so the connection goes back to the pool.
        let body = resp.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Decorator writing every request and response to a [`TraceSink`].
///
/// A failed write terminates the process: a broken debug channel is not
/// something a business call can recover from.
#[derive(Debug)]
pub struct Traced<T> {
    inner: T,
    sink: TraceSink,
}

impl<T: Transport> Traced<T> {
    pub fn new(inner: T, sink: TraceSink) -> Self {
        Self { inner, sink }
    }
}

#[async_trait]
impl<T: Transport> Transport for Traced<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        emit(&self.sink, &request.dump());
        let response = self.inner.send(request).await?;
        emit(&self.sink, &response.dump());
        Ok(response)
    }
}

fn emit(sink: &TraceSink, dump: &str) {
    if let Err(e) = sink.write_dump(dump) {
        error!(error = %e, "Failed to write traffic dump");
        std::process::exit(1);
    }
}

/// Create a linked cancellation handle and token.
pub fn cancel_pair() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle(tx), CancelToken(rx))
}

/// Fires the paired [`CancelToken`]s.
#[derive(Debug)]
pub struct CancelHandle(watch::Sender<bool>);

impl CancelHandle {
    /// Abort every in-flight and future call bound to the paired tokens.
    pub fn cancel(&self) {
        self.0.send_replace(true);
    }
}

/// Cancellation signal a client can be bound to.
#[derive(Debug, Clone)]
pub struct CancelToken(watch::Receiver<bool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolve once the paired handle fires. Never resolves if the handle is
    /// dropped without firing.
    pub async fn cancelled(&self) {
        let mut rx = self.0.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Shared plumbing of both client variants: the transport (possibly traced)
/// and the optional cancellation token.
#[derive(Debug, Clone)]
pub(crate) struct Dispatcher {
    transport: Arc<dyn Transport>,
    trace: Option<TraceSink>,
    cancel: Option<CancelToken>,
}

impl Dispatcher {
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = HttpTransport::new(&config.transport)?;
        Ok(Self::with_transport(Arc::new(http), config.trace.clone()))
    }

    pub(crate) fn with_transport(transport: Arc<dyn Transport>, trace: Option<TraceSink>) -> Self {
        let transport = match &trace {
            Some(sink) => Arc::new(Traced::new(transport, sink.clone())) as Arc<dyn Transport>,
            None => transport,
        };
        Self {
            transport,
            trace,
            cancel: None,
        }
    }

    /// Swap the underlying transport, keeping tracing and cancellation.
    pub(crate) fn replace_transport(self, transport: Arc<dyn Transport>) -> Self {
        let cancel = self.cancel;
        Self {
            cancel,
            ..Self::with_transport(transport, self.trace)
        }
    }

    pub(crate) fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, path = request.url.path(), "Sending request");

        let response = match &self.cancel {
            None => self.transport.send(request).await?,
            Some(token) => {
                if token.is_cancelled() {
                    return Err(TransportError::Cancelled.into());
                }
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(TransportError::Cancelled.into()),
                    result = self.transport.send(request) => result?,
                }
            }
        };

        debug!(status = %response.status, bytes = response.body.len(), "Received response");
        Ok(response)
    }
}
