//! HTTP clients for the QvaPay API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the wire records do not pull in `reqwest`.
//!
//! Two capability variants share one trait, [`QvaPayApi`]:
//!
//! * [`MerchantClient`] – the app-credential family (`/v1/...`) plus offers.
//! * [`AccountClient`] – the unauthenticated peer-to-peer family.
//!
//! [`connect`] picks one from a mode string.

mod account;
pub mod decode;
mod merchant;
pub mod request;
mod transport;

pub use account::AccountClient;
pub use merchant::MerchantClient;
pub use transport::{CancelHandle, CancelToken, HttpTransport, Traced, Transport, cancel_pair};

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::ClientConfig;
use crate::objects::{AppInfo, Invoice, Offers, PageQuery, TransactionDetail, TransactionPage};

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The endpoint URL could not be composed from the base URL. Raised
    /// before any network I/O.
    #[error("invalid url {url:?}: {source}")]
    Construction {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Request construction, network I/O or cancellation failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a status other than `200 OK`.
    #[error("unexpected response status {status}: {body:?}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// The server answered with a `{"error": ...}` envelope. The `error`
    /// member is kept as-is, string or structured.
    #[error("api error, status {status}: {error}")]
    Envelope {
        status: StatusCode,
        error: serde_json::Value,
    },

    /// The body did not match the expected shape.
    #[error("decoding error for data {body:?}: {source}")]
    Decode {
        body: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The selected client variant does not offer this operation.
    #[error("{operation} is not supported by the {kind} client")]
    Unsupported {
        operation: &'static str,
        kind: ClientKind,
    },

    /// The factory was given a mode string it does not know.
    #[error("unknown client kind {0:?}, expected \"app\" or \"qvapay\"")]
    UnknownClientKind(String),
}

impl ClientError {
    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::UnexpectedStatus { status, .. } | ClientError::Envelope { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Transport(TransportError::Cancelled))
    }
}

/// Failures below the HTTP status line.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The pooled HTTP client could not be built (TLS backend, ...).
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// DNS, TLS, connection reset, timeout, ...
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller's cancellation token fired while the request was in flight.
    #[error("request cancelled")]
    Cancelled,
}

/// The two client variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    /// App-credential client (`"app"`).
    Merchant,
    /// Peer-to-peer client (`"qvapay"`).
    Account,
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientKind::Merchant => write!(f, "app"),
            ClientKind::Account => write!(f, "qvapay"),
        }
    }
}

impl FromStr for ClientKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" | "merchant" => Ok(ClientKind::Merchant),
            "qvapay" | "account" => Ok(ClientKind::Account),
            other => Err(ClientError::UnknownClientKind(other.to_string())),
        }
    }
}

/// Every QvaPay operation. Each call is one stateless GET.
#[async_trait]
pub trait QvaPayApi: Send + Sync + fmt::Debug {
    fn kind(&self) -> ClientKind;

    /// `GET /v1/info` – metadata of the calling application.
    async fn get_info(&self) -> Result<AppInfo, ClientError>;

    /// `GET /v1/create_invoice` – create a payment request.
    async fn create_invoice(
        &self,
        amount: f64,
        description: &str,
        remote_id: &str,
    ) -> Result<Invoice, ClientError>;

    /// `GET /v1/transactions` – one page of the application's transactions.
    async fn get_transactions(&self, query: PageQuery) -> Result<TransactionPage, ClientError>;

    /// `GET /v1/transaction/{id}` – one transaction with payer, app and owner.
    async fn get_transaction(&self, id: &str) -> Result<TransactionDetail, ClientError>;

    /// `GET /v1/balance` – the application's balance.
    async fn get_balance(&self) -> Result<f64, ClientError>;

    /// `GET /p2p/index` – peer-to-peer offers.
    async fn list_offers(&self, query: PageQuery) -> Result<Offers, ClientError>;
}

impl ClientKind {
    /// Build a client of this kind.
    pub fn connect(self, config: ClientConfig) -> Result<Box<dyn QvaPayApi>, ClientError> {
        match self {
            ClientKind::Merchant => Ok(Box::new(MerchantClient::new(config)?)),
            ClientKind::Account => Ok(Box::new(AccountClient::new(config)?)),
        }
    }
}

/// Build the client variant named by `mode` (`"app"` or `"qvapay"`).
pub fn connect(mode: &str, config: ClientConfig) -> Result<Box<dyn QvaPayApi>, ClientError> {
    mode.parse::<ClientKind>()?.connect(config)
}
