//! Account API client (public peer-to-peer endpoints).
//!
//! Only the offers listing is available here; the merchant operations need
//! app credentials and fail with [`ClientError::Unsupported`] before any
//! request is sent.

use std::sync::Arc;

use async_trait::async_trait;

use super::decode::decode_enveloped;
use super::request::{Endpoint, paginate};
use super::transport::{CancelToken, Dispatcher, Transport};
use super::{ClientError, ClientKind, QvaPayApi};
use crate::config::{ClientConfig, PaginationMode};
use crate::http::HttpRequest;
use crate::objects::{AppInfo, Invoice, Offers, PageQuery, TransactionDetail, TransactionPage};

/// Typed HTTP client for the QvaPay **peer-to-peer API**.
#[derive(Debug, Clone)]
pub struct AccountClient {
    dispatcher: Dispatcher,
    base_url: String,
    api_version: String,
    pagination: PaginationMode,
}

impl AccountClient {
    /// Create a new `AccountClient`. Credentials in `config` are ignored.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let dispatcher = Dispatcher::new(&config)?;
        Ok(Self {
            dispatcher,
            base_url: config.base_url,
            api_version: config.api_version,
            pagination: config.compat.offers_pagination,
        })
    }

    /// Replace the default transport with a custom one.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.dispatcher = self.dispatcher.replace_transport(transport);
        self
    }

    /// Bind every call made through the returned client to `token`.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.dispatcher = self.dispatcher.with_cancel_token(token);
        self
    }

    pub fn build_list_offers(&self, query: PageQuery) -> Result<HttpRequest, ClientError> {
        let mut url = Endpoint::Offers.url(&self.base_url, &self.api_version)?;
        paginate(&mut url, self.pagination, query);
        Ok(HttpRequest::get(url))
    }

    fn unsupported<T>(&self, operation: &'static str) -> Result<T, ClientError> {
        Err(ClientError::Unsupported {
            operation,
            kind: ClientKind::Account,
        })
    }
}

#[async_trait]
impl QvaPayApi for AccountClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Account
    }

    async fn get_info(&self) -> Result<AppInfo, ClientError> {
        self.unsupported("get_info")
    }

    async fn create_invoice(
        &self,
        _amount: f64,
        _description: &str,
        _remote_id: &str,
    ) -> Result<Invoice, ClientError> {
        self.unsupported("create_invoice")
    }

    async fn get_transactions(&self, _query: PageQuery) -> Result<TransactionPage, ClientError> {
        self.unsupported("get_transactions")
    }

    async fn get_transaction(&self, _id: &str) -> Result<TransactionDetail, ClientError> {
        self.unsupported("get_transaction")
    }

    async fn get_balance(&self) -> Result<f64, ClientError> {
        self.unsupported("get_balance")
    }

    async fn list_offers(&self, query: PageQuery) -> Result<Offers, ClientError> {
        let request = self.build_list_offers(query)?;
        decode_enveloped(self.dispatcher.execute(request).await?)
    }
}
