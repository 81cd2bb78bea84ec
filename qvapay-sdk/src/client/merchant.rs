//! Merchant API client (application backend → QvaPay).
//!
//! Every request is a GET carrying the application's `app_id` and
//! `app_secret` as query parameters.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use super::decode::{decode_balance, decode_enveloped, decode_json};
use super::request::{Endpoint, authenticate, invoice_params, paginate};
use super::transport::{CancelToken, Dispatcher, HttpTransport, Transport};
use super::{ClientError, ClientKind, QvaPayApi};
use crate::config::{ClientConfig, CompatConfig, Credentials};
use crate::http::HttpRequest;
use crate::objects::{AppInfo, Invoice, Offers, PageQuery, TransactionDetail, TransactionPage};

/// Typed HTTP client for the QvaPay **merchant API**.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct MerchantClient {
    dispatcher: Dispatcher,
    base_url: String,
    api_version: String,
    credentials: Credentials,
    compat: CompatConfig,
}

impl MerchantClient {
    /// Create a new `MerchantClient` with the pooled transport described by
    /// `config.transport`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let dispatcher = Dispatcher::new(&config)?;
        Ok(Self {
            dispatcher,
            base_url: config.base_url,
            api_version: config.api_version,
            credentials: config.credentials,
            compat: config.compat,
        })
    }

    /// Replace the default transport with a custom one (test doubles,
    /// recording proxies, ...). Tracing and cancellation are kept.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.dispatcher = self.dispatcher.replace_transport(transport);
        self
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(self, client: Client) -> Self {
        self.with_transport(Arc::new(HttpTransport::from_client(client)))
    }

    /// Bind every call made through the returned client to `token`.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.dispatcher = self.dispatcher.with_cancel_token(token);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authenticated(&self, endpoint: Endpoint<'_>) -> Result<url::Url, ClientError> {
        let mut url = endpoint.url(&self.base_url, &self.api_version)?;
        authenticate(&mut url, &self.credentials);
        Ok(url)
    }

    pub fn build_get_info(&self) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest::get(self.authenticated(Endpoint::Info)?))
    }

    pub fn build_create_invoice(
        &self,
        amount: f64,
        description: &str,
        remote_id: &str,
    ) -> Result<HttpRequest, ClientError> {
        let mut url = self.authenticated(Endpoint::CreateInvoice)?;
        invoice_params(&mut url, &self.compat, amount, description, remote_id);
        Ok(HttpRequest::get(url))
    }

    pub fn build_get_transactions(&self, query: PageQuery) -> Result<HttpRequest, ClientError> {
        let mut url = self.authenticated(Endpoint::Transactions)?;
        paginate(&mut url, self.compat.transactions_pagination, query);
        Ok(HttpRequest::get(url))
    }

    pub fn build_get_transaction(&self, id: &str) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest::get(self.authenticated(Endpoint::Transaction(id))?))
    }

    pub fn build_get_balance(&self) -> Result<HttpRequest, ClientError> {
        Ok(HttpRequest::get(self.authenticated(Endpoint::Balance)?))
    }

    /// The offers listing is public: no credentials are attached.
    pub fn build_list_offers(&self, query: PageQuery) -> Result<HttpRequest, ClientError> {
        let mut url = Endpoint::Offers.url(&self.base_url, &self.api_version)?;
        paginate(&mut url, self.compat.offers_pagination, query);
        Ok(HttpRequest::get(url))
    }
}

#[async_trait]
impl QvaPayApi for MerchantClient {
    fn kind(&self) -> ClientKind {
        ClientKind::Merchant
    }

    async fn get_info(&self) -> Result<AppInfo, ClientError> {
        let request = self.build_get_info()?;
        decode_json(self.dispatcher.execute(request).await?)
    }

    async fn create_invoice(
        &self,
        amount: f64,
        description: &str,
        remote_id: &str,
    ) -> Result<Invoice, ClientError> {
        let request = self.build_create_invoice(amount, description, remote_id)?;
        decode_json(self.dispatcher.execute(request).await?)
    }

    async fn get_transactions(&self, query: PageQuery) -> Result<TransactionPage, ClientError> {
        let request = self.build_get_transactions(query)?;
        decode_json(self.dispatcher.execute(request).await?)
    }

    async fn get_transaction(&self, id: &str) -> Result<TransactionDetail, ClientError> {
        let request = self.build_get_transaction(id)?;
        decode_json(self.dispatcher.execute(request).await?)
    }

    async fn get_balance(&self) -> Result<f64, ClientError> {
        let request = self.build_get_balance()?;
        decode_balance(self.dispatcher.execute(request).await?)
    }

    async fn list_offers(&self, query: PageQuery) -> Result<Offers, ClientError> {
        let request = self.build_list_offers(query)?;
        decode_enveloped(self.dispatcher.execute(request).await?)
    }
}
