//! Endpoint URL composition and query-parameter attachment.
//!
//! Merchant endpoints live at `{base}/{version}/{route}[/{id}]` and
//! authenticate with `app_id` / `app_secret` query parameters; the offers
//! listing lives at `{base}/p2p/index` and carries no credentials.

use url::Url;

use super::ClientError;
use crate::config::{CompatConfig, Credentials, PaginationMode};
use crate::objects::PageQuery;

pub const ROUTE_INFO: &str = "info";
pub const ROUTE_INVOICE: &str = "create_invoice";
pub const ROUTE_TRANSACTIONS: &str = "transactions";
pub const ROUTE_TRANSACTION: &str = "transaction";
pub const ROUTE_BALANCE: &str = "balance";
pub const ROUTE_OFFERS: &str = "p2p/index";

/// Every endpoint the SDK talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Info,
    CreateInvoice,
    Transactions,
    Transaction(&'a str),
    Balance,
    Offers,
}

impl<'a> Endpoint<'a> {
    pub fn route(&self) -> &'static str {
        match self {
            Endpoint::Info => ROUTE_INFO,
            Endpoint::CreateInvoice => ROUTE_INVOICE,
            Endpoint::Transactions => ROUTE_TRANSACTIONS,
            Endpoint::Transaction(_) => ROUTE_TRANSACTION,
            Endpoint::Balance => ROUTE_BALANCE,
            Endpoint::Offers => ROUTE_OFFERS,
        }
    }

    /// Whether the route sits under the version segment.
    pub fn is_versioned(&self) -> bool {
        !matches!(self, Endpoint::Offers)
    }

    pub fn path_param(&self) -> Option<&'a str> {
        match self {
            Endpoint::Transaction(id) => Some(*id),
            _ => None,
        }
    }

    /// Compose the endpoint URL without a query string.
    pub fn url(&self, base_url: &str, api_version: &str) -> Result<Url, ClientError> {
        let version = self.is_versioned().then_some(api_version);
        build_url(base_url, version, self.route(), self.path_param())
    }
}

/// `{base}/{version}/{route}[/{path_param}]`. A trailing `/` on `base` is
/// ignored and `path_param` is percent-encoded.
pub fn build_url(
    base_url: &str,
    version: Option<&str>,
    route: &str,
    path_param: Option<&str>,
) -> Result<Url, ClientError> {
    let mut raw = base_url.trim_end_matches('/').to_string();
    if let Some(version) = version {
        raw.push('/');
        raw.push_str(version);
    }
    raw.push('/');
    raw.push_str(route);
    if let Some(param) = path_param {
        raw.push('/');
        raw.push_str(&urlencoding::encode(param));
    }
    Url::parse(&raw).map_err(|source| ClientError::Construction { url: raw, source })
}

/// Append `app_id` and `app_secret`.
pub fn authenticate(url: &mut Url, credentials: &Credentials) {
    url.query_pairs_mut()
        .append_pair("app_id", credentials.app_id())
        .append_pair("app_secret", credentials.app_secret());
}

/// Append `page` as `mode` dictates. Leaves the query untouched otherwise.
pub fn paginate(url: &mut Url, mode: PaginationMode, query: PageQuery) {
    if let Some(page) = mode.page_param(query.page) {
        url.query_pairs_mut().append_pair("page", &page.to_string());
    }
}

/// Append the invoice parameters: `amount`, `description`, `remote_id` and
/// `signed`.
pub fn invoice_params(
    url: &mut Url,
    compat: &CompatConfig,
    amount: f64,
    description: &str,
    remote_id: &str,
) {
    url.query_pairs_mut()
        .append_pair("amount", &compat.amount_format.render(amount))
        .append_pair("description", description)
        .append_pair("remote_id", remote_id)
        .append_pair("signed", compat.invoice_signature.value(remote_id));
}
