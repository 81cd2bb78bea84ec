//! TOML file configuration structures.
//!
//! These structs directly map to the `qvapay.toml` file format. Every section
//! and key is optional.

use qvapay_sdk::config::{AmountFormat, CompatConfig, InvoiceSignature, PaginationMode};
use serde::{Deserialize, Serialize};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub client: ClientSection,
    pub compat: CompatSection,
}

/// Connection and credential settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    /// `"app"` (merchant) or `"qvapay"` (peer-to-peer).
    pub mode: Option<String>,
    pub base_url: Option<String>,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Whole-request timeout in seconds.
    pub timeout: Option<u64>,
    /// Dump every request and response to stderr.
    pub debug: bool,
}

/// Compatibility switches, see [`CompatConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompatSection {
    pub transactions_pagination: Option<Pagination>,
    pub offers_pagination: Option<Pagination>,
    pub amount_format: Option<Amount>,
    /// Literal `signed` value for invoices. Unset repeats the `remote_id`.
    pub signed: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pagination {
    FirstPage,
    Omit,
}

impl From<Pagination> for PaginationMode {
    fn from(value: Pagination) -> Self {
        match value {
            Pagination::FirstPage => PaginationMode::DefaultFirstPage,
            Pagination::Omit => PaginationMode::OmitWhenUnset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Amount {
    Fixed,
    Shortest,
}

impl From<Amount> for AmountFormat {
    fn from(value: Amount) -> Self {
        match value {
            Amount::Fixed => AmountFormat::FixedSixDecimals,
            Amount::Shortest => AmountFormat::Shortest,
        }
    }
}

impl CompatSection {
    /// Overlay the switches set in the file on the SDK defaults.
    pub fn to_compat(&self) -> CompatConfig {
        let defaults = CompatConfig::default();
        CompatConfig {
            transactions_pagination: self
                .transactions_pagination
                .map_or(defaults.transactions_pagination, Into::into),
            offers_pagination: self
                .offers_pagination
                .map_or(defaults.offers_pagination, Into::into),
            amount_format: self
                .amount_format
                .map_or(defaults.amount_format, Into::into),
            invoice_signature: match &self.signed {
                Some(flag) => InvoiceSignature::Flag(flag.clone()),
                None => defaults.invoice_signature,
            },
        }
    }
}
