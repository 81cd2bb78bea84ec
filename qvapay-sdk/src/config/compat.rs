//! Compatibility modes for upstream quirks.
//!
//! The QvaPay API and its older clients disagree on a few details. Each one is
//! a named mode so callers pick the behaviour their integration relies on.

/// How a `page` query parameter is attached when the caller gives no page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// Send `page=1` when no positive page is given.
    #[default]
    DefaultFirstPage,
    /// Leave `page` out entirely when no positive page is given.
    OmitWhenUnset,
}

impl PaginationMode {
    /// The value of the `page` parameter to send, if any.
    pub fn page_param(self, page: Option<u32>) -> Option<u32> {
        match (page.filter(|p| *p > 0), self) {
            (Some(page), _) => Some(page),
            (None, PaginationMode::DefaultFirstPage) => Some(1),
            (None, PaginationMode::OmitWhenUnset) => None,
        }
    }
}

/// How the invoice `amount` parameter is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountFormat {
    /// Fixed-point with six decimals: `25.6` → `25.600000`.
    #[default]
    FixedSixDecimals,
    /// Shortest decimal that round-trips: `25.6` → `25.6`.
    Shortest,
}

impl AmountFormat {
    pub fn render(self, amount: f64) -> String {
        match self {
            AmountFormat::FixedSixDecimals => format!("{amount:.6}"),
            AmountFormat::Shortest => amount.to_string(),
        }
    }
}

/// What goes into the invoice `signed` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InvoiceSignature {
    /// Repeat the caller's `remote_id`, as deployed clients always have.
    #[default]
    RemoteId,
    /// Send this literal value instead.
    Flag(String),
}

impl InvoiceSignature {
    pub fn value<'a>(&'a self, remote_id: &'a str) -> &'a str {
        match self {
            InvoiceSignature::RemoteId => remote_id,
            InvoiceSignature::Flag(value) => value,
        }
    }
}

/// All compatibility switches together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatConfig {
    pub transactions_pagination: PaginationMode,
    pub offers_pagination: PaginationMode,
    pub amount_format: AmountFormat,
    pub invoice_signature: InvoiceSignature,
}

impl Default for CompatConfig {
    fn default() -> Self {
        Self {
            transactions_pagination: PaginationMode::DefaultFirstPage,
            offers_pagination: PaginationMode::OmitWhenUnset,
            amount_format: AmountFormat::FixedSixDecimals,
            invoice_signature: InvoiceSignature::RemoteId,
        }
    }
}
