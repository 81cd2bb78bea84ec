//! Records exchanged with the QvaPay API.
//!
//! The upstream omits empty fields and sometimes sends `null` instead, so
//! every record decodes missing or `null` members to their zero value.

pub mod app;
pub mod balance;
pub mod invoice;
pub mod p2p;
pub mod transaction;

pub use app::{App, AppInfo};
pub use balance::{BalanceParseError, parse_balance};
pub use invoice::Invoice;
pub use p2p::Offers;
pub use transaction::{Owner, PaidBy, Transaction, TransactionDetail, TransactionPage};

use serde::{Deserialize, Deserializer};

/// Page selector for paginated endpoints. `None` and `Some(0)` both mean
/// "no page given".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    pub fn page(page: u32) -> Self {
        Self { page: Some(page) }
    }
}

/// Decode `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a decimal amount string exactly.
pub(crate) fn parse_amount(amount: &str) -> Result<rust_decimal::Decimal, rust_decimal::Error> {
    amount.trim().parse()
}

/// Parse an upstream timestamp such as `2021-01-10T04:35:33.000000Z`.
pub(crate) fn parse_timestamp(value: &str) -> Result<time::OffsetDateTime, time::error::Parse> {
    time::OffsetDateTime::parse(value, &time::format_description::well_known::Rfc3339)
}
