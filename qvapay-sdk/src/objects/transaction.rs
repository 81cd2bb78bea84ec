//! Transactions and their paginated listing.

use serde::{Deserialize, Serialize};

use super::app::App;
use super::{null_as_default, parse_amount, parse_timestamp};

/// A transaction as it appears in a [`TransactionPage`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(rename = "uuid", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub app_id: i64,
    /// Decimal string, e.g. `"30.00"`.
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remote_id: String,
    /// `pending`, `paid`, ...
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub paid_by_user_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub signed: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
}

impl Transaction {
    pub fn amount_decimal(&self) -> Result<rust_decimal::Decimal, rust_decimal::Error> {
        parse_amount(&self.amount)
    }

    pub fn created_at_time(&self) -> Result<time::OffsetDateTime, time::error::Parse> {
        parse_timestamp(&self.created_at)
    }

    pub fn updated_at_time(&self) -> Result<time::OffsetDateTime, time::error::Parse> {
        parse_timestamp(&self.updated_at)
    }

    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}

/// Who paid a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaidBy {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
}

/// Owner of the application that created a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    #[serde(rename = "uuid", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lastname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
}

/// Response of `GET /v1/transaction/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default, deserialize_with = "null_as_default")]
    pub paid_by: PaidBy,
    #[serde(default, deserialize_with = "null_as_default")]
    pub app: App,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: Owner,
}

/// Response of `GET /v1/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionPage {
    #[serde(deserialize_with = "null_as_default")]
    pub current_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<Transaction>,
    #[serde(alias = "frist_page_url", deserialize_with = "null_as_default")]
    pub first_page_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub from: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub last_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub last_page_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub next_page_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub per_page: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_page_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u32,
}

impl TransactionPage {
    pub fn has_next_page(&self) -> bool {
        !self.next_page_url.is_empty() || self.current_page < self.last_page
    }
}
