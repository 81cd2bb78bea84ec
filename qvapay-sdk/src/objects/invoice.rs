//! Invoice creation.

use serde::{Deserialize, Serialize};

use super::{null_as_default, parse_amount};

/// Response of `GET /v1/create_invoice`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    #[serde(deserialize_with = "null_as_default")]
    pub app_id: String,
    /// Decimal string, e.g. `"25.60"`.
    #[serde(deserialize_with = "null_as_default")]
    pub amount: String,
    #[serde(alias = "desciption", deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub remote_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signed: String,
    /// The upstream spells this member `transation_uuid`.
    #[serde(
        rename = "transation_uuid",
        alias = "transaction_uuid",
        deserialize_with = "null_as_default"
    )]
    pub transaction_uuid: String,
    /// Payment page for the customer.
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    /// Payment page with an expiring signature.
    #[serde(rename = "signedUrl", deserialize_with = "null_as_default")]
    pub signed_url: String,
}

impl Invoice {
    pub fn amount_decimal(&self) -> Result<rust_decimal::Decimal, rust_decimal::Error> {
        parse_amount(&self.amount)
    }

    pub fn amount_f64(&self) -> Result<f64, std::num::ParseFloatError> {
        self.amount.trim().parse()
    }
}
