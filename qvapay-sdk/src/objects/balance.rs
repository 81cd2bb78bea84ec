//! The balance endpoint's scalar envelope.
//!
//! `GET /v1/balance` answers with a bare decimal string inside braces, e.g.
//! `{"66.00"}`. That is not a JSON object, so it is unwrapped by hand.

use std::num::ParseFloatError;

/// Why a balance body could not be read.
#[derive(Debug, thiserror::Error)]
pub enum BalanceParseError {
    #[error("balance body is not wrapped in {{\"...\"}}")]
    MissingWrapper,
    #[error("balance is not a number: {0}")]
    InvalidNumber(#[from] ParseFloatError),
}

/// Unwrap `{"VALUE"}` and parse `VALUE` as a float.
///
/// Whitespace around the braces and around the quoted value is ignored.
pub fn parse_balance(body: &str) -> Result<f64, BalanceParseError> {
    let inner = body
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or(BalanceParseError::MissingWrapper)?
        .trim();
    let value = inner
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(BalanceParseError::MissingWrapper)?;
    Ok(value.parse()?)
}
