//! Response decoding and error classification.
//!
//! Only `200 OK` counts as success. Merchant endpoints report any other
//! status as [`ClientError::UnexpectedStatus`]; the offers endpoint first
//! tries the `{"error": ...}` envelope.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::ClientError;
use crate::http::HttpResponse;
use crate::objects::parse_balance;

/// Fail with [`ClientError::UnexpectedStatus`] unless the status is `200`.
pub fn expect_ok(response: HttpResponse) -> Result<HttpResponse, ClientError> {
    if response.status == StatusCode::OK {
        return Ok(response);
    }
    warn!(status = %response.status, "Unexpected response status");
    Err(ClientError::UnexpectedStatus {
        status: response.status,
        body: response.body,
    })
}

/// Decode a `200` body into `T`.
pub fn decode_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ClientError> {
    let response = expect_ok(response)?;
    parse_json(response.body)
}

/// Decode the balance endpoint's `{"VALUE"}` body.
pub fn decode_balance(response: HttpResponse) -> Result<f64, ClientError> {
    let response = expect_ok(response)?;
    parse_balance(&response.body).map_err(|e| ClientError::Decode {
        body: response.body,
        source: Box::new(e),
    })
}

/// Decode a `200` body into `T`; classify anything else with
/// [`api_error`].
pub fn decode_enveloped<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ClientError> {
    if response.status != StatusCode::OK {
        warn!(status = %response.status, "Unexpected response status");
        return Err(api_error(response.status, response.body));
    }
    parse_json(response.body)
}

/// Classify a failed response body.
///
/// A JSON object with an `error` member becomes [`ClientError::Envelope`]
/// carrying that member untouched. Anything else keeps the raw body in
/// [`ClientError::UnexpectedStatus`].
pub fn api_error(status: StatusCode, body: String) -> ClientError {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Object(mut object)) if object.contains_key("error") => {
            ClientError::Envelope {
                status,
                error: object.remove("error").unwrap_or_default(),
            }
        }
        _ => ClientError::UnexpectedStatus { status, body },
    }
}

fn parse_json<T: DeserializeOwned>(body: String) -> Result<T, ClientError> {
    serde_json::from_str(&body).map_err(|e| ClientError::Decode {
        body,
        source: Box::new(e),
    })
}
