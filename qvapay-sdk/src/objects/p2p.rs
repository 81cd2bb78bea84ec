//! Peer-to-peer offers.
//!
//! The shape of `GET /p2p/index` is not stable upstream, so it is exposed as
//! an open JSON object rather than a typed record.

/// Decoded body of the offers listing.
pub type Offers = serde_json::Map<String, serde_json::Value>;
