//! Unofficial SDK for the [QvaPay](https://qvapay.com) payment API.
//!
//! The crate is split the same way the API is consumed:
//!
//! * [`objects`] – the wire records returned by every endpoint.
//! * [`config`] – resolved client configuration and compatibility modes.
//! * [`client`] – the HTTP facades, request builder, decoder and transport
//!   (behind the default `client` feature).
//!
//! ```ignore
//! use qvapay_sdk::client::{MerchantClient, QvaPayApi};
//! use qvapay_sdk::config::{ClientConfig, ConfigOverrides, ProcessEnv};
//!
//! let config = ClientConfig::resolve(ConfigOverrides::default(), &ProcessEnv);
//! let client = MerchantClient::new(config)?;
//! let balance = client.get_balance().await?;
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod config;
#[cfg(feature = "client")]
pub mod http;
pub mod objects;
