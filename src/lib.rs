//! OAuth 1.0a signed client for the Schoology REST API: HMAC-SHA1 request signing, pluggable
//! transports, and normalized errors in one small crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod descriptor;
pub mod error;
pub mod oauth;
pub mod obs;
pub mod request;
pub mod resources;
pub mod transport;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		client::{Client, ReqwestTransportErrorMapper},
		descriptor::ApiDescriptor,
		transport::ReqwestHttpClient,
	};

	/// Client type alias used by reqwest-backed tests.
	pub type ReqwestTestClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Client`] pointed at `base_url` (typically a mock server) with the
	/// reqwest transport used across tests.
	pub fn build_reqwest_test_client(
		base_url: &str,
		consumer_key: &str,
		consumer_secret: &str,
	) -> ReqwestTestClient {
		let credentials = Credentials::new(consumer_key, consumer_secret)
			.expect("Test credentials should be valid.");
		let descriptor = ApiDescriptor::builder()
			.base_url(Url::parse(base_url).expect("Failed to parse mock server base URL."))
			.build()
			.expect("Failed to build test API descriptor.");

		Client::with_http_client(
			credentials,
			descriptor,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _, tokio as _};
