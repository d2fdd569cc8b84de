//! Resource facade: typed convenience calls layered on the dispatcher.
//!
//! Every operation validates its identifiers and payloads up front and fails with a
//! [`ConfigError`] before any transport call; the request itself is delegated to
//! [`Client::request`](crate::client::Client::request). No signing or transport logic lives here.

mod schools;
mod sections;
mod users;

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::IdentifierError, client, error::ConfigError, request::Method};

/// Parses a raw identifier for `operation`, logging the rejection when it is invalid.
fn parse_id<T>(operation: &'static str, method: Method, raw: &str) -> Result<T>
where
	T: FromStr<Err = IdentifierError>,
{
	raw.parse().map_err(|e| client::rejected(method, operation, ConfigError::from(e)))
}

/// Rejects `null` payloads for `operation`.
fn require_payload(operation: &'static str, method: Method, body: Value) -> Result<Value> {
	if body.is_null() {
		return Err(client::rejected(method, operation, ConfigError::MissingPayload { operation }));
	}

	Ok(body)
}
