//! Two-legged OAuth consumer credentials with a redacting secret wrapper.

// self
use crate::{_prelude::*, error::ConfigError};

/// Redacted consumer secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerSecret(String);
impl ConsumerSecret {
	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ConsumerSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ConsumerSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ConsumerSecret").field(&"<redacted>").finish()
	}
}
impl Display for ConsumerSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Consumer key/secret pair used to sign every request.
///
/// Both halves are validated once; an instance can only exist with non-empty values and never
/// changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	consumer_key: String,
	consumer_secret: ConsumerSecret,
}
impl Credentials {
	/// Validates and stores a consumer key/secret pair.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> Result<Self, ConfigError> {
		Self::from_parts(Some(consumer_key.into()), Some(consumer_secret.into()))
	}

	/// Same as [`Credentials::new`] but accepts absent values, which are rejected like empty
	/// ones.
	pub fn from_parts(
		consumer_key: Option<String>,
		consumer_secret: Option<String>,
	) -> Result<Self, ConfigError> {
		let consumer_key = require("consumer key", consumer_key)?;
		let consumer_secret = require("consumer secret", consumer_secret)?;

		Ok(Self { consumer_key, consumer_secret: ConsumerSecret(consumer_secret) })
	}

	/// Consumer key sent as `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Consumer secret used to derive the signing key.
	pub fn consumer_secret(&self) -> &ConsumerSecret {
		&self.consumer_secret
	}
}

fn require(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
	match value {
		Some(value) if !value.trim().is_empty() => Ok(value),
		_ => Err(ConfigError::MissingCredential { field }),
	}
}
