//! API descriptor: the fixed base URL and request defaults a client is bound to.
//!
//! Descriptors are validated once by [`ApiDescriptorBuilder::build`] (deserialization goes
//! through the same path) so the dispatcher can join endpoint paths without re-checking the
//! base URL on every call.

/// Builder API for assembling API descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Default base URL of the Schoology REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.schoology.com/v1/";

/// Immutable API descriptor consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ApiDescriptorBuilder")]
pub struct ApiDescriptor {
	/// Base URL every relative endpoint is appended to; always ends with `/`.
	pub base_url: Url,
	/// Optional `User-Agent` sent with every request.
	pub user_agent: Option<String>,
}
impl ApiDescriptor {
	/// Creates a new builder seeded with the default base URL.
	pub fn builder() -> ApiDescriptorBuilder {
		ApiDescriptorBuilder::new()
	}

	/// Resolves `endpoint` into an absolute URL.
	///
	/// Absolute `http(s)://` endpoints are used as-is; anything else is treated as a path
	/// relative to [`Self::base_url`], with leading slashes ignored so `"/schools"` and
	/// `"schools"` resolve identically. Anything resolving to a non-HTTP scheme is rejected.
	pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, ConfigError> {
		let resolved = if is_absolute(endpoint) {
			Url::parse(endpoint)
		} else {
			self.base_url.join(endpoint.trim_start_matches('/'))
		};

		let invalid =
			|source| ConfigError::InvalidEndpoint { endpoint: endpoint.to_owned(), source };
		let url = resolved.map_err(|e| invalid(Some(e)))?;

		match url.scheme() {
			"http" | "https" => Ok(url),
			_ => Err(invalid(None)),
		}
	}
}

fn is_absolute(endpoint: &str) -> bool {
	let lower = endpoint.get(..8).unwrap_or(endpoint).to_ascii_lowercase();

	lower.starts_with("https://") || lower.starts_with("http://")
}
