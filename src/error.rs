//! Client-level error types shared across signing, dispatch, and the resource facade.

// self
use crate::{_prelude::*, request::Method};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem raised before any network attempt.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Remote service answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// A successful response body could not be decoded into the requested type.
	#[error("Response body could not be decoded at `{}`.", .source.path())]
	Decode {
		/// Structured decoding failure, including the JSON path that failed.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl Error {
	/// Returns the stable classification of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Config(_) => ErrorKind::Config,
			Self::Transport(_) => ErrorKind::Transport,
			Self::Api(_) => ErrorKind::Api,
			Self::Decode { .. } => ErrorKind::Decode,
		}
	}

	/// Returns the HTTP status carried by [`Error::Api`], if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			_ => None,
		}
	}
}

/// Coarse error classification so callers can branch without matching messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// See [`Error::Config`].
	Config,
	/// See [`Error::Transport`].
	Transport,
	/// See [`Error::Api`].
	Api,
	/// See [`Error::Decode`].
	Decode,
}
impl ErrorKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorKind::Config => "config",
			ErrorKind::Transport => "transport",
			ErrorKind::Api => "api",
			ErrorKind::Decode => "decode",
		}
	}
}
impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Consumer key or secret was absent or empty.
	#[error("OAuth {field} is required to create a client.")]
	MissingCredential {
		/// Which credential was missing.
		field: &'static str,
	},
	/// A resource identifier failed validation.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// A payload-taking operation was called without a payload.
	#[error("The {operation} operation requires a request payload.")]
	MissingPayload {
		/// Facade operation that rejected the call.
		operation: &'static str,
	},
	/// API descriptor failed validation.
	#[error("API descriptor is invalid.")]
	InvalidDescriptor(#[from] crate::descriptor::ApiDescriptorError),
	/// Endpoint could not be resolved against the base URL.
	#[error("Endpoint `{endpoint}` cannot be resolved to an HTTP(S) URL.")]
	InvalidEndpoint {
		/// Endpoint exactly as supplied by the caller.
		endpoint: String,
		/// Underlying parsing failure; `None` when the endpoint parsed to a non-HTTP scheme.
		#[source]
		source: Option<url::ParseError>,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	BodyEncode(#[from] serde_json::Error),
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {method} {url}.")]
	Network {
		/// HTTP method of the failed request.
		method: Method,
		/// Target URL of the failed request.
		url: Url,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client gave up waiting for a response.
	#[error("Request timed out while calling {method} {url}.")]
	Timeout {
		/// HTTP method of the failed request.
		method: Method,
		/// Target URL of the failed request.
		url: Url,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error for the given request target.
	pub fn network(
		method: Method,
		url: Url,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { method, url, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout for the given request target.
	pub fn timeout(
		method: Method,
		url: Url,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Timeout { method, url, source: Box::new(src) }
	}

	/// Target URL of the failed request.
	pub fn url(&self) -> &Url {
		match self {
			Self::Network { url, .. } | Self::Timeout { url, .. } => url,
		}
	}
}

/// Non-success HTTP response returned by the remote service.
///
/// Status and body are always preserved so callers can inspect the upstream payload.
#[derive(Debug, ThisError)]
#[error("{method} {url} failed with HTTP {status}.")]
pub struct ApiError {
	/// HTTP method of the failed request.
	pub method: Method,
	/// Target URL of the failed request.
	pub url: Url,
	/// HTTP status code returned by the API.
	pub status: u16,
	/// Raw response body, decoded lossily as UTF-8.
	pub body: String,
	/// Retry-After hint from upstream, if supplied.
	pub retry_after: Option<Duration>,
}
impl ApiError {
	/// Parses the response body as JSON, when it is JSON.
	pub fn body_json(&self) -> Option<serde_json::Value> {
		serde_json::from_str(&self.body).ok()
	}

	/// Returns `true` for 4xx statuses.
	pub fn is_client_error(&self) -> bool {
		(400..500).contains(&self.status)
	}

	/// Returns `true` for 5xx statuses.
	pub fn is_server_error(&self) -> bool {
		(500..600).contains(&self.status)
	}
}
