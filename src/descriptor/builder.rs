// std
use std::net::IpAddr;
// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	descriptor::{ApiDescriptor, DEFAULT_BASE_URL},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ApiDescriptorError {
	/// Base URL string could not be parsed.
	#[error("Base URL is not a valid URL.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL must use HTTPS unless it points at a loopback host.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL must not carry a query or fragment.
	#[error("The base URL must not contain a query or fragment: {url}.")]
	BaseUrlHasQuery {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot have paths joined onto it (e.g. `mailto:`).
	#[error("The base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// User agent is empty or not a valid header value.
	#[error("User agent must be non-empty visible ASCII.")]
	InvalidUserAgent,
}

/// Builder for [`ApiDescriptor`] values.
#[derive(Debug, Default, Deserialize)]
pub struct ApiDescriptorBuilder {
	/// Base URL override; defaults to [`DEFAULT_BASE_URL`].
	#[serde(default)]
	pub base_url: Option<Url>,
	/// Optional `User-Agent` header value.
	#[serde(default)]
	pub user_agent: Option<String>,
}
impl ApiDescriptorBuilder {
	/// Creates a builder targeting the default base URL.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the `User-Agent` header value.
	pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
		self.user_agent = Some(agent.into());

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ApiDescriptor, ApiDescriptorError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ApiDescriptorError::InvalidBaseUrl { source })?,
		};
		let descriptor =
			ApiDescriptor { base_url: normalize_base(base_url)?, user_agent: self.user_agent };

		descriptor.validate()?;

		Ok(descriptor)
	}
}
impl TryFrom<ApiDescriptorBuilder> for ApiDescriptor {
	type Error = ApiDescriptorError;

	fn try_from(builder: ApiDescriptorBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

impl ApiDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ApiDescriptorError> {
		if let Some(agent) = self.user_agent.as_deref() {
			validate_user_agent(agent)?;
		}

		Ok(())
	}
}

fn normalize_base(mut url: Url) -> Result<Url, ApiDescriptorError> {
	if url.cannot_be_a_base() {
		return Err(ApiDescriptorError::CannotBeABase { url: url.to_string() });
	}
	if url.scheme() != "https" && !(url.scheme() == "http" && is_loopback(&url)) {
		return Err(ApiDescriptorError::InsecureBaseUrl { url: url.to_string() });
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(ApiDescriptorError::BaseUrlHasQuery { url: url.to_string() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
		Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
		None => false,
	}
}

fn validate_user_agent(agent: &str) -> Result<(), ApiDescriptorError> {
	if agent.trim().is_empty() || !agent.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
		Err(ApiDescriptorError::InvalidUserAgent)
	} else {
		Ok(())
	}
}
