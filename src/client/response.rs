//! Successful response bodies handed back to callers.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	error::ApiError,
	request::RequestDescriptor,
	transport::{self, HttpResponse},
};

/// Body of a successful (2xx) response, passed through without schema checks.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
	/// Body parsed as JSON.
	Json(Value),
	/// Non-JSON body, decoded lossily as UTF-8.
	Text(String),
	/// Empty or whitespace-only body (e.g. `204 No Content`).
	Empty,
}
impl ApiResponse {
	/// Classifies a raw response: 2xx bodies become [`ApiResponse`], anything else an
	/// [`ApiError`] carrying status, body, and retry hint.
	pub fn from_http(request: &RequestDescriptor, response: HttpResponse) -> Result<Self> {
		let status = response.status();

		if status.is_success() {
			return Ok(Self::from_body(response.body()));
		}

		Err(ApiError {
			method: request.method,
			url: request.url_with_query(),
			status: status.as_u16(),
			body: String::from_utf8_lossy(response.body()).into_owned(),
			retry_after: transport::parse_retry_after(response.headers()),
		}
		.into())
	}

	/// Parses a body as JSON, falling back to raw text.
	pub fn from_body(body: &[u8]) -> Self {
		if body.iter().all(u8::is_ascii_whitespace) {
			return Self::Empty;
		}

		match serde_json::from_slice(body) {
			Ok(value) => Self::Json(value),
			Err(_) => Self::Text(String::from_utf8_lossy(body).into_owned()),
		}
	}

	/// JSON body, if the response was JSON.
	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Self::Json(value) => Some(value),
			_ => None,
		}
	}

	/// Consumes the response, returning the JSON body if there was one.
	pub fn into_json(self) -> Option<Value> {
		match self {
			Self::Json(value) => Some(value),
			_ => None,
		}
	}

	/// Raw text body, if the response was not JSON.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns `true` when the response had no body.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Decodes the body into `T`. Text bodies decode as a JSON string and empty bodies as
	/// `null`; failures report the JSON path that could not be decoded.
	pub fn deserialize<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let value = match self {
			Self::Json(value) => value.clone(),
			Self::Text(text) => Value::String(text.clone()),
			Self::Empty => Value::Null,
		};

		serde_path_to_error::deserialize(value).map_err(|source| Error::Decode { source })
	}
}
