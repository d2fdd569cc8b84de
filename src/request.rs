//! Request descriptors consumed by the signature engine and the dispatcher.
//!
//! A [`RequestDescriptor`] captures one logical API call: the absolute target URL, the HTTP
//! method, an optional body, and the query parameters. Descriptors are built fresh per call and
//! handed to the signer by shared reference, so nothing can mutate them once signing begins.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, error::ConfigError};

/// HTTP methods supported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl Method {
	/// Returns the uppercase method token used on the wire and in signature base strings.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}

	/// Converts into the `http` crate's method type.
	pub fn as_http(self) -> http::Method {
		match self {
			Method::Get => http::Method::GET,
			Method::Post => http::Method::POST,
			Method::Put => http::Method::PUT,
			Method::Delete => http::Method::DELETE,
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Request payload for `POST`/`PUT` calls.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
	/// JSON document sent as `application/json`; not part of the signature.
	Json(Value),
	/// Form fields sent as `application/x-www-form-urlencoded`; signed with the request.
	Form(BTreeMap<String, String>),
}
impl RequestBody {
	/// `Content-Type` header value for this body.
	pub fn content_type(&self) -> &'static str {
		match self {
			Self::Json(_) => "application/json",
			Self::Form(_) => "application/x-www-form-urlencoded",
		}
	}

	/// Parameters that take part in the OAuth signature.
	pub fn signature_params(&self) -> impl Iterator<Item = (&str, &str)> {
		let form = match self {
			Self::Form(fields) => Some(fields),
			Self::Json(_) => None,
		};

		form.into_iter().flatten().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Serializes the body into wire bytes.
	pub fn encode(&self) -> Result<Vec<u8>, ConfigError> {
		match self {
			Self::Json(value) => Ok(serde_json::to_vec(value)?),
			Self::Form(fields) => Ok(url::form_urlencoded::Serializer::new(String::new())
				.extend_pairs(fields)
				.finish()
				.into_bytes()),
		}
	}
}
impl From<Value> for RequestBody {
	fn from(value: Value) -> Self {
		Self::Json(value)
	}
}

/// One logical API call, ready to be signed.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestDescriptor {
	/// HTTP method.
	pub method: Method,
	/// Absolute target URL. Any query string embedded here is signed alongside [`Self::query`].
	pub url: Url,
	/// Optional request payload.
	pub body: Option<RequestBody>,
	/// Query parameters appended to the URL at dispatch time.
	pub query: BTreeMap<String, String>,
}
impl RequestDescriptor {
	/// Creates a descriptor without body or query parameters.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, body: None, query: BTreeMap::new() }
	}

	/// Attaches a request body.
	pub fn with_body(mut self, body: impl Into<RequestBody>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Adds a single query parameter.
	pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(key.into(), value.into());

		self
	}

	/// Merges a set of query parameters.
	pub fn with_query<I, K, V>(mut self, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.query.extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));

		self
	}

	/// Final URL on the wire: the target URL with [`Self::query`] appended.
	pub fn url_with_query(&self) -> Url {
		let mut url = self.url.clone();

		if !self.query.is_empty() {
			url.query_pairs_mut().extend_pairs(&self.query);
		}

		url
	}

	/// Every non-OAuth parameter that participates in the signature: pairs already embedded in
	/// the URL, the query parameters, and form-encoded body fields.
	pub fn signature_params(&self) -> Vec<(String, String)> {
		let mut params: Vec<(String, String)> =
			self.url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();

		params.extend(self.query.iter().map(|(k, v)| (k.clone(), v.clone())));

		if let Some(body) = &self.body {
			params.extend(body.signature_params().map(|(k, v)| (k.to_owned(), v.to_owned())));
		}

		params
	}
}
