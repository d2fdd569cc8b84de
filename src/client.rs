//! Request dispatcher that signs, sends, and normalizes API calls.
//!
//! [`Client`] owns the signer, the API descriptor, and an explicitly injected transport. Each
//! call builds a fresh [`RequestDescriptor`], asks the [`Signer`] for headers, hands the request
//! to the transport, and classifies the outcome: 2xx bodies come back as [`ApiResponse`],
//! everything else as a typed [`Error`]. Failures are logged and returned immediately; there are
//! no retries and no backoff, and concurrent calls share nothing but immutable state.

pub mod mapper;
pub mod response;

pub use mapper::*;
pub use response::*;

// crates.io
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
// self
#[cfg(feature = "reqwest")] use crate::transport::ReqwestHttpClient;
use crate::{
	_prelude::*,
	auth::Credentials,
	descriptor::ApiDescriptor,
	error::ConfigError,
	oauth::{SignedHeaders, Signer},
	obs::{self, RequestOutcome, RequestSpan},
	request::{Method, RequestBody, RequestDescriptor},
	transport::{ApiHttpClient, HttpRequest},
};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = Client<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// OAuth 1.0a signed API client bound to one set of consumer credentials.
///
/// The client is cheap to clone; clones share the transport and mapper through `Arc`.
pub struct Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Base URL and request defaults.
	pub descriptor: ApiDescriptor,
	signer: Signer,
}
impl<C, M> Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	///
	/// No network I/O happens here.
	pub fn with_http_client(
		credentials: Credentials,
		descriptor: ApiDescriptor,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			signer: Signer::new(credentials),
		}
	}

	/// Signer bound to this client's credentials.
	pub fn signer(&self) -> &Signer {
		&self.signer
	}

	/// Base URL relative endpoints are resolved against.
	pub fn base_url(&self) -> &Url {
		&self.descriptor.base_url
	}

	/// Performs one API call.
	///
	/// `endpoint` is either a path relative to the base URL or an absolute URL. `query` is
	/// appended to the URL and signed along with the OAuth parameters.
	pub async fn request(
		&self,
		endpoint: &str,
		method: Method,
		body: Option<RequestBody>,
		query: BTreeMap<String, String>,
	) -> Result<ApiResponse> {
		let url = self
			.descriptor
			.endpoint_url(endpoint)
			.map_err(|e| rejected(method, endpoint, e))?;
		let mut request = RequestDescriptor::new(method, url).with_query(query);

		request.body = body;

		self.dispatch(request).await
	}

	/// Signs and sends a fully formed descriptor.
	pub async fn dispatch(&self, request: RequestDescriptor) -> Result<ApiResponse> {
		let method = request.method;
		let span = RequestSpan::new(method, request.url.path());

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span.instrument(self.send(&request)).await;

		match &result {
			Ok(_) => obs::record_request_outcome(method, RequestOutcome::Success),
			Err(e) => {
				obs::log_failure(method, request.url_with_query().as_str(), e);
				obs::record_request_outcome(method, RequestOutcome::Failure);
			},
		}

		result
	}

	/// `GET` without query parameters.
	pub async fn get(&self, endpoint: &str) -> Result<ApiResponse> {
		self.request(endpoint, Method::Get, None, BTreeMap::new()).await
	}

	/// `GET` with query parameters.
	pub async fn get_with_query(
		&self,
		endpoint: &str,
		query: BTreeMap<String, String>,
	) -> Result<ApiResponse> {
		self.request(endpoint, Method::Get, None, query).await
	}

	/// `POST` with a body.
	pub async fn post(&self, endpoint: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
		let body = body.into();

		self.request(endpoint, Method::Post, Some(body), BTreeMap::new()).await
	}

	/// `PUT` with a body.
	pub async fn put(&self, endpoint: &str, body: impl Into<RequestBody>) -> Result<ApiResponse> {
		let body = body.into();

		self.request(endpoint, Method::Put, Some(body), BTreeMap::new()).await
	}

	/// `DELETE` without a body.
	pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
		self.request(endpoint, Method::Delete, None, BTreeMap::new()).await
	}

	async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
		let signed = self.signer.sign(request);
		let http_request = self.build_http_request(request, &signed)?;
		let response = self
			.http_client
			.execute(http_request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(request, err))?;

		ApiResponse::from_http(request, response)
	}

	fn build_http_request(
		&self,
		request: &RequestDescriptor,
		signed: &SignedHeaders,
	) -> Result<HttpRequest> {
		let mut builder = http::Request::builder()
			.method(request.method.as_http())
			.uri(request.url_with_query().as_str())
			.header(ACCEPT, "application/json");

		if let Some(agent) = self.descriptor.user_agent.as_deref() {
			builder = builder.header(USER_AGENT, agent);
		}
		for (name, value) in signed.iter() {
			builder = builder.header(name, value);
		}

		let body = match &request.body {
			Some(body) => {
				builder = builder.header(CONTENT_TYPE, body.content_type());

				body.encode()?
			},
			None => Vec::new(),
		};

		Ok(builder.body(body).map_err(ConfigError::from)?)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client for the default Schoology base URL.
	///
	/// Fails with [`ConfigError::MissingCredential`] when either half of the credentials is
	/// empty. The client provisions its own reqwest-backed transport.
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Result<Self> {
		let credentials = Credentials::new(consumer_key, consumer_secret)?;
		let descriptor = ApiDescriptor::builder().build().map_err(ConfigError::from)?;

		Ok(Self::with_descriptor(credentials, descriptor))
	}

	/// Creates a reqwest-backed client for an explicit descriptor.
	pub fn with_descriptor(credentials: Credentials, descriptor: ApiDescriptor) -> Self {
		Self::with_http_client(
			credentials,
			descriptor,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Clone for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			descriptor: self.descriptor.clone(),
			signer: self.signer.clone(),
		}
	}
}
impl<C, M> Debug for Client<C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.signer.credentials().consumer_key())
			.finish()
	}
}

/// Logs and converts an error raised before a request could be dispatched.
pub(crate) fn rejected(method: Method, target: &str, err: impl Into<Error>) -> Error {
	let err = err.into();

	obs::log_failure(method, target, &err);
	obs::record_request_outcome(method, RequestOutcome::Failure);

	err
}

#[cfg(test)]
mod tests {
	// crates.io
	use parking_lot::Mutex;
	use serde_json::json;
	// self
	use super::*;
	use crate::{error::ErrorKind, transport::HttpFuture};

	#[derive(Default)]
	struct RecordingHttpClient {
		requests: Mutex<Vec<HttpRequest>>,
	}
	impl ApiHttpClient for RecordingHttpClient {
		type TransportError = std::io::Error;

		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			self.requests.lock().push(request);

			Box::pin(async { Ok(http::Response::new(b"{\"ok\":true}".to_vec())) })
		}
	}

	fn client(transport: Arc<RecordingHttpClient>) -> Client<RecordingHttpClient, NetworkErrorMapper> {
		let descriptor = ApiDescriptor::builder()
			.user_agent("schoology-client-tests")
			.build()
			.expect("Test descriptor should build.");

		Client::with_http_client(
			Credentials::new("consumer-key", "consumer-secret")
				.expect("Test credentials should be valid."),
			descriptor,
			transport,
			NetworkErrorMapper,
		)
	}

	fn header_param<'a>(authorization: &'a str, name: &str) -> &'a str {
		authorization
			.trim_start_matches("OAuth ")
			.split(", ")
			.find_map(|field| field.strip_prefix(name)?.strip_prefix("=\"")?.strip_suffix('"'))
			.expect("Authorization header should carry the requested parameter.")
	}

	#[tokio::test]
	async fn dispatch_injects_signed_headers_and_body() {
		let transport = Arc::new(RecordingHttpClient::default());
		let client = client(Arc::clone(&transport));
		let response = client
			.post("users", json!({ "name_first": "Ada" }))
			.await
			.expect("Recording transport should succeed.");

		assert_eq!(response, ApiResponse::Json(json!({ "ok": true })));

		let requests = transport.requests.lock();
		let request = &requests[0];
		let headers = request.headers();

		assert_eq!(request.method(), http::Method::POST);
		assert_eq!(request.uri(), "https://api.schoology.com/v1/users");
		assert_eq!(headers[ACCEPT], "application/json");
		assert_eq!(headers[CONTENT_TYPE], "application/json");
		assert_eq!(headers[USER_AGENT], "schoology-client-tests");
		assert_eq!(request.body(), &b"{\"name_first\":\"Ada\"}".to_vec());

		let authorization =
			headers["authorization"].to_str().expect("Authorization header should be ASCII.");

		assert!(authorization.starts_with("OAuth "));
		assert_eq!(header_param(authorization, "oauth_consumer_key"), "consumer-key");
		assert_eq!(header_param(authorization, "oauth_signature_method"), "HMAC-SHA1");
		assert_eq!(header_param(authorization, "oauth_version"), "1.0");
	}

	#[tokio::test]
	async fn header_matches_signature_over_query() {
		let transport = Arc::new(RecordingHttpClient::default());
		let client = client(Arc::clone(&transport));
		let query = BTreeMap::from([("b".to_owned(), "2".to_owned()), ("a".to_owned(), "1".to_owned())]);

		client.get_with_query("users", query).await.expect("Recording transport should succeed.");

		let requests = transport.requests.lock();
		let request = &requests[0];
		let authorization = request.headers()["authorization"]
			.to_str()
			.expect("Authorization header should be ASCII.");
		let nonce = header_param(authorization, "oauth_nonce");
		let timestamp = header_param(authorization, "oauth_timestamp")
			.parse::<i64>()
			.expect("Timestamp should be numeric.");
		let expected = RequestDescriptor::new(
			Method::Get,
			Url::parse("https://api.schoology.com/v1/users").expect("Fixture URL should parse."),
		)
		.with_query([("a", "1"), ("b", "2")]);

		assert_eq!(request.uri(), "https://api.schoology.com/v1/users?a=1&b=2");
		assert_eq!(
			authorization,
			client.signer().sign_with(&expected, nonce, timestamp).authorization()
		);
		assert!(request.headers().get(CONTENT_TYPE).is_none());
	}

	#[tokio::test]
	async fn invalid_endpoint_fails_before_transport() {
		let transport = Arc::new(RecordingHttpClient::default());
		let client = client(Arc::clone(&transport));
		let err = client.get("https://").await.expect_err("Hostless URL must be rejected.");

		assert_eq!(err.kind(), ErrorKind::Config);
		assert!(transport.requests.lock().is_empty());
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn new_validates_credentials_without_io() {
		assert!(matches!(
			Client::new("", "secret"),
			Err(Error::Config(ConfigError::MissingCredential { field: "consumer key" }))
		));
		assert!(matches!(
			Client::new("key", ""),
			Err(Error::Config(ConfigError::MissingCredential { field: "consumer secret" }))
		));

		let client = Client::new("key", "secret").expect("Non-empty credentials should build.");

		assert_eq!(client.base_url().as_str(), crate::descriptor::DEFAULT_BASE_URL);
		assert!(!format!("{client:?}").contains("secret\""));
	}

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn reqwest_transport_round_trip() {
		// crates.io
		use httpmock::prelude::*;
		// self
		use crate::_preludet::*;

		let server = MockServer::start_async().await;
		let mock = server
			.mock_async(|when, then| {
				when.method(GET).path("/v1/schools/42").header_exists("authorization");
				then.status(200).header("content-type", "application/json").body("{\"id\": 42}");
			})
			.await;
		let client = build_reqwest_test_client(&server.url("/v1/"), "key", "secret");
		let response = client.get("schools/42").await.expect("Mocked call should succeed.");

		assert_eq!(response.as_json(), Some(&json!({ "id": 42 })));

		mock.assert_async().await;
	}
}
