//! Demonstrates plugging a custom HTTP transport and error mapper into the client.
//!
//! 1. Implement [`ApiHttpClient`] for the transport; any HTTP status is a successful transport
//!    outcome, only failures to obtain a response are transport errors.
//! 2. Provide a [`TransportErrorMapper`] that turns the transport's own error type into the
//!    client's [`Error`].
//! 3. Pass both to [`Client::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use schoology_client::{
	auth::Credentials,
	client::{Client, TransportErrorMapper},
	descriptor::ApiDescriptor,
	error::{Error, TransportError},
	request::RequestDescriptor,
	transport::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ApiDescriptor::builder().build()?;
	let mapper = Arc::new(MockTransportErrorMapper);
	let client: Client<MockHttpClient, MockTransportErrorMapper> = Client::with_http_client(
		Credentials::new("demo-key", "demo-secret")?,
		descriptor.clone(),
		MockHttpClient::success(),
		Arc::clone(&mapper),
	);
	let user = client.create_user(json!({ "name_first": "Ada", "name_last": "Lovelace" })).await?;

	println!("User created by the mock transport: {:?}.", user.as_json());

	let failing_client: Client<MockHttpClient, MockTransportErrorMapper> = Client::with_http_client(
		Credentials::new("demo-key", "demo-secret")?,
		descriptor,
		MockHttpClient::transport_error(MockTransportError::DnsFailure {
			host: "api.schoology.com",
		}),
		mapper,
	);

	match failing_client.get_school("42").await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport error mapped by the client ({}): {e}", e.kind()),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone)]
enum MockBehavior {
	Success,
	TransportError(MockTransportError),
}

#[derive(Clone)]
struct MockHttpClient {
	behavior: MockBehavior,
}
impl MockHttpClient {
	fn success() -> Self {
		Self { behavior: MockBehavior::Success }
	}

	fn transport_error(error: MockTransportError) -> Self {
		Self { behavior: MockBehavior::TransportError(error) }
	}
}
impl ApiHttpClient for MockHttpClient {
	type TransportError = MockTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				MockBehavior::Success => {
					println!(
						"Mock transport received {} {} with `{}`.",
						request.method(),
						request.uri(),
						request
							.headers()
							.get("authorization")
							.and_then(|v| v.to_str().ok())
							.unwrap_or_default()
					);

					Ok(HttpResponse::new(b"{\"id\":\"1001\"}".to_vec()))
				},
				MockBehavior::TransportError(error) => Err(error),
			}
		})
	}
}

struct MockTransportErrorMapper;
impl TransportErrorMapper<MockTransportError> for MockTransportErrorMapper {
	fn map_transport_error(&self, request: &RequestDescriptor, err: MockTransportError) -> Error {
		TransportError::network(request.method, request.url.clone(), err).into()
	}
}
