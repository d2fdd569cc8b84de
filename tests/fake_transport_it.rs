// std
use std::{
	collections::BTreeSet,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use parking_lot::Mutex;
// self
use schoology_client::{
	auth::Credentials,
	client::{Client, NetworkErrorMapper, TransportErrorMapper},
	descriptor::ApiDescriptor,
	error::{ConfigError, Error, ErrorKind, TransportError},
	obs,
	request::RequestDescriptor,
	transport::{ApiHttpClient, HttpFuture, HttpRequest, HttpResponse},
};

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Host unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

/// Answers every request with `200 {}` after an optional delay and records the
/// `Authorization` headers it saw.
#[derive(Default)]
struct FakeHttpClient {
	calls: AtomicUsize,
	delay: Option<Duration>,
	unreachable: bool,
	authorizations: Mutex<Vec<String>>,
}
impl FakeHttpClient {
	fn slow(delay: Duration) -> Self {
		Self { delay: Some(delay), ..Default::default() }
	}

	fn unreachable() -> Self {
		Self { unreachable: true, ..Default::default() }
	}
}
impl ApiHttpClient for FakeHttpClient {
	type TransportError = FakeTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		if let Some(value) = request.headers().get("authorization") {
			self.authorizations
				.lock()
				.push(value.to_str().expect("Authorization header should be ASCII.").to_owned());
		}

		Box::pin(async move {
			if let Some(delay) = self.delay {
				tokio::time::sleep(delay).await;
			}
			if self.unreachable {
				return Err(FakeTransportError::Unreachable);
			}

			Ok(HttpResponse::new(b"{}".to_vec()))
		})
	}
}

/// Classifies fake transport failures as timeouts so the mapper seam is observable.
struct TimeoutMapper;
impl TransportErrorMapper<FakeTransportError> for TimeoutMapper {
	fn map_transport_error(&self, request: &RequestDescriptor, err: FakeTransportError) -> Error {
		TransportError::timeout(request.method, request.url.clone(), err).into()
	}
}

fn build_client<M>(
	http: Arc<FakeHttpClient>,
	mapper: M,
) -> Client<FakeHttpClient, M>
where
	M: TransportErrorMapper<FakeTransportError>,
{
	Client::with_http_client(
		Credentials::new("fake-key", "fake-secret").expect("Test credentials should be valid."),
		ApiDescriptor::builder().build().expect("Default descriptor should build."),
		http,
		mapper,
	)
}

#[tokio::test]
async fn invalid_identifier_never_invokes_transport() {
	let http = Arc::new(FakeHttpClient::default());
	let client = build_client(Arc::clone(&http), NetworkErrorMapper);
	let err = client.get_school("").await.expect_err("Empty school id must be rejected.");

	assert_eq!(err.kind(), ErrorKind::Config);
	assert!(matches!(err, Error::Config(ConfigError::InvalidIdentifier(_))));
	assert_eq!(http.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn concurrent_requests_sign_independently() {
	let http = Arc::new(FakeHttpClient::default());
	let client = build_client(Arc::clone(&http), NetworkErrorMapper);
	let mut tasks = Vec::new();

	for id in 0..16 {
		let client = client.clone();

		tasks.push(tokio::spawn(async move { client.get_user(id.to_string()).await }));
	}
	for task in tasks {
		task.await
			.expect("Request task should not panic.")
			.expect("Fake transport should succeed.");
	}

	let authorizations = http.authorizations.lock();
	let nonces = authorizations
		.iter()
		.filter_map(|header| {
			header.split(", ").find_map(|field| field.strip_prefix("oauth_nonce="))
		})
		.collect::<BTreeSet<_>>();

	assert_eq!(http.calls.load(Ordering::SeqCst), 16);
	assert_eq!(nonces.len(), 16, "Every request must carry a fresh nonce.");
}

#[tokio::test]
async fn caller_imposed_deadline_cancels_the_call() {
	let http = Arc::new(FakeHttpClient::slow(Duration::from_secs(30)));
	let client = build_client(Arc::clone(&http), NetworkErrorMapper);
	let outcome = tokio::time::timeout(Duration::from_millis(50), client.get_school("42")).await;

	assert!(outcome.is_err(), "Deadline should expire before the slow transport answers.");
	assert_eq!(http.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn transport_failures_go_through_the_mapper() {
	let client = build_client(Arc::new(FakeHttpClient::unreachable()), NetworkErrorMapper);
	let err = client.get_school("42").await.expect_err("Unreachable host must fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(err.to_string().contains("https://api.schoology.com/v1/schools/42"));

	let source = StdError::source(&err).expect("Transport error should keep its cause.");

	assert_eq!(source.to_string(), "Host unreachable.");
	assert!(
		obs::error_chain(&err).ends_with("Caused by: Host unreachable."),
		"Logged diagnostics must carry the transport cause."
	);

	let client = build_client(Arc::new(FakeHttpClient::unreachable()), TimeoutMapper);
	let err = client.delete_school("42").await.expect_err("Unreachable host must fail.");

	assert!(matches!(err, Error::Transport(TransportError::Timeout { .. })));
}
