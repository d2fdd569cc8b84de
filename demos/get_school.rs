//! Demonstrates fetching a school with the default reqwest transport against a local mock of the
//! Schoology API, then inspecting a normalized API error.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use schoology_client::{
	auth::Credentials,
	client::{Client, ReqwestTransportErrorMapper},
	descriptor::ApiDescriptor,
	error::Error,
	reqwest,
	transport::ReqwestHttpClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let school_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/schools/42").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"42\",\"title\":\"North High\",\"city\":\"Springfield\"}");
		})
		.await;
	let missing_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/schools/999");
			then.status(404).body("{\"error\":\"School not found\"}");
		})
		.await;
	let descriptor = ApiDescriptor::builder()
		.base_url(Url::parse(&server.url("/v1/"))?)
		.user_agent("schoology-client-demo/0.1")
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		reqwest::Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = <Client<ReqwestHttpClient, ReqwestTransportErrorMapper>>::with_http_client(
		Credentials::new("demo-key", "demo-secret")?,
		descriptor,
		http_client,
		ReqwestTransportErrorMapper,
	);
	let school = client.get_school("42").await?;

	println!("School returned by the mock API: {:?}.", school.as_json());

	school_mock.assert_async().await;

	match client.get_school("999").await {
		Ok(_) => println!("Mock API unexpectedly returned a school."),
		Err(Error::Api(e)) => {
			println!("API rejected the call with HTTP {}: {}.", e.status, e.body);
		},
		Err(e) => println!("Unexpected failure: {e}."),
	}

	missing_mock.assert_async().await;

	match client.get_school("").await {
		Ok(_) => println!("Empty identifier unexpectedly passed validation."),
		Err(e) => println!("Rejected before any network call: {e}"),
	}

	Ok(())
}
