//! OAuth 1.0a HMAC-SHA1 signature engine.
//!
//! [`Signer`] binds a set of [`Credentials`] and turns a [`RequestDescriptor`] into
//! [`SignedHeaders`]. Signing is a pure function of the credentials, the descriptor, the nonce,
//! and the timestamp; [`Signer::sign`] draws a fresh nonce and the current Unix time, while
//! [`Signer::sign_with`] accepts fixed values so signatures can be reproduced. The signer holds
//! no mutable state and can be shared freely across concurrent requests.
//!
//! The lower-level steps live in [`encode`] (percent-encoding and parameter normalization) and
//! [`signature`] (base string, signing key, HMAC).

pub mod encode;
pub mod signature;

pub use encode::*;

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{_prelude::*, auth::Credentials, request::RequestDescriptor};

/// `oauth_signature_method` sent with every request.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// `oauth_version` sent with every request.
pub const OAUTH_VERSION: &str = "1.0";
/// Name of the header carrying the OAuth parameters.
pub const AUTHORIZATION: &str = "Authorization";

const NONCE_LEN: usize = 32;

/// Generates a random alphanumeric nonce.
pub fn generate_nonce() -> String {
	rand::rng().sample_iter(Alphanumeric).take(NONCE_LEN).map(char::from).collect()
}

/// Current Unix time in seconds.
pub fn current_timestamp() -> i64 {
	OffsetDateTime::now_utc().unix_timestamp()
}

/// Protocol parameter set produced for one signed request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParameters {
	/// `oauth_consumer_key`.
	pub consumer_key: String,
	/// `oauth_nonce`.
	pub nonce: String,
	/// `oauth_timestamp`, Unix seconds.
	pub timestamp: i64,
	/// `oauth_signature`, base64 encoded.
	pub signature: String,
}
impl OAuthParameters {
	/// Protocol parameters that enter the signature base string (everything but the signature).
	pub fn protocol_pairs(&self) -> [(&'static str, String); 5] {
		Self::unsigned_pairs(&self.consumer_key, &self.nonce, self.timestamp)
	}

	/// Renders the `Authorization` header value: `OAuth k="v", ...` sorted by key with every key
	/// and value percent-encoded.
	pub fn to_header_value(&self) -> String {
		let mut pairs = self.protocol_pairs().to_vec();

		pairs.push(("oauth_signature", self.signature.clone()));
		pairs.sort();

		let fields = pairs
			.iter()
			.map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
			.collect::<Vec<_>>()
			.join(", ");

		format!("OAuth {fields}")
	}

	fn unsigned_pairs(
		consumer_key: &str,
		nonce: &str,
		timestamp: i64,
	) -> [(&'static str, String); 5] {
		[
			("oauth_consumer_key", consumer_key.to_owned()),
			("oauth_nonce", nonce.to_owned()),
			("oauth_signature_method", SIGNATURE_METHOD.to_owned()),
			("oauth_timestamp", timestamp.to_string()),
			("oauth_version", OAUTH_VERSION.to_owned()),
		]
	}
}

/// HTTP headers produced by signing a request; principally `Authorization`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedHeaders {
	headers: BTreeMap<&'static str, String>,
	parameters: OAuthParameters,
}
impl SignedHeaders {
	/// Builds the header set for an already computed parameter set.
	pub fn from_parameters(parameters: OAuthParameters) -> Self {
		let headers = BTreeMap::from([(AUTHORIZATION, parameters.to_header_value())]);

		Self { headers, parameters }
	}

	/// `Authorization` header value.
	pub fn authorization(&self) -> &str {
		self.headers.get(AUTHORIZATION).map(String::as_str).unwrap_or_default()
	}

	/// Parameters the headers were rendered from.
	pub fn parameters(&self) -> &OAuthParameters {
		&self.parameters
	}

	/// Iterates over `(name, value)` header pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
		self.headers.iter().map(|(name, value)| (*name, value.as_str()))
	}
}

/// OAuth 1.0a signer bound to a consumer key/secret pair.
#[derive(Clone, Debug)]
pub struct Signer {
	credentials: Credentials,
}
impl Signer {
	/// Binds the signer to `credentials`.
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials }
	}

	/// Credentials used for signing.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Signs `request` with a fresh nonce and the current timestamp.
	pub fn sign(&self, request: &RequestDescriptor) -> SignedHeaders {
		self.sign_with(request, &generate_nonce(), current_timestamp())
	}

	/// Signs `request` with a caller-supplied nonce and timestamp.
	pub fn sign_with(
		&self,
		request: &RequestDescriptor,
		nonce: &str,
		timestamp: i64,
	) -> SignedHeaders {
		SignedHeaders::from_parameters(self.authorize(request, nonce, timestamp))
	}

	/// Computes the full parameter set, signature included, for `request`.
	pub fn authorize(
		&self,
		request: &RequestDescriptor,
		nonce: &str,
		timestamp: i64,
	) -> OAuthParameters {
		let base = self.base_string(request, nonce, timestamp);
		let key = signature::signing_key(self.credentials.consumer_secret().expose(), None);

		OAuthParameters {
			consumer_key: self.credentials.consumer_key().to_owned(),
			nonce: nonce.to_owned(),
			timestamp,
			signature: signature::hmac_sha1(&key, &base),
		}
	}

	/// Signature base string for `request` under the given nonce and timestamp.
	pub fn base_string(&self, request: &RequestDescriptor, nonce: &str, timestamp: i64) -> String {
		let mut params = request.signature_params();

		params.extend(
			OAuthParameters::unsigned_pairs(self.credentials.consumer_key(), nonce, timestamp)
				.into_iter()
				.map(|(k, v)| (k.to_owned(), v)),
		);

		signature::base_string(request.method, &request.url, &normalize_parameters(params))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::request::{Method, RequestBody};

	const NONCE: &str = "fixednonce123";
	const TIMESTAMP: i64 = 1_700_000_000;

	fn signer() -> Signer {
		Signer::new(
			Credentials::new("consumer-key", "consumer-secret")
				.expect("Fixture credentials should be valid."),
		)
	}

	fn request(method: Method, url: &str) -> RequestDescriptor {
		RequestDescriptor::new(method, Url::parse(url).expect("Fixture URL should parse."))
	}

	#[test]
	fn fixed_nonce_and_timestamp_reproduce_signature() {
		let request = request(Method::Get, "https://api.schoology.com/v1/schools/42");
		let first = signer().sign_with(&request, NONCE, TIMESTAMP);
		let second = signer().sign_with(&request, NONCE, TIMESTAMP);

		assert_eq!(first.parameters().signature, "R3JthD6gAfPCm7BRQqhrndnDlWE=");
		assert_eq!(first, second);
		assert_eq!(
			first.authorization(),
			"OAuth oauth_consumer_key=\"consumer-key\", oauth_nonce=\"fixednonce123\", \
			 oauth_signature=\"R3JthD6gAfPCm7BRQqhrndnDlWE%3D\", \
			 oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1700000000\", \
			 oauth_version=\"1.0\""
		);
	}

	#[test]
	fn query_parameters_sort_ahead_of_oauth_parameters() {
		let unordered = request(Method::Get, "https://api.schoology.com/v1/users")
			.with_query([("b", "2"), ("a", "1")]);
		let ordered = request(Method::Get, "https://api.schoology.com/v1/users")
			.with_query([("a", "1"), ("b", "2")]);
		let base = signer().base_string(&unordered, NONCE, TIMESTAMP);

		assert_eq!(
			base,
			"GET&https%3A%2F%2Fapi.schoology.com%2Fv1%2Fusers&a%3D1%26b%3D2%26oauth_consumer_key%3Dconsumer-key%26oauth_nonce%3Dfixednonce123%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1700000000%26oauth_version%3D1.0"
		);
		assert_eq!(base, signer().base_string(&ordered, NONCE, TIMESTAMP));
		assert_eq!(
			signer().authorize(&unordered, NONCE, TIMESTAMP).signature,
			"WoraWXFsryJSdn6z69USVKCCf+4="
		);
	}

	#[test]
	fn form_bodies_are_signed() {
		let form = BTreeMap::from([
			("title".to_owned(), "Intro to Rust".to_owned()),
			("code".to_owned(), "CS 101".to_owned()),
		]);
		let request = request(Method::Post, "https://api.schoology.com/v1/courses")
			.with_body(RequestBody::Form(form));

		assert_eq!(
			signer().authorize(&request, NONCE, TIMESTAMP).signature,
			"c8MCCXDi3/jx4ovVzrT882gUsAs="
		);
	}

	#[test]
	fn json_bodies_do_not_change_signature() {
		let bare = request(Method::Get, "https://api.schoology.com/v1/schools/42");
		let with_body = bare.clone().with_body(serde_json::json!({ "title": "ignored" }));

		assert_eq!(
			signer().authorize(&bare, NONCE, TIMESTAMP).signature,
			signer().authorize(&with_body, NONCE, TIMESTAMP).signature
		);
	}

	#[test]
	fn fresh_signatures_differ() {
		let request = request(Method::Get, "https://api.schoology.com/v1/schools/42");
		let first = signer().sign(&request);
		let second = signer().sign(&request);

		assert_ne!(first.parameters().nonce, second.parameters().nonce);
		assert_ne!(first.parameters().signature, second.parameters().signature);
		assert_ne!(first.authorization(), second.authorization());
		assert_eq!(first.parameters().nonce.len(), NONCE_LEN);
		assert!(first.parameters().nonce.chars().all(|c| c.is_ascii_alphanumeric()));
	}

	#[test]
	fn different_timestamps_change_signature() {
		let request = request(Method::Get, "https://api.schoology.com/v1/schools/42");
		let first = signer().sign_with(&request, NONCE, TIMESTAMP);
		let later = signer().sign_with(&request, NONCE, TIMESTAMP + 1);

		assert_ne!(first.parameters().signature, later.parameters().signature);
	}

	#[test]
	fn headers_expose_authorization_only() {
		let request = request(Method::Delete, "https://api.schoology.com/v1/users/7");
		let headers = signer().sign_with(&request, NONCE, TIMESTAMP);
		let names = headers.iter().map(|(name, _)| name).collect::<Vec<_>>();

		assert_eq!(names, vec![AUTHORIZATION]);
		assert!(headers.authorization().starts_with("OAuth oauth_consumer_key=\"consumer-key\""));
	}
}
