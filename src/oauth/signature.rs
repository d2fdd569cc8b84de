//! Signature base string assembly and HMAC-SHA1 signing.
//!
//! Every function here is pure so each step can be checked against published OAuth 1.0a
//! vectors in isolation.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::{_prelude::*, oauth::percent_encode, request::Method};

type HmacSha1 = Hmac<Sha1>;

/// Base string URI: scheme and host lowercased, default port dropped, query and fragment
/// removed.
pub fn base_string_uri(url: &Url) -> String {
	let mut url = url.clone();

	url.set_query(None);
	url.set_fragment(None);

	url.into()
}

/// Signature base string: `METHOD&pct(base URI)&pct(normalized parameters)`.
pub fn base_string(method: Method, url: &Url, normalized_params: &str) -> String {
	format!(
		"{}&{}&{}",
		method.as_str(),
		percent_encode(&base_string_uri(url)),
		percent_encode(normalized_params)
	)
}

/// Signing key: `pct(consumer secret)&pct(token secret)`; two-legged requests pass `None`.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	format!("{}&{}", percent_encode(consumer_secret), percent_encode(token_secret.unwrap_or("")))
}

/// `base64(HMAC-SHA1(key, base_string))`.
pub fn hmac_sha1(key: &str, base_string: &str) -> String {
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length.");

	mac.update(base_string.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}
