//! RFC 3986 percent-encoding and OAuth parameter normalization.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// Everything except the RFC 3986 unreserved set is escaped.
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `input` per RFC 3986 with uppercase hex digits.
pub fn percent_encode(input: &str) -> String {
	utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Builds the normalized parameter string: every key and value percent-encoded, sorted by
/// encoded key then encoded value, joined as `key=value` pairs separated by `&`.
pub fn normalize_parameters<I, K, V>(params: I) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut encoded = params
		.into_iter()
		.map(|(k, v)| (percent_encode(k.as_ref()), percent_encode(v.as_ref())))
		.collect::<Vec<_>>();

	encoded.sort();

	encoded.into_iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
}
