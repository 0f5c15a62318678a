use md5::{Digest, Md5};

/// Compute the request signature: the hex MD5 digest of `url` followed by `private_key`.
///
/// MD5 is what the service verifies against. It is not a security choice.
#[must_use]
pub fn signature(url: &str, private_key: &str) -> String {
	let mut hasher = Md5::new();
	hasher.update(url.as_bytes());
	hasher.update(private_key.as_bytes());

	hex::encode(hasher.finalize())
}

/// Append the `signature` parameter to an already query-formatted URL.
///
/// `url` must already carry a `?...` query string; otherwise the result is not a valid request.
#[must_use]
pub fn format_signature(url: &str, private_key: &str) -> String {
	format!("{url}&signature={}", signature(url, private_key))
}
