use serde_json::{Map, Value};
use std::future::Future;

use crate::Response;

/// Performs the network exchange for a signed URL.
///
/// Implementations decide everything about the connection: pooling, timeouts,
/// retries. The requester awaits one call per request.
pub trait Transport {
	/// The error produced when the exchange fails.
	type Error: std::error::Error + Send + Sync + 'static;

	/// POST to `url` and return the raw response body.
	fn post(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send;
}

/// Turns a raw response body into a [`Response`].
pub trait Decoder {
	/// The error produced when the body cannot be decoded.
	type Error: std::error::Error + Send + Sync + 'static;

	/// Decode `body`.
	///
	/// # Errors
	///
	/// If `body` is not a well-formed response in the decoder's format.
	fn decode(&self, body: &[u8]) -> Result<Response, Self::Error>;
}

/// Errors produced by [`JsonDecoder`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	/// The body is not JSON.
	#[error("invalid JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// The body has no `response` object.
	#[error("body has no \"response\" object")]
	MissingEnvelope,
	/// The `success` field is absent or not a boolean.
	#[error("\"success\" is missing or not a boolean: {0:?}")]
	InvalidSuccess(Option<Value>),
}

/// Decodes `format=json` bodies.
///
/// The service wraps every payload as
/// `{"response": {"success": "true", "message": "...", ...}}`, with `success` as a
/// string. `success` and `message` are lifted out, the remaining fields become the payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
	type Error = DecodeError;

	fn decode(&self, body: &[u8]) -> Result<Response, Self::Error> {
		let mut envelope: Map<String, Value> = serde_json::from_slice(body)?;

		let Some(Value::Object(mut response)) = envelope.remove("response") else {
			return Err(DecodeError::MissingEnvelope);
		};

		let success = match response.remove("success") {
			Some(Value::Bool(success)) => success,
			Some(Value::String(s)) if s == "true" => true,
			Some(Value::String(s)) if s == "false" => false,
			other => return Err(DecodeError::InvalidSuccess(other)),
		};

		let message = match response.remove("message") {
			Some(Value::String(message)) => Some(message),
			Some(other) => Some(other.to_string()),
			None => None,
		};

		Ok(Response {
			success,
			response,
			message,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_decode_success() {
		let response = JsonDecoder
			.decode(br#"{"response":{"success":"true","data":"42"}}"#)
			.unwrap();

		assert!(response.success);
		assert_eq!(response.message, None);
		assert_eq!(response.response.get("data"), Some(&json!("42")));
		assert!(!response.response.contains_key("success"));
	}

	#[test]
	fn test_decode_failure() {
		let response = JsonDecoder
			.decode(br#"{"response":{"success":false,"message":"Incorrect trophy ID."}}"#)
			.unwrap();

		assert!(!response.success);
		assert_eq!(response.message.as_deref(), Some("Incorrect trophy ID."));
		assert!(response.response.is_empty());
	}

	#[test]
	fn test_decode_errors() {
		assert!(matches!(JsonDecoder.decode(b"success:\"true\""), Err(DecodeError::Json(_))));
		assert!(matches!(
			JsonDecoder.decode(br#"{"success":"true"}"#),
			Err(DecodeError::MissingEnvelope)
		));
		assert!(matches!(
			JsonDecoder.decode(br#"{"response":{"success":"maybe"}}"#),
			Err(DecodeError::InvalidSuccess(Some(_)))
		));
		assert!(matches!(
			JsonDecoder.decode(br#"{"response":{}}"#),
			Err(DecodeError::InvalidSuccess(None))
		));
	}
}
