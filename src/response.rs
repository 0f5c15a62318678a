use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A decoded reply from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
	/// Whether the service reports success.
	pub success: bool,
	/// The payload fields, without `success` and `message`.
	pub response: Map<String, Value>,
	/// The failure reason, when the service gives one.
	pub message: Option<String>,
}

impl Response {
	/// A successful response with the given payload.
	#[must_use]
	pub const fn success(response: Map<String, Value>) -> Self {
		Self {
			success: true,
			response,
			message: None,
		}
	}

	/// A failed response with an optional reason.
	#[must_use]
	pub fn failure(message: Option<String>) -> Self {
		Self {
			success: false,
			response: Map::new(),
			message,
		}
	}

	/// Deserialize one payload field.
	///
	/// # Errors
	///
	/// - If the field is absent.
	/// - If the field does not deserialize into `T`.
	pub fn field<T: DeserializeOwned>(&self, name: &'static str) -> Result<T> {
		let value = self
			.response
			.get(name)
			.ok_or(Error::UnexpectedResponse(name))?;

		T::deserialize(value).map_err(|e| Error::Decode(Box::new(e)))
	}

	/// Deserialize one payload field, treating an absent field as `T::default()`.
	///
	/// # Errors
	///
	/// If the field is present but does not deserialize into `T`.
	pub fn field_or_default<T: DeserializeOwned + Default>(&self, name: &'static str) -> Result<T> {
		match self.response.get(name) {
			Some(value) => T::deserialize(value).map_err(|e| Error::Decode(Box::new(e))),
			None => Ok(T::default()),
		}
	}

	/// Deserialize the whole payload.
	///
	/// # Errors
	///
	/// If the payload does not deserialize into `T`.
	pub fn payload<T: DeserializeOwned>(&self) -> Result<T> {
		T::deserialize(Value::Object(self.response.clone())).map_err(|e| Error::Decode(Box::new(e)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn response(value: Value) -> Response {
		let Value::Object(map) = value else {
			unreachable!()
		};
		Response::success(map)
	}

	#[test]
	fn test_field() {
		let response = response(json!({ "data": "hello", "count": 3 }));

		assert_eq!(response.field::<String>("data").unwrap(), "hello");
		assert_eq!(response.field::<u32>("count").unwrap(), 3);
		assert!(matches!(
			response.field::<String>("missing"),
			Err(Error::UnexpectedResponse("missing"))
		));
		assert!(matches!(response.field::<u32>("data"), Err(Error::Decode(_))));
	}

	#[test]
	fn test_field_or_default() {
		let response = response(json!({}));

		assert!(response.field_or_default::<Vec<String>>("keys").unwrap().is_empty());
	}
}
