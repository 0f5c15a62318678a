use crate::{
	ApiVersion, Requester,
	endpoints::{DataStore as Op, Endpoint},
	error::Result,
	format::{QueryValue, Queries},
	models::{KeyEntry, User},
	transport::{Decoder, Transport},
};

use super::credentials;

/// Whose data to act on.
#[derive(Debug, Clone, Copy)]
pub enum DataScope<'u> {
	/// The game's global store.
	Global,
	/// The user's store. Needs the user's token.
	ForUser(&'u User),
}

/// An in-place update applied by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperation {
	/// Numeric addition.
	Add,
	/// Numeric subtraction.
	Subtract,
	/// Numeric multiplication.
	Multiply,
	/// Numeric division.
	Divide,
	/// String append.
	Append,
	/// String prepend.
	Prepend,
}

impl UpdateOperation {
	const fn as_str(self) -> &'static str {
		match self {
			Self::Add => "add",
			Self::Subtract => "subtract",
			Self::Multiply => "multiply",
			Self::Divide => "divide",
			Self::Append => "append",
			Self::Prepend => "prepend",
		}
	}
}

/// The key-value data store.
pub struct DataStore<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> DataStore<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	fn scoped(scope: DataScope<'_>, operation: &'static str) -> Result<Queries> {
		match scope {
			DataScope::Global => Ok(Queries::new()),
			DataScope::ForUser(user) => credentials(user, operation),
		}
	}

	/// Read the item stored under `key`.
	///
	/// # Errors
	///
	/// - If the scope is a user without a token.
	/// - If the key does not exist or the request fails.
	pub async fn fetch(&self, scope: DataScope<'_>, key: &str) -> Result<String> {
		let queries = Self::scoped(scope, "fetch")?.with("key", key);

		self.requester
			.endpoint(Endpoint::DataStore(Op::Fetch))
			.post(queries)
			.await?
			.field("data")
	}

	/// Store `data` under `key`.
	///
	/// # Errors
	///
	/// - If the scope is a user without a token.
	/// - If the request fails.
	pub async fn set(&self, scope: DataScope<'_>, key: &str, data: &str) -> Result<()> {
		let queries = Self::scoped(scope, "set")?
			.with("key", key)
			.with("data", data);

		self.requester
			.endpoint(Endpoint::DataStore(Op::Set))
			.post(queries)
			.await?;

		Ok(())
	}

	/// Apply `operation` with `value` to the item under `key`, returning the new value.
	///
	/// # Errors
	///
	/// - If the scope is a user without a token.
	/// - If the key does not exist or the request fails.
	pub async fn update(
		&self,
		scope: DataScope<'_>,
		key: &str,
		operation: UpdateOperation,
		value: impl Into<QueryValue>,
	) -> Result<String> {
		let queries = Self::scoped(scope, "update")?
			.with("key", key)
			.with("operation", operation.as_str())
			.with("value", value);

		self.requester
			.endpoint(Endpoint::DataStore(Op::Update))
			.post(queries)
			.await?
			.field("data")
	}

	/// Delete the item under `key`.
	///
	/// # Errors
	///
	/// - If the scope is a user without a token.
	/// - If the key does not exist or the request fails.
	pub async fn remove(&self, scope: DataScope<'_>, key: &str) -> Result<()> {
		let queries = Self::scoped(scope, "remove")?.with("key", key);

		self.requester
			.endpoint(Endpoint::DataStore(Op::Remove))
			.post(queries)
			.await?;

		Ok(())
	}

	/// List the stored keys, optionally filtered by a `*` wildcard `pattern`.
	///
	/// A pattern requires `v1_2`. An empty store yields an empty list.
	///
	/// # Errors
	///
	/// - If a pattern is given and the API version is older than `v1_2`.
	/// - If the scope is a user without a token.
	/// - If the request fails.
	pub async fn get_keys(&self, scope: DataScope<'_>, pattern: Option<&str>) -> Result<Vec<String>> {
		if pattern.is_some() {
			self.requester.require_version(ApiVersion::V1_2, "get_keys")?;
		}

		let queries = Self::scoped(scope, "get_keys")?.with_opt("pattern", pattern);

		let keys: Vec<KeyEntry> = self
			.requester
			.endpoint(Endpoint::DataStore(Op::GetKeys))
			.post(queries)
			.await?
			.field_or_default("keys")?;

		Ok(keys.into_iter().map(|entry| entry.key).collect())
	}
}
