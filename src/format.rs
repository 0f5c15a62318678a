use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt::Display;
use url::form_urlencoded;

use crate::{
	ApiVersion,
	endpoints::{Bound, Category, Endpoint, UrlBuilder},
};

/// The root of the Game Jolt game API.
pub const BASE_URL: &str = "https://api.gamejolt.com/api/game/";

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
	/// A boolean, rendered as `true` or `false`.
	Bool(bool),
	/// A signed integer.
	Int(i64),
	/// An unsigned integer.
	UInt(u64),
	/// A float. Whole values keep one fractional digit, e.g. `1.0`.
	Float(f64),
	/// A string.
	Str(String),
}

impl Display for QueryValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::Int(v) => write!(f, "{v}"),
			Self::UInt(v) => write!(f, "{v}"),
			Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::Str(v) => f.write_str(v),
		}
	}
}

macro_rules! query_value_from {
	($variant:ident: $($ty:ty),+) => {
		$(
			impl From<$ty> for QueryValue {
				fn from(value: $ty) -> Self {
					Self::$variant(value.into())
				}
			}
		)+
	};
}

query_value_from!(Bool: bool);
query_value_from!(Int: i64, i32, i16, i8);
query_value_from!(UInt: u64, u32, u16, u8);
query_value_from!(Float: f64, f32);
query_value_from!(Str: String, &str, &String);

/// An ordered set of query parameters.
///
/// Inserting a key that is already present replaces its value in place, so merging
/// is deterministic and the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Queries(IndexMap<String, QueryValue>);

impl Queries {
	/// An empty parameter set.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a parameter, builder style.
	#[must_use]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.insert(key, value);
		self
	}

	/// Add a parameter only when a value is given.
	#[must_use]
	pub fn with_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
		match value {
			Some(value) => self.with(key, value),
			None => self,
		}
	}

	/// Set a parameter, replacing any previous value for the key.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
		self.0.insert(key.into(), value.into());
	}

	/// Look up a parameter.
	#[must_use]
	pub fn get(&self, key: &str) -> Option<&QueryValue> {
		self.0.get(key)
	}

	/// Whether there are no parameters.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// A copy of `self` overlaid with `other`. Keys of `other` win.
	#[must_use]
	pub fn merged(&self, other: Self) -> Self {
		let mut merged = self.clone();
		merged.0.extend(other.0);
		merged
	}

	/// The `application/x-www-form-urlencoded` rendering of the parameters.
	#[must_use]
	pub fn encode(&self) -> String {
		form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.0.iter().map(|(k, v)| (k, v.to_string())))
			.finish()
	}
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for Queries {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut queries = Self::new();
		for (key, value) in iter {
			queries.insert(key, value);
		}
		queries
	}
}

impl<K: Into<String>, V: Into<QueryValue>, const N: usize> From<[(K, V); N]> for Queries {
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

/// Append `queries` to `url` as a query string.
///
/// With an empty `url` only the query string is returned.
#[must_use]
pub fn format_queries(url: &str, queries: &Queries) -> String {
	if url.is_empty() {
		queries.encode()
	} else {
		format!("{url}?{}", queries.encode())
	}
}

/// Builds unsigned, versioned endpoint URLs.
#[derive(Debug, Clone)]
pub struct Formatter {
	base_url: String,
	version: ApiVersion,
	defaults: Queries,
}

impl Formatter {
	/// Create a formatter. `defaults` are merged into every call's parameters.
	#[must_use]
	pub fn new(base_url: impl Into<String>, version: ApiVersion, defaults: Queries) -> Self {
		Self {
			base_url: base_url.into(),
			version,
			defaults,
		}
	}

	/// The configured API version.
	#[must_use]
	pub const fn version(&self) -> ApiVersion {
		self.version
	}

	/// The parameters merged into every call.
	#[must_use]
	pub const fn defaults(&self) -> &Queries {
		&self.defaults
	}

	/// Base URL, version and endpoint path, concatenated as is.
	#[must_use]
	pub fn format_url(&self, endpoint: &str) -> String {
		format!("{}{}{endpoint}", self.base_url, self.version)
	}

	/// Append the defaults overlaid with `queries` to `url`.
	#[must_use]
	pub fn format_queries(&self, url: &str, queries: Queries) -> String {
		format_queries(url, &self.defaults.merged(queries))
	}

	/// Format the full URL for an endpoint path.
	#[must_use]
	pub fn format(&self, endpoint: &str, queries: Queries) -> String {
		self.format_queries(&self.format_url(endpoint), queries)
	}

	/// Bind an endpoint to this formatter.
	#[must_use]
	pub const fn endpoint(&self, endpoint: Endpoint) -> Bound<'_, Self> {
		Bound::new(self, endpoint)
	}

	/// Bind an endpoint by its category and operation names.
	///
	/// # Errors
	///
	/// If either name is unknown.
	pub fn resolve(&self, category: &str, operation: &str) -> crate::Result<Bound<'_, Self>> {
		Ok(self.endpoint(Category::named(category)?.operation(operation)?))
	}
}

impl UrlBuilder for Formatter {
	fn build_url(&self, endpoint: &str, queries: Queries) -> String {
		self.format(endpoint, queries)
	}
}
