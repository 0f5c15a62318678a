//! The fixed registry of API endpoints.
//!
//! Endpoints are grouped in categories. Each can be named two ways, which resolve
//! to the same entry:
//!
//! ```rust,ignore
//! use gamejolt::endpoints::{Category, Endpoint, Users};
//!
//! let typed = Endpoint::Users(Users::Fetch);
//! let named = Category::named("USERS")?.operation("FETCH")?;
//! assert_eq!(typed, named);
//! assert_eq!(typed.path(), "/users");
//! ```
use std::fmt::Display;

use crate::{
	error::{Result, UsageError},
	format::Queries,
};

/// `USERS` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Users {
	/// `FETCH`
	Fetch,
	/// `AUTH`
	Auth,
}

/// `SESSIONS` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sessions {
	/// `OPEN`
	Open,
	/// `PING`
	Ping,
	/// `CHECK`
	Check,
	/// `CLOSE`
	Close,
}

/// `SCORES` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scores {
	/// `FETCH`
	Fetch,
	/// `ADD`
	Add,
	/// `GET_RANK`
	GetRank,
	/// `TABLES`
	Tables,
}

/// `TROPHIES` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trophies {
	/// `FETCH`
	Fetch,
	/// `ADD_ACHIEVED`
	AddAchieved,
	/// `REMOVE_ACHIEVED`
	RemoveAchieved,
}

/// `DATASTORE` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataStore {
	/// `FETCH`
	Fetch,
	/// `GET_KEYS`
	GetKeys,
	/// `REMOVE`
	Remove,
	/// `SET`
	Set,
	/// `UPDATE`
	Update,
}

/// `FRIENDS` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Friends {
	/// `FETCH`
	Fetch,
}

/// `TIME` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Time {
	/// `FETCH`
	Fetch,
}

/// A single API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// A `USERS` endpoint.
	Users(Users),
	/// A `SESSIONS` endpoint.
	Sessions(Sessions),
	/// A `SCORES` endpoint.
	Scores(Scores),
	/// A `TROPHIES` endpoint.
	Trophies(Trophies),
	/// A `DATASTORE` endpoint.
	DataStore(DataStore),
	/// A `FRIENDS` endpoint.
	Friends(Friends),
	/// A `TIME` endpoint.
	Time(Time),
}

/// An endpoint category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
	/// `USERS`
	Users,
	/// `SESSIONS`
	Sessions,
	/// `SCORES`
	Scores,
	/// `TROPHIES`
	Trophies,
	/// `DATASTORE`
	DataStore,
	/// `FRIENDS`
	Friends,
	/// `TIME`
	Time,
}

/// The registry: each category with its operation names and endpoints.
pub const REGISTRY: &[(Category, &[(&str, Endpoint)])] = &[
	(
		Category::Users,
		&[
			("FETCH", Endpoint::Users(Users::Fetch)),
			("AUTH", Endpoint::Users(Users::Auth)),
		],
	),
	(
		Category::Sessions,
		&[
			("OPEN", Endpoint::Sessions(Sessions::Open)),
			("PING", Endpoint::Sessions(Sessions::Ping)),
			("CHECK", Endpoint::Sessions(Sessions::Check)),
			("CLOSE", Endpoint::Sessions(Sessions::Close)),
		],
	),
	(
		Category::Scores,
		&[
			("FETCH", Endpoint::Scores(Scores::Fetch)),
			("ADD", Endpoint::Scores(Scores::Add)),
			("GET_RANK", Endpoint::Scores(Scores::GetRank)),
			("TABLES", Endpoint::Scores(Scores::Tables)),
		],
	),
	(
		Category::Trophies,
		&[
			("FETCH", Endpoint::Trophies(Trophies::Fetch)),
			("ADD_ACHIEVED", Endpoint::Trophies(Trophies::AddAchieved)),
			("REMOVE_ACHIEVED", Endpoint::Trophies(Trophies::RemoveAchieved)),
		],
	),
	(
		Category::DataStore,
		&[
			("FETCH", Endpoint::DataStore(DataStore::Fetch)),
			("GET_KEYS", Endpoint::DataStore(DataStore::GetKeys)),
			("REMOVE", Endpoint::DataStore(DataStore::Remove)),
			("SET", Endpoint::DataStore(DataStore::Set)),
			("UPDATE", Endpoint::DataStore(DataStore::Update)),
		],
	),
	(Category::Friends, &[("FETCH", Endpoint::Friends(Friends::Fetch))]),
	(Category::Time, &[("FETCH", Endpoint::Time(Time::Fetch))]),
];

impl Category {
	/// The category's registry name, e.g. `DATASTORE`.
	#[must_use]
	pub const fn name(self) -> &'static str {
		match self {
			Self::Users => "USERS",
			Self::Sessions => "SESSIONS",
			Self::Scores => "SCORES",
			Self::Trophies => "TROPHIES",
			Self::DataStore => "DATASTORE",
			Self::Friends => "FRIENDS",
			Self::Time => "TIME",
		}
	}

	/// Look up a category by its registry name.
	///
	/// # Errors
	///
	/// If no category has this name.
	pub fn named(name: &str) -> Result<Self> {
		REGISTRY
			.iter()
			.map(|(category, _)| *category)
			.find(|category| category.name() == name)
			.ok_or_else(|| UsageError::UnknownCategory(name.to_owned()).into())
	}

	/// The operations of this category, by name.
	#[must_use]
	pub fn operations(self) -> &'static [(&'static str, Endpoint)] {
		REGISTRY
			.iter()
			.find(|(category, _)| *category == self)
			.map(|(_, operations)| *operations)
			.unwrap_or_default()
	}

	/// Look up an operation of this category by name.
	///
	/// # Errors
	///
	/// If the category has no operation with this name.
	pub fn operation(self, name: &str) -> Result<Endpoint> {
		self.operations()
			.iter()
			.find(|(operation, _)| *operation == name)
			.map(|(_, endpoint)| *endpoint)
			.ok_or_else(|| {
				UsageError::UnknownOperation {
					category: self.name(),
					operation: name.to_owned(),
				}
				.into()
			})
	}
}

impl Display for Category {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl Endpoint {
	/// The path appended after the API version.
	#[must_use]
	pub const fn path(self) -> &'static str {
		match self {
			Self::Users(Users::Fetch) => "/users",
			Self::Users(Users::Auth) => "/users/auth",
			Self::Sessions(Sessions::Open) => "/sessions/open",
			Self::Sessions(Sessions::Ping) => "/sessions/ping",
			Self::Sessions(Sessions::Check) => "/sessions/check",
			Self::Sessions(Sessions::Close) => "/sessions/close",
			Self::Scores(Scores::Fetch) => "/scores/",
			Self::Scores(Scores::Add) => "/scores/add",
			Self::Scores(Scores::GetRank) => "/scores/get-rank",
			Self::Scores(Scores::Tables) => "/scores/tables",
			Self::Trophies(Trophies::Fetch) => "/trophies",
			Self::Trophies(Trophies::AddAchieved) => "/trophies/add-achieved",
			Self::Trophies(Trophies::RemoveAchieved) => "/trophies/remove-achieved",
			Self::DataStore(DataStore::Fetch) => "/data-store/fetch",
			Self::DataStore(DataStore::GetKeys) => "/data-store/get-keys",
			Self::DataStore(DataStore::Remove) => "/data-store/remove",
			Self::DataStore(DataStore::Set) => "/data-store/set",
			Self::DataStore(DataStore::Update) => "/data-store/update",
			Self::Friends(Friends::Fetch) => "/friends",
			Self::Time(Time::Fetch) => "/time",
		}
	}

	/// The category this endpoint belongs to.
	#[must_use]
	pub const fn category(self) -> Category {
		match self {
			Self::Users(_) => Category::Users,
			Self::Sessions(_) => Category::Sessions,
			Self::Scores(_) => Category::Scores,
			Self::Trophies(_) => Category::Trophies,
			Self::DataStore(_) => Category::DataStore,
			Self::Friends(_) => Category::Friends,
			Self::Time(_) => Category::Time,
		}
	}

	/// Look up an endpoint by category and operation name, e.g. `("USERS", "FETCH")`.
	///
	/// # Errors
	///
	/// If either name is unknown.
	pub fn resolve(category: &str, operation: &str) -> Result<Self> {
		Category::named(category)?.operation(operation)
	}
}

impl Display for Endpoint {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = self
			.category()
			.operations()
			.iter()
			.find(|(_, endpoint)| endpoint == self)
			.map_or("?", |(name, _)| *name);

		write!(f, "{}.{name}", self.category())
	}
}

/// Something that turns an endpoint path and parameters into a URL.
pub trait UrlBuilder {
	/// Build the URL for `endpoint` with `queries`.
	fn build_url(&self, endpoint: &str, queries: Queries) -> String;
}

/// An endpoint bound to the builder that formats it.
#[derive(Debug)]
pub struct Bound<'a, B: ?Sized> {
	pub(crate) builder: &'a B,
	pub(crate) endpoint: Endpoint,
}

impl<'a, B: ?Sized> Bound<'a, B> {
	pub(crate) const fn new(builder: &'a B, endpoint: Endpoint) -> Self {
		Self { builder, endpoint }
	}

	/// The bound endpoint.
	#[must_use]
	pub const fn endpoint(&self) -> Endpoint {
		self.endpoint
	}
}

impl<B: UrlBuilder + ?Sized> Bound<'_, B> {
	/// The URL for this endpoint with `queries`.
	#[must_use]
	pub fn url(&self, queries: impl Into<Queries>) -> String {
		self.builder.build_url(self.endpoint.path(), queries.into())
	}
}

impl<B: ?Sized> Clone for Bound<'_, B> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<B: ?Sized> Copy for Bound<'_, B> {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ApiVersion, Formatter};

	#[test]
	fn test_named_and_typed_access_agree() {
		for (category, operations) in REGISTRY {
			assert_eq!(Category::named(category.name()).unwrap(), *category);

			for (name, endpoint) in *operations {
				assert_eq!(Endpoint::resolve(category.name(), name).unwrap(), *endpoint);
				assert_eq!(endpoint.category(), *category);
			}
		}

		assert_eq!(
			Endpoint::resolve("TROPHIES", "ADD_ACHIEVED").unwrap(),
			Endpoint::Trophies(Trophies::AddAchieved)
		);
	}

	#[test]
	fn test_paths() {
		assert_eq!(Endpoint::Users(Users::Fetch).path(), "/users");
		assert_eq!(Endpoint::Sessions(Sessions::Open).path(), "/sessions/open");
		assert_eq!(Endpoint::Scores(Scores::Fetch).path(), "/scores/");
		assert_eq!(
			Endpoint::Trophies(Trophies::AddAchieved).path(),
			"/trophies/add-achieved"
		);
		assert_eq!(Endpoint::DataStore(DataStore::Set).path(), "/data-store/set");
		assert_eq!(Endpoint::Time(Time::Fetch).to_string(), "TIME.FETCH");
	}

	#[test]
	fn test_unknown_names() {
		assert!(matches!(
			Category::named("USER"),
			Err(crate::Error::Usage(UsageError::UnknownCategory(name))) if name == "USER"
		));
		assert!(matches!(
			Endpoint::resolve("USERS", "DELETE"),
			Err(crate::Error::Usage(UsageError::UnknownOperation { category: "USERS", .. }))
		));
	}

	#[test]
	fn test_bound_endpoint_formats() {
		let formatter = Formatter::new(
			crate::format::BASE_URL,
			ApiVersion::V1_1,
			Queries::new().with("game_id", 9),
		);
		let bound = formatter.resolve("USERS", "FETCH").unwrap();

		assert_eq!(bound.endpoint(), Endpoint::Users(Users::Fetch));
		assert_eq!(
			bound.url([("username", "cros")]),
			"https://api.gamejolt.com/api/game/v1_1/users?game_id=9&username=cros"
		);
	}
}
