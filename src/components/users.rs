use crate::{
	Requester, Response,
	endpoints::{Endpoint, Users as Op},
	error::{Error, Result},
	format::Queries,
	models::User,
	transport::{Decoder, Transport},
};

use super::join_ids;

/// Which users to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserQuery {
	/// By numeric id.
	ByIds(Vec<u64>),
	/// By username.
	ByUsernames(Vec<String>),
}

impl UserQuery {
	fn queries(&self) -> Queries {
		match self {
			Self::ByIds(ids) => Queries::new().with("user_id", join_ids(ids)),
			Self::ByUsernames(names) => Queries::new().with("username", names.join(",")),
		}
	}
}

/// User lookups and authentication.
pub struct Users<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> Users<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	/// Fetch the users matching `query`, in the order the service returns them.
	///
	/// # Errors
	///
	/// - If the request fails.
	/// - If the reply has no `users` list.
	pub async fn fetch(&self, query: &UserQuery) -> Result<Vec<User>> {
		self.requester
			.endpoint(Endpoint::Users(Op::Fetch))
			.post(query.queries())
			.await?
			.field("users")
	}

	/// Fetch a single user by id.
	///
	/// # Errors
	///
	/// - If the request fails.
	/// - If the reply lists no user.
	pub async fn fetch_by_id(&self, id: u64) -> Result<User> {
		first(self.fetch(&UserQuery::ByIds(vec![id])).await?)
	}

	/// Fetch a single user by username.
	///
	/// # Errors
	///
	/// - If the request fails.
	/// - If the reply lists no user.
	pub async fn fetch_by_username(&self, username: impl Into<String>) -> Result<User> {
		first(
			self.fetch(&UserQuery::ByUsernames(vec![username.into()]))
				.await?,
		)
	}

	/// Check a username and game token pair.
	///
	/// # Errors
	///
	/// If the service rejects the pair or the request fails.
	pub async fn authenticate(&self, username: &str, token: &str) -> Result<Response> {
		self.requester
			.endpoint(Endpoint::Users(Op::Auth))
			.post([("username", username), ("user_token", token)])
			.await
	}
}

fn first(users: Vec<User>) -> Result<User> {
	users
		.into_iter()
		.next()
		.ok_or(Error::UnexpectedResponse("users"))
}

#[cfg(test)]
mod tests {
	use crate::{
		Config, Error,
		testing::{StubTransport, requester},
	};

	use super::*;

	const TWO_USERS: &str = r#"{"response":{"success":"true","users":[
		{"id":"1","type":"Developer","username":"CROS"},
		{"id":"2","type":"User","username":"nilllzz"}
	]}}"#;

	#[test]
	fn test_fetch_by_ids() {
		let transport = StubTransport::replying(TWO_USERS);
		let requester = requester(Config::new("k", 1), &transport);

		let users = tokio_test::block_on(requester.users().fetch(&UserQuery::ByIds(vec![1, 2]))).unwrap();

		assert_eq!(users.len(), 2);
		assert_eq!(users[1].username, "nilllzz");
		assert_eq!(transport.last_path(), "/api/game/v1_2/users");
		assert_eq!(transport.last_param("user_id").as_deref(), Some("1,2"));
		assert_eq!(transport.last_param("username"), None);
	}

	#[test]
	fn test_fetch_by_username() {
		let transport = StubTransport::replying(TWO_USERS);
		let requester = requester(Config::new("k", 1), &transport);

		let user = tokio_test::block_on(requester.users().fetch_by_username("CROS")).unwrap();

		assert_eq!(user.id, 1);
		assert_eq!(transport.last_param("username").as_deref(), Some("CROS"));
	}

	#[test]
	fn test_fetch_empty_list() {
		let transport = StubTransport::replying(r#"{"response":{"success":"true","users":[]}}"#);
		let requester = requester(Config::new("k", 1), &transport);

		assert!(matches!(
			tokio_test::block_on(requester.users().fetch_by_id(99)),
			Err(Error::UnexpectedResponse("users"))
		));
	}

	#[test]
	fn test_authenticate() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1), &transport);

		let response = tokio_test::block_on(requester.users().authenticate("cros", "t0k")).unwrap();

		assert!(response.success);
		assert_eq!(transport.last_path(), "/api/game/v1_2/users/auth");
		assert_eq!(transport.last_param("user_token").as_deref(), Some("t0k"));
	}
}
