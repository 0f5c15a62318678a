use crate::{
	ApiVersion, Requester,
	endpoints::{Endpoint, Sessions as Op},
	error::{Error, Result},
	models::User,
	transport::{Decoder, Transport},
};

use super::credentials;

/// What the player is doing, reported with a ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
	/// Playing.
	Active,
	/// Idle.
	Idle,
}

impl SessionStatus {
	const fn as_str(self) -> &'static str {
		match self {
			Self::Active => "active",
			Self::Idle => "idle",
		}
	}
}

/// Session management. Every operation needs the user's token.
pub struct Sessions<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> Sessions<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	async fn call(&self, op: Op, user: &User, operation: &'static str) -> Result<bool> {
		let queries = credentials(user, operation)?;

		Ok(self
			.requester
			.endpoint(Endpoint::Sessions(op))
			.post(queries)
			.await?
			.success)
	}

	/// Open a session for `user`.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - If the request fails.
	pub async fn open(&self, user: &User) -> Result<bool> {
		self.call(Op::Open, user, "open").await
	}

	/// Keep `user`'s session alive.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - If the request fails.
	pub async fn ping(&self, user: &User) -> Result<bool> {
		self.call(Op::Ping, user, "ping").await
	}

	/// Keep `user`'s session alive and report what they are doing.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - If the request fails.
	pub async fn ping_with_status(&self, user: &User, status: SessionStatus) -> Result<bool> {
		let queries = credentials(user, "ping")?.with("status", status.as_str());

		Ok(self
			.requester
			.endpoint(Endpoint::Sessions(Op::Ping))
			.post(queries)
			.await?
			.success)
	}

	/// Whether `user` has an open session. Requires `v1_2`.
	///
	/// A failure without a message means there is no open session and yields `false`.
	///
	/// # Errors
	///
	/// - If the API version is older than `v1_2`.
	/// - If the user has no token.
	/// - If the request fails with a message.
	pub async fn check(&self, user: &User) -> Result<bool> {
		self.requester.require_version(ApiVersion::V1_2, "check")?;

		match self.call(Op::Check, user, "check").await {
			Err(Error::Api(e)) if e.message().is_none() => Ok(false),
			other => other,
		}
	}

	/// Close `user`'s session.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - If the request fails.
	pub async fn close(&self, user: &User) -> Result<bool> {
		self.call(Op::Close, user, "close").await
	}
}

#[cfg(test)]
mod tests {
	use crate::{
		Config, UsageError,
		testing::{StubTransport, requester},
	};

	use super::*;

	#[test]
	fn test_open_sends_credentials() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1), &transport);

		let opened = tokio_test::block_on(requester.sessions().open(&User::authenticated("cros", "t0k"))).unwrap();

		assert!(opened);
		assert_eq!(transport.last_path(), "/api/game/v1_2/sessions/open");
		assert_eq!(transport.last_param("username").as_deref(), Some("cros"));
		assert_eq!(transport.last_param("user_token").as_deref(), Some("t0k"));
	}

	#[test]
	fn test_ping_with_status() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1), &transport);
		let user = User::authenticated("cros", "t0k");

		tokio_test::block_on(requester.sessions().ping_with_status(&user, SessionStatus::Idle)).unwrap();

		assert_eq!(transport.last_path(), "/api/game/v1_2/sessions/ping");
		assert_eq!(transport.last_param("status").as_deref(), Some("idle"));
	}

	#[test]
	fn test_missing_token_sends_nothing() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1), &transport);
		let user = User {
			username: "cros".into(),
			..User::default()
		};

		for result in [
			tokio_test::block_on(requester.sessions().open(&user)),
			tokio_test::block_on(requester.sessions().ping(&user)),
			tokio_test::block_on(requester.sessions().close(&user)),
			tokio_test::block_on(requester.sessions().check(&user)),
		] {
			assert!(matches!(result, Err(Error::Usage(UsageError::MissingToken { .. }))));
		}
		assert_eq!(transport.calls(), 0);
	}

	#[test]
	fn test_check() {
		let user = User::authenticated("cros", "t0k");

		let transport = StubTransport::replying(r#"{"response":{"success":"false"}}"#);
		let requester = requester(Config::new("k", 1), &transport);
		assert!(!tokio_test::block_on(requester.sessions().check(&user)).unwrap());

		let transport = StubTransport::replying(r#"{"response":{"success":"false","message":"No such user with the credentials passed in could be found."}}"#);
		let requester = crate::testing::requester(Config::new("k", 1), &transport);
		assert!(matches!(
			tokio_test::block_on(requester.sessions().check(&user)),
			Err(Error::Api(_))
		));
	}

	#[test]
	fn test_check_is_version_gated() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1).version(ApiVersion::V1), &transport);

		assert!(matches!(
			tokio_test::block_on(requester.sessions().check(&User::authenticated("cros", "t0k"))),
			Err(Error::Usage(UsageError::VersionMismatch { operation: "check", .. }))
		));
		assert_eq!(transport.calls(), 0);
	}
}
