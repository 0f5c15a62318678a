//! Typed wrappers over the endpoint registry, one per entity.
//!
//! Components never sign or format URLs themselves; they build parameters,
//! check preconditions and go through [`Requester`](crate::Requester).
mod data_store;
mod friends;
mod scores;
mod sessions;
mod time;
mod trophies;
mod users;

pub use data_store::{DataScope, DataStore, UpdateOperation};
pub use friends::Friends;
pub use scores::{ScoreQuery, ScoreSubmission, Scorer, Scores};
pub use sessions::{SessionStatus, Sessions};
pub use time::Time;
pub use trophies::{TrophyQuery, Trophies};
pub use users::{UserQuery, Users};

use crate::{
	error::{Result, UsageError},
	format::Queries,
	models::User,
};

/// The `username` and `user_token` parameters for `user`.
///
/// Fails before any I/O when the user carries no token.
fn credentials(user: &User, operation: &'static str) -> Result<Queries> {
	let token = user.token().ok_or(UsageError::MissingToken { operation })?;

	Ok(Queries::new()
		.with("username", &user.username)
		.with("user_token", token))
}

/// Comma-join ids for multi-item parameters.
fn join_ids(ids: &[u64]) -> String {
	ids.iter().map(u64::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_credentials() {
		let queries = credentials(&User::authenticated("cros", "t0k"), "op").unwrap();
		assert_eq!(queries.encode(), "username=cros&user_token=t0k");

		assert!(matches!(
			credentials(&User::default(), "op"),
			Err(crate::Error::Usage(UsageError::MissingToken { operation: "op" }))
		));
	}

	#[test]
	fn test_join_ids() {
		assert_eq!(join_ids(&[1, 22, 333]), "1,22,333");
		assert_eq!(join_ids(&[]), "");
	}
}
