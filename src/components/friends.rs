use crate::{
	ApiVersion, Requester,
	endpoints::{Endpoint, Friends as Op},
	error::Result,
	models::{FriendId, User},
	transport::{Decoder, Transport},
};

use super::credentials;

/// Friend lists.
pub struct Friends<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> Friends<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	/// The user ids of `user`'s friends. Requires `v1_2` and the user's token.
	///
	/// # Errors
	///
	/// - If the API version is older than `v1_2`.
	/// - If the user has no token.
	/// - If the request fails.
	pub async fn fetch(&self, user: &User) -> Result<Vec<u64>> {
		self.requester.require_version(ApiVersion::V1_2, "fetch")?;
		let queries = credentials(user, "fetch")?;

		let friends: Vec<FriendId> = self
			.requester
			.endpoint(Endpoint::Friends(Op::Fetch))
			.post(queries)
			.await?
			.field_or_default("friends")?;

		Ok(friends.into_iter().map(|f| f.friend_id).collect())
	}
}
