use crate::{
	ApiVersion, Requester, Response,
	endpoints::{Endpoint, Trophies as Op},
	error::{Error, Result, TrophyError},
	models::{Trophy, User},
	transport::{Decoder, Transport},
};

use super::{credentials, join_ids};

/// Which trophies to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrophyQuery {
	/// Every trophy of the game.
	#[default]
	All,
	/// Only these trophies.
	ByIds(Vec<u64>),
}

/// Trophies. Every operation needs the user's token.
pub struct Trophies<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> Trophies<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	/// Fetch trophies as seen by `user`.
	///
	/// `achieved` filters on achievement: `Some(true)` for achieved only,
	/// `Some(false)` for not yet achieved, `None` for all.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - If the request fails.
	pub async fn fetch(
		&self,
		user: &User,
		query: &TrophyQuery,
		achieved: Option<bool>,
	) -> Result<Vec<Trophy>> {
		let mut queries = credentials(user, "fetch")?.with_opt("achieved", achieved);

		if let TrophyQuery::ByIds(ids) = query {
			queries.insert("trophy_id", join_ids(ids));
		}

		self.requester
			.endpoint(Endpoint::Trophies(Op::Fetch))
			.post(queries)
			.await?
			.field("trophies")
	}

	/// Fetch a single trophy as seen by `user`.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - If the request fails.
	/// - If the reply lists no trophy.
	pub async fn fetch_one(&self, user: &User, trophy_id: u64) -> Result<Trophy> {
		self.fetch(user, &TrophyQuery::ByIds(vec![trophy_id]), None)
			.await?
			.into_iter()
			.next()
			.ok_or(Error::UnexpectedResponse("trophies"))
	}

	/// Mark a trophy as achieved by `user`.
	///
	/// # Errors
	///
	/// - If the user has no token.
	/// - [`TrophyError`] if the user already has the trophy or the id is wrong.
	/// - If the request otherwise fails.
	pub async fn add_achieved(&self, user: &User, trophy_id: u64) -> Result<Response> {
		self.achievement(Op::AddAchieved, user, trophy_id, "add_achieved")
			.await
	}

	/// Take a trophy back from `user`. Requires `v1_2`.
	///
	/// # Errors
	///
	/// - If the API version is older than `v1_2`.
	/// - If the user has no token.
	/// - [`TrophyError`] if the user does not have the trophy or the id is wrong.
	/// - If the request otherwise fails.
	pub async fn remove_achieved(&self, user: &User, trophy_id: u64) -> Result<Response> {
		self.requester
			.require_version(ApiVersion::V1_2, "remove_achieved")?;

		self.achievement(Op::RemoveAchieved, user, trophy_id, "remove_achieved")
			.await
	}

	async fn achievement(
		&self,
		op: Op,
		user: &User,
		trophy_id: u64,
		operation: &'static str,
	) -> Result<Response> {
		let queries = credentials(user, operation)?.with("trophy_id", trophy_id);

		self.requester
			.endpoint(Endpoint::Trophies(op))
			.post(queries)
			.await
			.map_err(|e| TrophyError::refine(e, trophy_id, user))
	}
}
