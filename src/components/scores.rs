use crate::{
	ApiVersion, Requester, Response,
	endpoints::{Endpoint, Scores as Op},
	error::Result,
	format::Queries,
	models::{Rank, Score, ScoreTable, User},
	transport::{Decoder, Transport},
};

use super::credentials;

/// Who a score belongs to.
#[derive(Debug, Clone)]
pub enum Scorer<'u> {
	/// A user. Needs the user's token.
	User(&'u User),
	/// A guest, by display name.
	Guest(String),
}

impl Scorer<'_> {
	fn queries(&self, operation: &'static str) -> Result<Queries> {
		match self {
			Self::User(user) => credentials(user, operation),
			Self::Guest(name) => Ok(Queries::new().with("guest", name)),
		}
	}
}

/// Filters for [`Scores::fetch`].
#[derive(Debug, Clone, Default)]
pub struct ScoreQuery<'u> {
	/// How many scores to return. The service defaults to 10 and caps at 100.
	pub limit: Option<u32>,
	/// The table to read. Defaults to the primary table.
	pub table_id: Option<u64>,
	/// Only this scorer's scores.
	pub scorer: Option<Scorer<'u>>,
	/// Only scores better than this sort value. Requires `v1_2`.
	pub better_than: Option<i64>,
	/// Only scores worse than this sort value. Requires `v1_2`.
	pub worse_than: Option<i64>,
}

/// A score to record with [`Scores::add`].
#[derive(Debug, Clone)]
pub struct ScoreSubmission<'u> {
	/// Who scored.
	pub scorer: Scorer<'u>,
	/// The displayed score, e.g. `500 Points`.
	pub score: String,
	/// The value used for sorting.
	pub sort: i64,
	/// The table to record in. Defaults to the primary table.
	pub table_id: Option<u64>,
	/// Extra data, only visible to the game.
	pub extra_data: Option<String>,
}

/// Scoreboards.
pub struct Scores<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> Scores<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	/// Fetch scores.
	///
	/// # Errors
	///
	/// - If `better_than` or `worse_than` is set and the API version is older than `v1_2`.
	/// - If the scorer is a user without a token.
	/// - If the request fails.
	pub async fn fetch(&self, query: &ScoreQuery<'_>) -> Result<Vec<Score>> {
		if query.better_than.is_some() || query.worse_than.is_some() {
			self.requester.require_version(ApiVersion::V1_2, "fetch")?;
		}

		let queries = match &query.scorer {
			Some(scorer) => scorer.queries("fetch")?,
			None => Queries::new(),
		}
		.with_opt("limit", query.limit)
		.with_opt("table_id", query.table_id)
		.with_opt("better_than", query.better_than)
		.with_opt("worse_than", query.worse_than);

		self.requester
			.endpoint(Endpoint::Scores(Op::Fetch))
			.post(queries)
			.await?
			.field_or_default("scores")
	}

	/// Record a score.
	///
	/// # Errors
	///
	/// - If the scorer is a user without a token.
	/// - If the request fails.
	pub async fn add(&self, submission: &ScoreSubmission<'_>) -> Result<Response> {
		let queries = submission
			.scorer
			.queries("add")?
			.with("score", &submission.score)
			.with("sort", submission.sort)
			.with_opt("table_id", submission.table_id)
			.with_opt("extra_data", submission.extra_data.as_deref());

		self.requester
			.endpoint(Endpoint::Scores(Op::Add))
			.post(queries)
			.await
	}

	/// The rank a `sort` value would have in a table. Requires `v1_2`.
	///
	/// # Errors
	///
	/// - If the API version is older than `v1_2`.
	/// - If the request fails.
	pub async fn get_rank(&self, sort: i64, table_id: Option<u64>) -> Result<u64> {
		self.requester.require_version(ApiVersion::V1_2, "get_rank")?;

		let queries = Queries::new()
			.with("sort", sort)
			.with_opt("table_id", table_id);

		let rank: Rank = self
			.requester
			.endpoint(Endpoint::Scores(Op::GetRank))
			.post(queries)
			.await?
			.payload()?;

		Ok(rank.rank)
	}

	/// The game's score tables.
	///
	/// # Errors
	///
	/// If the request fails.
	pub async fn tables(&self) -> Result<Vec<ScoreTable>> {
		self.requester
			.endpoint(Endpoint::Scores(Op::Tables))
			.post(Queries::new())
			.await?
			.field_or_default("tables")
	}
}

#[cfg(test)]
mod tests {
	use crate::{
		Config, Error, UsageError,
		testing::{StubTransport, requester},
	};

	use super::*;

	#[test]
	fn test_fetch() {
		let transport = StubTransport::replying(
			r#"{"response":{"success":"true","scores":[
				{"score":"500 Points","sort":"500","extra_data":"","user":"cros","user_id":"1","guest":"","stored":"1 week ago","stored_timestamp":"1700000000"}
			]}}"#,
		);
		let requester = requester(Config::new("k", 1), &transport);
		let user = User::authenticated("cros", "t0k");

		let scores = tokio_test::block_on(requester.scores().fetch(&ScoreQuery {
			limit: Some(5),
			scorer: Some(Scorer::User(&user)),
			better_than: Some(100),
			..ScoreQuery::default()
		}))
		.unwrap();

		assert_eq!(scores[0].sort, 500);
		assert_eq!(scores[0].user_id, Some(1));
		assert_eq!(transport.last_path(), "/api/game/v1_2/scores/");
		assert_eq!(transport.last_param("limit").as_deref(), Some("5"));
		assert_eq!(transport.last_param("better_than").as_deref(), Some("100"));
		assert_eq!(transport.last_param("user_token").as_deref(), Some("t0k"));
		assert_eq!(transport.last_param("table_id"), None);
	}

	#[test]
	fn test_fetch_range_is_version_gated() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1).version(ApiVersion::V1_1), &transport);

		let query = ScoreQuery {
			worse_than: Some(10),
			..ScoreQuery::default()
		};
		assert!(matches!(
			tokio_test::block_on(requester.scores().fetch(&query)),
			Err(Error::Usage(UsageError::VersionMismatch { .. }))
		));
		assert_eq!(transport.calls(), 0);

		assert!(tokio_test::block_on(requester.scores().fetch(&ScoreQuery::default())).unwrap().is_empty());
		assert_eq!(transport.calls(), 1);
	}

	#[test]
	fn test_add_as_guest() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1), &transport);

		tokio_test::block_on(requester.scores().add(&ScoreSubmission {
			scorer: Scorer::Guest("Big Bob".into()),
			score: "12 laps".into(),
			sort: 12,
			table_id: Some(3),
			extra_data: None,
		}))
		.unwrap();

		assert_eq!(transport.last_path(), "/api/game/v1_2/scores/add");
		assert_eq!(transport.last_param("guest").as_deref(), Some("Big Bob"));
		assert_eq!(transport.last_param("score").as_deref(), Some("12 laps"));
		assert_eq!(transport.last_param("table_id").as_deref(), Some("3"));
		assert_eq!(transport.last_param("extra_data"), None);
	}

	#[test]
	fn test_get_rank() {
		let transport = StubTransport::replying(r#"{"response":{"success":"true","rank":"4"}}"#);
		let requester = requester(Config::new("k", 1), &transport);

		assert_eq!(tokio_test::block_on(requester.scores().get_rank(1200, None)).unwrap(), 4);
		assert_eq!(transport.last_path(), "/api/game/v1_2/scores/get-rank");
	}

	#[test]
	fn test_tables() {
		let transport = StubTransport::replying(
			r#"{"response":{"success":"true","tables":[{"id":"1","name":"Main","description":"","primary":"1"}]}}"#,
		);
		let requester = requester(Config::new("k", 1), &transport);

		let tables = tokio_test::block_on(requester.scores().tables()).unwrap();

		assert!(tables[0].primary);
		assert_eq!(transport.last_path(), "/api/game/v1_2/scores/tables");
	}
}
