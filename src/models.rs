//! Typed records returned by the service.
//!
//! The service encodes most numbers as strings, so numeric fields accept both.
use serde::{Deserialize, Deserializer, de::Error as _};
use std::{
	fmt::Display,
	str::FromStr,
	time::{Duration, SystemTime, UNIX_EPOCH},
};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
	Str(String),
	Num(serde_json::Number),
	Bool(bool),
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: FromStr,
	T::Err: Display,
{
	let raw = match Lenient::deserialize(deserializer)? {
		Lenient::Str(s) => s,
		Lenient::Num(n) => n.to_string(),
		Lenient::Bool(b) => b.to_string(),
	};

	raw.trim().parse().map_err(D::Error::custom)
}

fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
	D: Deserializer<'de>,
	T: FromStr,
	T::Err: Display,
{
	let raw = match Option::<Lenient>::deserialize(deserializer)? {
		None => return Ok(None),
		Some(Lenient::Str(s)) if s.trim().is_empty() => return Ok(None),
		Some(Lenient::Str(s)) => s,
		Some(Lenient::Num(n)) => n.to_string(),
		Some(Lenient::Bool(b)) => b.to_string(),
	};

	raw.trim().parse().map(Some).map_err(D::Error::custom)
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
	Ok(match Lenient::deserialize(deserializer)? {
		Lenient::Bool(b) => b,
		Lenient::Str(s) => s == "true" || s == "1",
		Lenient::Num(n) => n.as_u64() == Some(1),
	})
}

/// `false`/`"false"` become `None`, any other string is kept as is.
fn achieved<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
	Ok(match Option::<Lenient>::deserialize(deserializer)? {
		None | Some(Lenient::Bool(false)) => None,
		Some(Lenient::Str(s)) if s == "false" || s.is_empty() => None,
		Some(Lenient::Str(s)) => Some(s),
		Some(Lenient::Bool(true)) => Some("true".to_owned()),
		Some(Lenient::Num(n)) => Some(n.to_string()),
	})
}

/// A Game Jolt user.
///
/// The `token` is never sent by the service; set it with [`User::with_token`]
/// or [`User::authenticated`] to call operations that act on the user's behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
	/// The user's id.
	#[serde(deserialize_with = "lenient")]
	pub id: u64,
	/// `User`, `Developer`, `Moderator` or `Administrator`.
	#[serde(rename = "type")]
	pub kind: String,
	/// The user's username.
	pub username: String,
	/// The URL of the user's avatar.
	pub avatar_url: String,
	/// How long ago the user signed up.
	pub signed_up: String,
	/// When the user signed up, in seconds since the epoch.
	#[serde(deserialize_with = "lenient")]
	pub signed_up_timestamp: u64,
	/// How long ago the user last logged in, or `Online Now`.
	pub last_logged_in: String,
	/// When the user last logged in, in seconds since the epoch.
	#[serde(deserialize_with = "lenient")]
	pub last_logged_in_timestamp: u64,
	/// `Active` or `Banned`.
	pub status: String,
	/// The user's display name.
	pub developer_name: String,
	/// The user's website, possibly empty.
	pub developer_website: String,
	/// The user's profile description, in markdown.
	pub developer_description: String,
	/// The user's game token. Held locally only.
	#[serde(skip)]
	pub token: Option<String>,
}

impl User {
	/// A user known only by username and game token.
	#[must_use]
	pub fn authenticated(username: impl Into<String>, token: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			token: Some(token.into()),
			..Self::default()
		}
	}

	/// Attach a game token.
	#[must_use]
	pub fn with_token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(token.into());
		self
	}

	/// The game token, unless absent or empty.
	#[must_use]
	pub fn token(&self) -> Option<&str> {
		self.token.as_deref().filter(|token| !token.is_empty())
	}
}

/// A trophy, as seen by one user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trophy {
	/// The trophy's id.
	#[serde(deserialize_with = "lenient")]
	pub id: u64,
	/// The trophy's title.
	pub title: String,
	/// The trophy's description.
	pub description: String,
	/// `Bronze`, `Silver`, `Gold` or `Platinum`.
	pub difficulty: String,
	/// The URL of the trophy's image.
	pub image_url: String,
	/// When the user achieved it, e.g. `5 days ago`. `None` if not achieved.
	#[serde(default, deserialize_with = "achieved")]
	pub achieved: Option<String>,
}

impl Trophy {
	/// Whether the user has achieved this trophy.
	#[must_use]
	pub const fn is_achieved(&self) -> bool {
		self.achieved.is_some()
	}
}

/// The service's clock.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Time {
	/// Seconds since the epoch.
	#[serde(deserialize_with = "lenient")]
	pub timestamp: u64,
	/// The service's timezone, e.g. `America/New_York`.
	pub timezone: String,
	/// The year.
	#[serde(deserialize_with = "lenient")]
	pub year: u32,
	/// The month.
	#[serde(deserialize_with = "lenient")]
	pub month: u32,
	/// The day of the month.
	#[serde(deserialize_with = "lenient")]
	pub day: u32,
	/// The hour of the day.
	#[serde(deserialize_with = "lenient")]
	pub hour: u32,
	/// The minute of the hour.
	#[serde(deserialize_with = "lenient")]
	pub minute: u32,
	/// The second of the minute.
	#[serde(deserialize_with = "lenient")]
	pub second: u32,
}

impl Time {
	/// The timestamp as a [`SystemTime`].
	#[must_use]
	pub fn system_time(&self) -> SystemTime {
		UNIX_EPOCH + Duration::from_secs(self.timestamp)
	}
}

/// A score entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Score {
	/// The displayed score, e.g. `234 Jumps`.
	pub score: String,
	/// The value the table is sorted by.
	#[serde(deserialize_with = "lenient")]
	pub sort: i64,
	/// Extra data stored with the score.
	#[serde(default)]
	pub extra_data: String,
	/// The username, if a user scored.
	#[serde(default)]
	pub user: String,
	/// The user id, if a user scored.
	#[serde(default, deserialize_with = "lenient_opt")]
	pub user_id: Option<u64>,
	/// The guest name, if a guest scored.
	#[serde(default)]
	pub guest: String,
	/// How long ago the score was stored.
	pub stored: String,
	/// When the score was stored, in seconds since the epoch.
	#[serde(deserialize_with = "lenient")]
	pub stored_timestamp: u64,
}

/// A score table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoreTable {
	/// The table's id.
	#[serde(deserialize_with = "lenient")]
	pub id: u64,
	/// The table's name.
	pub name: String,
	/// The table's description.
	#[serde(default)]
	pub description: String,
	/// Whether this is the game's primary table.
	#[serde(deserialize_with = "flag")]
	pub primary: bool,
}

#[derive(Deserialize)]
pub(crate) struct FriendId {
	#[serde(deserialize_with = "lenient")]
	pub friend_id: u64,
}

#[derive(Deserialize)]
pub(crate) struct KeyEntry {
	pub key: String,
}

#[derive(Deserialize)]
pub(crate) struct Rank {
	#[serde(deserialize_with = "lenient")]
	pub rank: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_user_from_strings() {
		let user: User = serde_json::from_value(json!({
			"id": "1",
			"type": "Developer",
			"username": "CROS",
			"avatar_url": "https://m.gjcdn.net/user-avatar/60/1-crop0_0_512_512-ec8dhrar-v4.png",
			"signed_up": "12 years ago",
			"signed_up_timestamp": 1_309_737_500,
			"last_logged_in": "Online Now",
			"last_logged_in_timestamp": "1715000000",
			"status": "Active",
			"developer_name": "CROS",
			"developer_website": "",
			"developer_description": "Game Jolt founder",
		}))
		.unwrap();

		assert_eq!(user.id, 1);
		assert_eq!(user.kind, "Developer");
		assert_eq!(user.signed_up_timestamp, 1_309_737_500);
		assert_eq!(user.last_logged_in_timestamp, 1_715_000_000);
		assert_eq!(user.token, None);
	}

	#[test]
	fn test_user_token() {
		assert_eq!(User::authenticated("cros", "abc").token(), Some("abc"));
		assert_eq!(User::authenticated("cros", "").token(), None);
		assert_eq!(User::default().with_token("t").token(), Some("t"));
	}

	#[test]
	fn test_trophy_achieved() {
		let trophy: Trophy = serde_json::from_value(json!({
			"id": "42", "title": "First", "description": "Start", "difficulty": "Bronze",
			"image_url": "", "achieved": "false",
		}))
		.unwrap();
		assert!(!trophy.is_achieved());

		let trophy: Trophy = serde_json::from_value(json!({
			"id": 42, "title": "First", "description": "Start", "difficulty": "Bronze",
			"image_url": "", "achieved": "5 days ago",
		}))
		.unwrap();
		assert_eq!(trophy.achieved.as_deref(), Some("5 days ago"));
	}

	#[test]
	fn test_time() {
		let time: Time = serde_json::from_value(json!({
			"timestamp": 1_700_000_000, "timezone": "America/New_York",
			"year": "2023", "month": "11", "day": "14", "hour": "17", "minute": "13", "second": "20",
		}))
		.unwrap();

		assert_eq!(time.year, 2023);
		assert_eq!(
			time.system_time().duration_since(UNIX_EPOCH).unwrap().as_secs(),
			1_700_000_000
		);
	}

	#[test]
	fn test_score_table_primary() {
		let table: ScoreTable = serde_json::from_value(json!({
			"id": "7", "name": "Main", "description": "", "primary": "1",
		}))
		.unwrap();
		assert!(table.primary);

		let score: Score = serde_json::from_value(json!({
			"score": "10 coins", "sort": "10", "extra_data": "", "user": "", "user_id": "",
			"guest": "bob", "stored": "now", "stored_timestamp": 5,
		}))
		.unwrap();
		assert_eq!(score.user_id, None);
		assert_eq!(score.guest, "bob");
	}

	#[test]
	fn test_rejects_garbage_numbers() {
		assert!(serde_json::from_value::<Rank>(json!({ "rank": "first" })).is_err());
	}
}
