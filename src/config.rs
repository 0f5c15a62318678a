use serde::Deserialize;
use std::{env, fmt::Display, str::FromStr};

use crate::{
	error::ConfigError,
	format::{BASE_URL, QueryValue, Queries},
};

/// The wire encoding requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ResponseFormat {
	/// JSON, the only format the built-in decoder understands.
	#[default]
	Json,
	/// `key:"value"` pairs, one per line.
	Keypair,
	/// The raw data, used by the data store.
	Dump,
	/// XML.
	Xml,
}

impl ResponseFormat {
	/// The value sent in the `format` parameter.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Json => "json",
			Self::Keypair => "keypair",
			Self::Dump => "dump",
			Self::Xml => "xml",
		}
	}
}

impl Display for ResponseFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ResponseFormat {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"json" => Ok(Self::Json),
			"keypair" => Ok(Self::Keypair),
			"dump" => Ok(Self::Dump),
			"xml" => Ok(Self::Xml),
			_ => Err(ConfigError::InvalidFormat(s.to_owned())),
		}
	}
}

impl TryFrom<String> for ResponseFormat {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// A version of the game API. Versions are ordered oldest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ApiVersion {
	/// `v1`
	V1,
	/// `v1_1`
	V1_1,
	/// `v1_2`, the latest version.
	#[default]
	V1_2,
}

impl ApiVersion {
	/// The path segment for this version.
	#[must_use]
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::V1 => "v1",
			Self::V1_1 => "v1_1",
			Self::V1_2 => "v1_2",
		}
	}
}

impl Display for ApiVersion {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ApiVersion {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"v1" => Ok(Self::V1),
			"v1_1" => Ok(Self::V1_1),
			"v1_2" => Ok(Self::V1_2),
			_ => Err(ConfigError::InvalidVersion(s.to_owned())),
		}
	}
}

impl TryFrom<String> for ApiVersion {
	type Error = ConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// The game's private key. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey(String);

impl PrivateKey {
	/// Wrap a private key.
	#[must_use]
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// The key itself, for signing.
	#[must_use]
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Debug for PrivateKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("PrivateKey(<redacted>)")
	}
}

impl From<&str> for PrivateKey {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for PrivateKey {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// Environment variable holding the private key.
pub const ENV_PRIVATE_KEY: &str = "GAMEJOLT_PRIVATE_KEY";
/// Environment variable holding the game id.
pub const ENV_GAME_ID: &str = "GAMEJOLT_GAME_ID";
/// Environment variable overriding the response format.
pub const ENV_FORMAT: &str = "GAMEJOLT_FORMAT";
/// Environment variable overriding the API version.
pub const ENV_API_VERSION: &str = "GAMEJOLT_API_VERSION";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "GAMEJOLT_BASE_URL";

/// Parameters derived from the configuration itself, never taken from the extra defaults.
const RESERVED_PARAMS: [&str; 2] = ["game_id", "format"];

fn default_base_url() -> String {
	BASE_URL.to_owned()
}

/// Everything a [`Requester`](crate::Requester) needs to sign and address requests.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	/// The game's private key.
	pub private_key: PrivateKey,
	/// The game id, numeric or not.
	pub game_id: QueryValue,
	/// The response format requested from the service.
	#[serde(default)]
	pub format: ResponseFormat,
	/// The API version to address.
	#[serde(default)]
	pub version: ApiVersion,
	/// The API root. Must end with a slash.
	#[serde(default = "default_base_url")]
	pub base_url: String,
	/// Extra parameters sent with every request.
	#[serde(default)]
	pub defaults: Queries,
}

impl Config {
	/// A configuration with the default format, version and base URL.
	#[must_use]
	pub fn new(private_key: impl Into<PrivateKey>, game_id: impl Into<QueryValue>) -> Self {
		Self {
			private_key: private_key.into(),
			game_id: game_id.into(),
			format: ResponseFormat::default(),
			version: ApiVersion::default(),
			base_url: default_base_url(),
			defaults: Queries::new(),
		}
	}

	/// Read the configuration from `GAMEJOLT_*` environment variables.
	///
	/// # Errors
	///
	/// - If the private key or game id is not set.
	/// - If the format or version is set to an unknown value.
	pub fn from_env() -> Result<Self, ConfigError> {
		let private_key = env::var(ENV_PRIVATE_KEY).map_err(|_| ConfigError::MissingEnv(ENV_PRIVATE_KEY))?;
		let game_id = env::var(ENV_GAME_ID).map_err(|_| ConfigError::MissingEnv(ENV_GAME_ID))?;

		let game_id = game_id
			.parse::<u64>()
			.map_or_else(|_| QueryValue::Str(game_id), QueryValue::UInt);

		let mut config = Self::new(private_key, game_id);

		if let Ok(format) = env::var(ENV_FORMAT) {
			config.format = format.parse()?;
		}
		if let Ok(version) = env::var(ENV_API_VERSION) {
			config.version = version.parse()?;
		}
		if let Ok(base_url) = env::var(ENV_BASE_URL) {
			config.base_url = base_url;
		}

		Ok(config)
	}

	/// Set the response format.
	#[must_use]
	pub fn format(mut self, format: ResponseFormat) -> Self {
		self.format = format;
		self
	}

	/// Set the API version.
	#[must_use]
	pub fn version(mut self, version: ApiVersion) -> Self {
		self.version = version;
		self
	}

	/// Set the API root.
	#[must_use]
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Add a parameter sent with every request.
	///
	/// `game_id` and `format` are rejected when the requester is built; use
	/// [`Config::new`] and [`Config::format`] for those.
	#[must_use]
	pub fn default_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.defaults.insert(key, value);
		self
	}

	/// Check that the extra defaults leave `game_id` and `format` alone.
	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		match RESERVED_PARAMS.into_iter().find(|key| self.defaults.get(key).is_some()) {
			Some(key) => Err(ConfigError::ReservedDefault(key)),
			None => Ok(()),
		}
	}

	/// The parameters every request starts from: `game_id`, `format`, then the extra defaults.
	pub(crate) fn default_queries(&self) -> Queries {
		Queries::new()
			.with("game_id", self.game_id.clone())
			.with("format", self.format.as_str())
			.merged(self.defaults.clone())
	}
}
