use std::fmt::Display;

use crate::{ApiVersion, Response, User};

/// A boxed error coming from an injected collaborator (transport or decoder).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A specialized [`Result`](std::result::Result) for this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the requester and the entity components.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The requester could not be configured.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// An operation was invoked with an unmet precondition. Raised before any I/O.
	#[error(transparent)]
	Usage(#[from] UsageError),
	/// The remote service reported a failure.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// A trophy operation failed for a known reason.
	#[error(transparent)]
	Trophy(#[from] TrophyError),
	/// The transport failed to perform the request.
	#[error("transport failed: {0}")]
	Transport(#[source] BoxError),
	/// The response body could not be decoded.
	#[error("decoding failed: {0}")]
	Decode(#[source] BoxError),
	/// A successful response lacked a field or item the operation returns.
	#[error("response has no {0:?}")]
	UnexpectedResponse(&'static str),
}

impl Error {
	/// The decoded response attached to a remote failure, if any.
	#[must_use]
	pub const fn response(&self) -> Option<&Response> {
		match self {
			Self::Api(e) => Some(&e.response),
			Self::Trophy(e) => Some(&e.response),
			_ => None,
		}
	}
}

/// Errors raised while building a requester configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The response format is not one of the formats the service supports.
	#[error("invalid response format: {0}. Supported formats are: json, keypair, dump, xml")]
	InvalidFormat(String),
	/// The API version token is unknown.
	#[error("invalid API version: {0}. Supported versions are: v1, v1_1, v1_2")]
	InvalidVersion(String),
	/// The base URL does not parse.
	#[error("invalid base URL {url:?}: {source}")]
	InvalidBaseUrl {
		/// The rejected URL.
		url: String,
		/// Why it was rejected.
		source: url::ParseError,
	},
	/// The private key contains non-ASCII bytes and cannot be signed with.
	#[error("the private key must be ASCII")]
	NonAsciiKey,
	/// A required environment variable is not set.
	#[error("missing environment variable {0}")]
	MissingEnv(&'static str),
	/// An extra default parameter would replace one the configuration owns.
	#[error("{0:?} cannot be an extra default parameter, set it on the configuration")]
	ReservedDefault(&'static str),
}

/// Errors raised when a call precondition is not met.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
	/// The configured API version predates the operation.
	#[error(
		"API version mismatch: {operation}() is only supported at API version {required}, configured {configured}"
	)]
	VersionMismatch {
		/// The gated operation.
		operation: &'static str,
		/// The minimum version it needs.
		required: ApiVersion,
		/// The version the requester was built with.
		configured: ApiVersion,
	},
	/// The operation needs a user session token and none was set.
	#[error("{operation}() requires a user token")]
	MissingToken {
		/// The gated operation.
		operation: &'static str,
	},
	/// No endpoint category has this name.
	#[error("unknown endpoint category {0:?}")]
	UnknownCategory(String),
	/// The category has no operation with this name.
	#[error("endpoint category {category} has no operation {operation:?}")]
	UnknownOperation {
		/// The category that was searched.
		category: &'static str,
		/// The missing operation name.
		operation: String,
	},
}

/// The remote service answered with `success = false`.
#[derive(Debug, thiserror::Error)]
#[error("{}", .response.message.as_deref().unwrap_or("request failed without a message"))]
pub struct ApiError {
	/// The full decoded response.
	pub response: Response,
}

impl ApiError {
	/// The human-readable reason reported by the service.
	#[must_use]
	pub fn message(&self) -> Option<&str> {
		self.response.message.as_deref()
	}
}

/// Known reasons for a trophy operation to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrophyErrorKind {
	/// The user already has the trophy.
	AlreadyAchieved,
	/// The trophy id is wrong or belongs to another game.
	IncorrectId,
	/// The user has not achieved the trophy.
	NotAchieved,
}

/// Remote messages and the trophy failure they stand for.
///
/// Matching is on the exact text the service sends. This is best-effort: if the
/// service rewords a message, the failure surfaces as a plain [`ApiError`].
const TROPHY_MESSAGES: &[(&str, TrophyErrorKind)] = &[
	(
		"The user already has this trophy.",
		TrophyErrorKind::AlreadyAchieved,
	),
	("Incorrect trophy ID.", TrophyErrorKind::IncorrectId),
	(
		"The user does not have this trophy.",
		TrophyErrorKind::NotAchieved,
	),
];

impl TrophyErrorKind {
	/// Map a remote failure message onto a known trophy failure.
	#[must_use]
	pub fn from_message(message: &str) -> Option<Self> {
		TROPHY_MESSAGES
			.iter()
			.find(|(text, _)| *text == message)
			.map(|(_, kind)| *kind)
	}
}

impl Display for TrophyErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::AlreadyAchieved => write!(f, "already has trophy"),
			Self::IncorrectId => write!(f, "incorrect trophy id"),
			Self::NotAchieved => write!(f, "has not achieved trophy"),
		}
	}
}

/// A trophy operation failed for a reason recognised from the remote message.
#[derive(Debug, thiserror::Error)]
#[error("trophy {trophy_id} for user {}: {kind}", .user.username)]
pub struct TrophyError {
	/// Why the operation failed.
	pub kind: TrophyErrorKind,
	/// The trophy the operation targeted.
	pub trophy_id: u64,
	/// The user the operation targeted, without their token.
	pub user: User,
	/// The full decoded response.
	pub response: Response,
}

impl TrophyError {
	/// Refine a generic API failure. Returns the original error when the message is not recognised.
	#[must_use]
	pub fn refine(error: Error, trophy_id: u64, user: &User) -> Error {
		let api = match error {
			Error::Api(api) => api,
			other => return other,
		};

		match api.message().and_then(TrophyErrorKind::from_message) {
			Some(kind) => Error::Trophy(Self {
				kind,
				trophy_id,
				user: User {
					token: None,
					..user.clone()
				},
				response: api.response,
			}),
			None => Error::Api(api),
		}
	}
}
