#![deny(
	clippy::all,
	clippy::pedantic,
	clippy::nursery,
	missing_docs,
	dead_code
)]
#![doc = include_str!("../README.md")]

/// The endpoint registry and bound endpoints.
pub mod endpoints;
pub use endpoints::{Category, Endpoint};

/// URL and query-string formatting.
pub mod format;
pub use format::{Formatter, QueryValue, Queries};

/// Request signatures.
pub mod sign;

/// Requester configuration.
pub mod config;
pub use config::{ApiVersion, Config, PrivateKey, ResponseFormat};

/// Error types.
pub mod error;
pub use error::{ApiError, ConfigError, Error, Result, TrophyError, TrophyErrorKind, UsageError};

mod response;
pub use response::Response;

/// The transport and decoder seams.
pub mod transport;
pub use transport::{Decoder, JsonDecoder, Transport};

mod requester;
pub use requester::Requester;

/// Typed records returned by the service.
pub mod models;
pub use models::{Score, ScoreTable, Trophy, User};

/// Entity components reached from a [`Requester`].
pub mod components;

/// HTTPS transport.
#[cfg(feature = "http")]
pub mod http;

#[cfg(test)]
mod testing;
