use crate::{
	ApiVersion, Config, Response,
	components::{DataStore, Friends, Scores, Sessions, Time, Trophies, Users},
	endpoints::{Bound, Category, Endpoint, UrlBuilder},
	error::{ApiError, ConfigError, Error, Result, UsageError},
	format::{Formatter, Queries},
	sign,
	transport::{Decoder, JsonDecoder, Transport},
};

/// A configured, signing client for the game API.
///
/// The requester owns the private key and the default parameters, signs every URL
/// it builds, and hands the network exchange to its [`Transport`] and the body to
/// its [`Decoder`]. It holds no per-call state.
pub struct Requester<T, D = JsonDecoder> {
	formatter: Formatter,
	private_key: crate::PrivateKey,
	transport: T,
	decoder: D,
}

impl<T: Transport> Requester<T> {
	/// Create a requester decoding JSON responses.
	///
	/// # Errors
	///
	/// See [`Requester::with_decoder`].
	pub fn new(config: Config, transport: T) -> Result<Self> {
		Self::with_decoder(config, transport, JsonDecoder)
	}
}

impl<T: Transport, D: Decoder> Requester<T, D> {
	/// Create a requester with a custom response decoder.
	///
	/// # Errors
	///
	/// - If the base URL does not parse.
	/// - If the private key is not ASCII.
	/// - If the extra defaults set `game_id` or `format`.
	pub fn with_decoder(config: Config, transport: T, decoder: D) -> Result<Self> {
		config.validate()?;

		url::Url::parse(&config.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
			url: config.base_url.clone(),
			source,
		})?;

		if !config.private_key.expose().is_ascii() {
			return Err(ConfigError::NonAsciiKey.into());
		}

		tracing::debug!(
			version = %config.version,
			format = %config.format,
			base_url = %config.base_url,
			"configured requester"
		);

		Ok(Self {
			formatter: Formatter::new(config.base_url.clone(), config.version, config.default_queries()),
			private_key: config.private_key,
			transport,
			decoder,
		})
	}

	/// The configured API version.
	#[must_use]
	pub const fn api_version(&self) -> ApiVersion {
		self.formatter.version()
	}

	/// The unsigned URL formatter.
	#[must_use]
	pub const fn formatter(&self) -> &Formatter {
		&self.formatter
	}

	/// The signature of `url` under this requester's key.
	#[must_use]
	pub fn generate_signature(&self, url: &str) -> String {
		sign::signature(url, self.private_key.expose())
	}

	/// Append the signature to an already query-formatted URL.
	#[must_use]
	pub fn format_signature(&self, url: &str) -> String {
		sign::format_signature(url, self.private_key.expose())
	}

	/// Format and sign the URL for an endpoint path.
	#[must_use]
	pub fn format(&self, endpoint: &str, queries: impl Into<Queries>) -> String {
		self.format_signature(&self.formatter.format(endpoint, queries.into()))
	}

	/// Bind an endpoint to this requester.
	#[must_use]
	pub const fn endpoint(&self, endpoint: Endpoint) -> Bound<'_, Self> {
		Bound::new(self, endpoint)
	}

	/// Bind an endpoint by its category and operation names.
	///
	/// # Errors
	///
	/// If either name is unknown.
	pub fn resolve(&self, category: &str, operation: &str) -> Result<Bound<'_, Self>> {
		Ok(self.endpoint(Category::named(category)?.operation(operation)?))
	}

	/// Fail unless the configured version is at least `required`.
	///
	/// # Errors
	///
	/// [`UsageError::VersionMismatch`] when the configured version is older.
	pub fn require_version(&self, required: ApiVersion, operation: &'static str) -> Result<()> {
		let configured = self.api_version();

		if configured < required {
			return Err(UsageError::VersionMismatch {
				operation,
				required,
				configured,
			}
			.into());
		}

		Ok(())
	}

	/// Send a signed URL and decode the reply.
	///
	/// # Errors
	///
	/// - If the transport fails.
	/// - If the body cannot be decoded.
	/// - If the service reports a failure ([`Error::Api`]).
	pub async fn post(&self, url: &str) -> Result<Response> {
		tracing::trace!(url, "sending request");

		let body = self
			.transport
			.post(url)
			.await
			.map_err(|e| Error::Transport(Box::new(e)))?;

		tracing::debug!(length = body.len(), "received response body");

		let response = self
			.decoder
			.decode(&body)
			.map_err(|e| Error::Decode(Box::new(e)))?;

		tracing::debug!(success = response.success, "decoded response");

		if !response.success {
			tracing::debug!(message = ?response.message, "request failed");
			return Err(ApiError { response }.into());
		}

		Ok(response)
	}

	/// User lookups and authentication.
	#[must_use]
	pub const fn users(&self) -> Users<'_, T, D> {
		Users::new(self)
	}

	/// Session management.
	#[must_use]
	pub const fn sessions(&self) -> Sessions<'_, T, D> {
		Sessions::new(self)
	}

	/// Trophies.
	#[must_use]
	pub const fn trophies(&self) -> Trophies<'_, T, D> {
		Trophies::new(self)
	}

	/// The key-value data store.
	#[must_use]
	pub const fn data_store(&self) -> DataStore<'_, T, D> {
		DataStore::new(self)
	}

	/// Friend lists.
	#[must_use]
	pub const fn friends(&self) -> Friends<'_, T, D> {
		Friends::new(self)
	}

	/// Server time.
	#[must_use]
	pub const fn time(&self) -> Time<'_, T, D> {
		Time::new(self)
	}

	/// Scoreboards.
	#[must_use]
	pub const fn scores(&self) -> Scores<'_, T, D> {
		Scores::new(self)
	}
}

impl<T: Transport, D: Decoder> UrlBuilder for Requester<T, D> {
	fn build_url(&self, endpoint: &str, queries: Queries) -> String {
		self.format(endpoint, queries)
	}
}

impl<T: Transport, D: Decoder> Bound<'_, Requester<T, D>> {
	/// Sign the URL for this endpoint with `queries` and send it.
	///
	/// # Errors
	///
	/// See [`Requester::post`].
	pub async fn post(&self, queries: impl Into<Queries>) -> Result<Response> {
		tracing::debug!(endpoint = %self.endpoint, "calling endpoint");

		self.builder.post(&self.url(queries)).await
	}
}

impl<T, D> std::fmt::Debug for Requester<T, D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Requester")
			.field("formatter", &self.formatter)
			.field("private_key", &self.private_key)
			.finish_non_exhaustive()
	}
}
