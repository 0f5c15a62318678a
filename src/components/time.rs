use crate::{
	ApiVersion, Requester,
	endpoints::{Endpoint, Time as Op},
	error::Result,
	models,
	transport::{Decoder, Transport},
};

/// The service's clock.
pub struct Time<'a, T, D> {
	requester: &'a Requester<T, D>,
}

impl<'a, T: Transport, D: Decoder> Time<'a, T, D> {
	pub(crate) const fn new(requester: &'a Requester<T, D>) -> Self {
		Self { requester }
	}

	/// The service's current time. Requires `v1_2`.
	///
	/// # Errors
	///
	/// - If the API version is older than `v1_2`.
	/// - If the request fails.
	pub async fn fetch(&self) -> Result<models::Time> {
		self.requester.require_version(ApiVersion::V1_2, "fetch")?;

		self.requester
			.endpoint(Endpoint::Time(Op::Fetch))
			.post(crate::Queries::new())
			.await?
			.payload()
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
			r#"{"response":{"success":"true","timestamp":1700000000,"timezone":"America/New_York",
			"year":2023,"month":11,"day":14,"hour":17,"minute":13,"second":20}}"#,
		);
		let requester = requester(Config::new("k", 1), &transport);

		let time = tokio_test::block_on(requester.time().fetch()).unwrap();

		assert_eq!(time.timestamp, 1_700_000_000);
		assert_eq!(time.timezone, "America/New_York");
		assert_eq!(transport.last_path(), "/api/game/v1_2/time");
	}

	#[test]
	fn test_version_gated() {
		let transport = StubTransport::default();
		let requester = requester(Config::new("k", 1).version(ApiVersion::V1), &transport);

		assert!(matches!(
			tokio_test::block_on(requester.time().fetch()),
			Err(Error::Usage(UsageError::VersionMismatch { required: ApiVersion::V1_2, .. }))
		));
		assert_eq!(transport.calls(), 0);
	}
}
