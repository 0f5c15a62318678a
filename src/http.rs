use hyper::{
	Body, Client, Method, Request, Uri,
	client::HttpConnector,
	http::{self, uri::InvalidUri},
};
use hyper_rustls::{ConfigBuilderExt, HttpsConnector};

use crate::transport::Transport;

/// A HTTPS client with the webpki root store.
pub type HttpClient = Client<HttpsConnector<HttpConnector>>;

#[must_use]
/// Creates an HTTPS client for the game API.
///
/// TLS is handled by rustls using the webpki root store, with no client
/// authentication. SNI and hostname verification are derived from the request URI.
pub fn client() -> HttpClient {
	let cc = rustls::ClientConfig::builder()
		.with_webpki_roots()
		.with_no_client_auth();

	let mut http = HttpConnector::new();
	http.enforce_http(false);

	Client::builder().build(HttpsConnector::from((http, cc)))
}

/// Errors that can occur when sending a request over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
	/// The signed URL is not a valid URI.
	#[error("invalid URI: {0}")]
	Uri(#[from] InvalidUri),
	/// The request could not be built.
	#[error("failed to build request: {0}")]
	Request(#[from] http::Error),
	/// The exchange failed.
	#[error("request failed: {0}")]
	Hyper(#[from] hyper::Error),
}

/// A [`Transport`] that POSTs to the signed URL with an empty body.
///
/// Example usage:
/// ```rust,ignore
/// use gamejolt::{Config, Requester, http::HttpTransport};
///
/// let requester = Requester::new(Config::from_env()?, HttpTransport::new())?;
/// let time = requester.time().fetch().await?;
/// println!("{} in {}", time.timestamp, time.timezone);
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: HttpClient,
}

impl HttpTransport {
	/// Create a transport with a fresh [`client`].
	#[must_use]
	pub fn new() -> Self {
		Self::with_client(client())
	}

	/// Create a transport reusing an existing client.
	#[must_use]
	pub const fn with_client(client: HttpClient) -> Self {
		Self { client }
	}
}

impl Default for HttpTransport {
	fn default() -> Self {
		Self::new()
	}
}

impl Transport for HttpTransport {
	type Error = HttpError;

	async fn post(&self, url: &str) -> Result<Vec<u8>, HttpError> {
		let uri: Uri = url.parse()?;

		let request = Request::builder()
			.method(Method::POST)
			.uri(uri)
			.body(Body::empty())?;

		let response = self.client.request(request).await?;

		tracing::debug!(status = %response.status(), "received HTTP response");

		let body = hyper::body::to_bytes(response.into_body()).await?;

		Ok(body.to_vec())
	}
}
