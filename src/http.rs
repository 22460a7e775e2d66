//! Transport primitives for token exchanges and data API calls.
//!
//! The broker only depends on [`PlatformHttpClient`], which hands out `oauth2`
//! [`AsyncHttpClient`] handles. Custom stacks plug in by implementing the trait and pairing
//! it with a [`TransportErrorMapper`](crate::oauth::TransportErrorMapper).

// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Abstraction over HTTP transports used for every outbound platform request.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared across
/// brokers, and the handles they return must own whatever state their request futures need
/// so those futures stay `Send`.
pub trait PlatformHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle issued per request.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a handle for one outbound request.
	fn handle(&self) -> Self::Handle;
}

/// reqwest-backed [`PlatformHttpClient`].
///
/// Platform endpoints answer directly, so redirects are never followed. Configure any custom
/// [`ReqwestClient`] the same way, and give it a request timeout; requests without one can
/// hang on an unresponsive platform.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that gives up on any request after `timeout`.
	pub fn with_timeout(timeout: std::time::Duration) -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.timeout(timeout)
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}

	/// Underlying reqwest client.
	pub fn client(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
#[cfg(feature = "reqwest")]
impl PlatformHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}
}

/// [`AsyncHttpClient`] adapter returned by [`ReqwestHttpClient`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
