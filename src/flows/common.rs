//! Shared helpers for flow implementations (dispatch, body decoding, instrumentation).

// crates.io
use oauth2::{AsyncHttpClient, HttpRequest, HttpResponse};
// self
use crate::{
	_prelude::*,
	flows::Broker,
	http::PlatformHttpClient,
	oauth::TransportErrorMapper,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

pub(crate) const TOKEN_ENDPOINT: &str = "token endpoint";
pub(crate) const PLATFORM_API: &str = "platform API";

impl<C, M> Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `request` through a fresh transport handle, classifying transport failures.
	pub(crate) async fn send(
		&self,
		target: &'static str,
		request: HttpRequest,
	) -> Result<HttpResponse> {
		let handle = self.http_client.handle();

		handle
			.call(request)
			.await
			.map_err(|err| self.transport_mapper.map_transport_error(target, err))
	}

	/// Runs `flow` inside a span and records attempt/outcome counters for it.
	pub(crate) async fn observe<T, F>(&self, kind: FlowKind, flow: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		let platform = &self.descriptor.id;
		let span = FlowSpan::new(kind, platform);

		obs::record_flow_outcome(kind, platform, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let result = flow.await;

				if let Err(err) = &result {
					obs::warn_rejected(err);
				}

				result
			})
			.await;

		obs::record_flow_outcome(kind, platform, FlowOutcome::of(&result));

		result
	}
}

/// Lossy text view of a response body for error reports.
pub(crate) fn body_text(response: &HttpResponse) -> String {
	String::from_utf8_lossy(response.body()).into_owned()
}

/// Decodes a successful response body as JSON.
pub(crate) fn json_body(response: &HttpResponse) -> Result<JsonValue> {
	serde_json::from_slice(response.body()).map_err(Error::malformed_response)
}
