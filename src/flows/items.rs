//! Item listing against the platform data API.

// crates.io
use oauth2::{
	HttpRequest,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
// self
use crate::{
	_prelude::*,
	auth::CredentialPayload,
	error::ConfigError,
	flows::{
		Broker,
		common::{self, PLATFORM_API},
	},
	http::PlatformHttpClient,
	items::{ApiFuture, ApiSession, IntegrationItem},
	obs::FlowKind,
	oauth::TransportErrorMapper,
	platform::PlatformDescriptor,
};

const JSON: &str = "application/json";

impl<C, M> Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Lists the platform resources reachable with `credentials`.
	///
	/// Sub-requests run concurrently and are joined; the first failure fails the call, so a
	/// partial listing is never returned.
	pub async fn fetch_items(
		&self,
		credentials: &CredentialPayload,
	) -> Result<Vec<IntegrationItem>> {
		self.observe(FlowKind::Items, async move {
			let access_token = credentials.access_token().ok_or(Error::InvalidCredentials)?;
			let session = BrokerSession { broker: self, access_token };

			self.descriptor.catalog.fetch(&session).await
		})
		.await
	}
}

struct BrokerSession<'b, C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	broker: &'b Broker<C, M>,
	access_token: &'b str,
}
impl<C, M> BrokerSession<'_, C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn request(&self, method: Method, url: &Url, body: Option<&JsonValue>) -> Result<HttpRequest> {
		let mut builder = Request::builder()
			.method(method)
			.uri(url.as_str())
			.header(ACCEPT, HeaderValue::from_static(JSON))
			.header(AUTHORIZATION, format!("Bearer {}", self.access_token));

		for (name, value) in &self.broker.descriptor.api_headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		let body = match body {
			Some(body) => {
				builder = builder.header(CONTENT_TYPE, JSON);

				serde_json::to_vec(body).map_err(ConfigError::from)?
			},
			None => Vec::new(),
		};

		builder.body(body).map_err(|e| ConfigError::from(e).into())
	}
}
impl<C, M> ApiSession for BrokerSession<'_, C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn descriptor(&self) -> &PlatformDescriptor {
		&self.broker.descriptor
	}

	fn call<'a>(&'a self, method: Method, url: Url, body: Option<JsonValue>) -> ApiFuture<'a> {
		Box::pin(async move {
			let request = self.request(method, &url, body.as_ref())?;
			let response = self.broker.send(PLATFORM_API, request).await?;

			if !response.status().is_success() {
				return Err(Error::ApiRejected {
					status: response.status().as_u16(),
					body: common::body_text(&response),
				});
			}

			common::json_body(&response)
		})
	}
}
