//! Token endpoint requests and transport error mapping.
//!
//! Platforms disagree on how the authorization-code exchange is encoded (form vs. JSON body,
//! Basic header vs. body credentials), so requests are assembled here from the descriptor and
//! dispatched through any [`PlatformHttpClient`](crate::http::PlatformHttpClient) handle.

pub use oauth2;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	HttpClientError, HttpRequest,
	http::{
		HeaderValue, Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	config::ClientCredentials,
	error::{ConfigError, TransportError},
	platform::{ClientAuthMethod, PlatformDescriptor, TokenRequestFormat},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Maps HTTP transport failures into broker [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted while calling `target` into a broker error.
	fn map_transport_error(&self, target: &'static str, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		target: &'static str,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(target, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TransportError::Other { message }.into(),
			_ => TransportError::Other { message: format!("unclassified failure calling {target}") }
				.into(),
		}
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(target: &'static str, err: ReqwestError) -> Error {
	if err.is_timeout() {
		return TransportError::Timeout { target }.into();
	}
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::network(target, err).into()
}

/// Inputs of one authorization-code exchange.
#[derive(Clone, Copy)]
pub(crate) struct CodeExchange<'a> {
	pub(crate) code: &'a str,
	pub(crate) redirect_uri: &'a Url,
	pub(crate) code_verifier: Option<&'a str>,
}
impl Debug for CodeExchange<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CodeExchange")
			.field("redirect_uri", &self.redirect_uri.as_str())
			.field("code_verifier_set", &self.code_verifier.is_some())
			.finish()
	}
}

/// Builds the token endpoint request for `exchange` according to the descriptor's client
/// authentication method and body format.
pub(crate) fn authorization_code_request(
	descriptor: &PlatformDescriptor,
	credentials: &ClientCredentials,
	exchange: CodeExchange<'_>,
) -> Result<HttpRequest> {
	let secret = credentials.client_secret.as_deref().ok_or_else(|| {
		ConfigError::MissingClientSecret { platform: descriptor.id.to_string() }
	})?;
	let mut params = vec![
		("grant_type", "authorization_code"),
		("code", exchange.code),
		("redirect_uri", exchange.redirect_uri.as_str()),
	];

	if let Some(verifier) = exchange.code_verifier {
		params.push(("code_verifier", verifier));
	}

	let mut builder = Request::builder()
		.method(Method::POST)
		.uri(descriptor.endpoints.token.as_str())
		.header(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));

	match descriptor.preferred_client_auth_method {
		ClientAuthMethod::ClientSecretBasic => {
			let basic = STANDARD.encode(format!("{}:{secret}", credentials.client_id));

			builder = builder.header(AUTHORIZATION, format!("Basic {basic}"));
		},
		ClientAuthMethod::ClientSecretPost => {
			params.push(("client_id", credentials.client_id.as_str()));
			params.push(("client_secret", secret));
		},
	}

	let (content_type, body) = match descriptor.quirks.token_request_format {
		TokenRequestFormat::Form => {
			let body = Serializer::new(String::new()).extend_pairs(params).finish();

			(FORM_CONTENT_TYPE, body.into_bytes())
		},
		TokenRequestFormat::Json => {
			let body = params
				.into_iter()
				.map(|(key, value)| (key.to_owned(), JsonValue::String(value.to_owned())))
				.collect::<JsonMap<_, _>>();

			(JSON_CONTENT_TYPE, serde_json::to_vec(&body).map_err(ConfigError::from)?)
		},
	};

	builder.header(CONTENT_TYPE, content_type).body(body).map_err(|e| ConfigError::from(e).into())
}
