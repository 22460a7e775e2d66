//! Callback validation and authorization-code exchange.
//!
//! The handler walks a fixed sequence: reject platform-reported errors without touching the
//! store, require `code` and `state`, decode the state, match its nonce against the stored
//! one (and load the verifier for PKCE platforms), then exchange the code while the consumed
//! records are deleted concurrently. The raw token response is parked under the owner's
//! credential key for a single later retrieval.

// crates.io
use url::form_urlencoded;
// self
use crate::{
	_prelude::*,
	auth::{AuthorizationState, CredentialPayload},
	flows::{
		Broker,
		common::{self, TOKEN_ENDPOINT},
	},
	http::PlatformHttpClient,
	oauth::{self, CodeExchange, TransportErrorMapper},
	obs::{self, FlowKind},
	store::{RecordPhase, StoreError},
};

const CLOSE_WINDOW_HTML: &str = "<html>\n\t<script>\n\t\twindow.close();\n\t</script>\n</html>\n";

/// Query parameters delivered by the platform redirect.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
	/// Authorization code.
	pub code: Option<String>,
	/// Encoded state token issued by [`Broker::authorize`].
	pub state: Option<String>,
	/// Error indicator set when the user declined or the grant failed.
	pub error: Option<String>,
	/// Human-readable detail accompanying `error`.
	pub error_description: Option<String>,
}
impl CallbackParams {
	/// Parses a raw query string (without the leading `?`).
	///
	/// Empty values count as absent; unknown parameters are ignored.
	pub fn from_query(query: &str) -> Self {
		let mut params = Self::default();

		for (name, value) in form_urlencoded::parse(query.as_bytes()) {
			let slot = match name.as_ref() {
				"code" => &mut params.code,
				"state" => &mut params.state,
				"error" => &mut params.error,
				"error_description" => &mut params.error_description,
				_ => continue,
			};

			if !value.is_empty() && slot.is_none() {
				*slot = Some(value.into_owned());
			}
		}

		params
	}
}
impl Debug for CallbackParams {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CallbackParams")
			.field("code_set", &self.code.is_some())
			.field("state_set", &self.state.is_some())
			.field("error", &self.error)
			.field("error_description", &self.error_description)
			.finish()
	}
}

/// Response returned to the popup window once credentials are parked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallbackCompletion;
impl CallbackCompletion {
	/// Content type of [`CallbackCompletion::body`].
	pub const CONTENT_TYPE: &'static str = "text/html; charset=utf-8";

	/// Page that closes the window it is rendered in.
	pub fn body(&self) -> &'static str {
		CLOSE_WINDOW_HTML
	}
}

impl<C, M> Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates a platform redirect, exchanges its code, and parks the credential payload.
	pub async fn handle_callback(&self, params: CallbackParams) -> Result<CallbackCompletion> {
		self.observe(FlowKind::Callback, self.complete_callback(params)).await
	}

	async fn complete_callback(&self, params: CallbackParams) -> Result<CallbackCompletion> {
		if let Some(error) = params.error {
			return Err(Error::PlatformDenied {
				description: params.error_description.unwrap_or(error),
			});
		}

		let code = params.code.ok_or(Error::MissingCallbackParameter { name: "code" })?;
		let token = params.state.ok_or(Error::MissingCallbackParameter { name: "state" })?;
		let presented = AuthorizationState::decode(&token)?;
		let owner = presented.owner();
		let state_key = self.key(RecordPhase::State, &owner);
		let verifier_key = self.key(RecordPhase::Verifier, &owner);
		let pkce = self.descriptor.requires_pkce();
		let (stored, verifier) = if pkce {
			futures::try_join!(self.store.get(&state_key), self.store.get(&verifier_key))?
		} else {
			(self.store.get(&state_key).await?, None)
		};
		let state_matches = stored
			.and_then(|raw| AuthorizationState::from_record(&raw).ok())
			.is_some_and(|stored| presented.matches(&stored));

		if !state_matches {
			return Err(Error::StateMismatch);
		}

		let verifier = if pkce { Some(verifier.ok_or(Error::MissingVerifier)?) } else { None };

		obs::record_stage("validated");

		let request = oauth::authorization_code_request(
			&self.descriptor,
			&self.credentials,
			CodeExchange {
				code: &code,
				redirect_uri: &self.redirect_uri,
				code_verifier: verifier.as_deref(),
			},
		)?;
		let cleanup = async {
			if pkce {
				futures::try_join!(self.store.delete(&state_key), self.store.delete(&verifier_key))
					.map(|_| ())
			} else {
				self.store.delete(&state_key).await
			}
		};
		let (exchange, cleanup): (Result<_>, Result<(), StoreError>) =
			futures::join!(self.send(TOKEN_ENDPOINT, request), cleanup);
		let response = exchange?;

		if !response.status().is_success() {
			return Err(Error::ExchangeRejected {
				status: response.status().as_u16(),
				body: common::body_text(&response),
			});
		}

		cleanup?;

		obs::record_stage("exchanged");

		let body = String::from_utf8(response.into_body()).map_err(Error::malformed_response)?;

		CredentialPayload::parse(&body)?;

		self.store
			.put(&self.key(RecordPhase::Credentials, &owner), body, self.settings.record_ttl())
			.await?;

		obs::record_stage("credential_stored");

		#[cfg(feature = "tracing")]
		tracing::debug!(owner = %owner, "credentials parked");

		Ok(CallbackCompletion)
	}
}
