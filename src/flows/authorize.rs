//! Authorization URL construction.
//!
//! [`Broker::authorize`] persists a fresh anti-forgery state (and, for proof-of-possession
//! platforms, a PKCE verifier) for the flow owner and returns the platform URL the end user
//! should be sent to. The platform itself is never contacted here.

// self
use crate::{
	_prelude::*,
	auth::{AuthorizationState, FlowOwner, PkcePair},
	flows::Broker,
	http::PlatformHttpClient,
	oauth::TransportErrorMapper,
	obs::FlowKind,
	store::RecordPhase,
};

impl<C, M> Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Starts a flow for `owner` and returns the platform authorization URL.
	///
	/// A second call for the same owner replaces the pending state of the first.
	pub async fn authorize(&self, owner: &FlowOwner) -> Result<Url> {
		self.observe(FlowKind::Authorize, async move {
			let state = AuthorizationState::generate(owner);
			let pkce = self.descriptor.requires_pkce().then(PkcePair::generate);
			let ttl = self.settings.record_ttl();
			let state_key = self.key(RecordPhase::State, owner);
			let write_state = self.store.put(&state_key, state.to_record(), ttl);

			match &pkce {
				Some(pair) => {
					let verifier_key = self.key(RecordPhase::Verifier, owner);

					futures::try_join!(
						write_state,
						self.store.put(&verifier_key, pair.verifier.clone(), ttl)
					)?;
				},
				None => write_state.await?,
			}

			Ok(self.authorization_url(&state, pkce.as_ref()))
		})
		.await
	}

	fn authorization_url(&self, state: &AuthorizationState, pkce: Option<&PkcePair>) -> Url {
		let mut url = self.descriptor.endpoints.authorization.clone();

		{
			let mut pairs = url.query_pairs_mut();

			pairs.append_pair("client_id", &self.credentials.client_id);
			pairs.append_pair("redirect_uri", self.redirect_uri.as_str());

			if !self.descriptor.scope.is_empty() {
				pairs.append_pair(
					"scope",
					&self.descriptor.scope.joined(self.descriptor.quirks.scope_delimiter),
				);
			}

			pairs.append_pair("response_type", "code");
			pairs.append_pair("state", &state.encode());

			if let Some(pkce) = pkce {
				pairs.append_pair("code_challenge", &pkce.challenge);
				pairs.append_pair("code_challenge_method", pkce.method.as_str());
			}

			for (name, value) in &self.descriptor.authorize_params {
				pairs.append_pair(name, value);
			}
		}

		url
	}
}
