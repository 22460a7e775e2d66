//! Flow orchestrators: one generic broker parameterized by a platform descriptor.
//!
//! Every public operation is stateless inside the process. Cross-request coordination goes
//! through the injected [`EphemeralStore`], so any number of broker instances can serve the
//! same flows.

mod authorize;
mod callback;
mod common;
mod credentials;
mod items;

pub use callback::*;

// self
use crate::{
	_prelude::*,
	auth::FlowOwner,
	config::{BrokerSettings, ClientCredentials},
	http::PlatformHttpClient,
	oauth::TransportErrorMapper,
	platform::PlatformDescriptor,
	store::{EphemeralStore, RecordPhase, StoreKey},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport stack.
pub type ReqwestBroker = Broker<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs the authorization, callback, credential hand-off, and item listing flows for one
/// platform.
///
/// The broker holds the transport, the shared store, the platform descriptor, and the client
/// registration so each flow only carries its own request-specific inputs.
#[derive(Clone)]
pub struct Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound platform request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Shared ephemeral store holding state, verifier, and credential records.
	pub store: Arc<dyn EphemeralStore>,
	/// Platform descriptor that defines endpoints and quirks.
	pub descriptor: PlatformDescriptor,
	/// OAuth client registration for the platform.
	pub credentials: ClientCredentials,
	/// Record lifetime, timeout, and redirect settings.
	pub settings: BrokerSettings,
	/// Callback URI registered with the platform.
	pub redirect_uri: Url,
}
impl<C, M> Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a broker that reuses the caller-provided transport and mapper pair.
	///
	/// The callback URI is derived from [`BrokerSettings::redirect_uri`].
	pub fn with_http_client(
		store: Arc<dyn EphemeralStore>,
		descriptor: PlatformDescriptor,
		credentials: ClientCredentials,
		settings: BrokerSettings,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let redirect_uri = settings.redirect_uri(&descriptor.id)?;

		Ok(Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			store,
			descriptor,
			credentials,
			settings,
			redirect_uri,
		})
	}

	/// Replaces the callback URI, e.g. when the platform registration uses a custom path.
	pub fn with_redirect_uri(mut self, redirect_uri: Url) -> Self {
		self.redirect_uri = redirect_uri;

		self
	}

	pub(crate) fn key(&self, phase: RecordPhase, owner: &FlowOwner) -> StoreKey {
		StoreKey::new(&self.descriptor.id, phase, owner)
	}
}
#[cfg(feature = "reqwest")]
impl Broker<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a broker with its own reqwest transport bounded by
	/// [`BrokerSettings::request_timeout`].
	pub fn new(
		store: Arc<dyn EphemeralStore>,
		descriptor: PlatformDescriptor,
		credentials: ClientCredentials,
		settings: BrokerSettings,
	) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(settings.request_timeout())?;

		Self::with_http_client(
			store,
			descriptor,
			credentials,
			settings,
			http_client,
			ReqwestTransportErrorMapper,
		)
	}
}
impl<C, M> Debug for Broker<C, M>
where
	C: ?Sized + PlatformHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker")
			.field("platform", &self.descriptor.id)
			.field("credentials", &self.credentials)
			.field("settings", &self.settings)
			.field("redirect_uri", &self.redirect_uri.as_str())
			.finish()
	}
}
