//! One-time credential hand-off.

// self
use crate::{
	_prelude::*,
	auth::{CredentialPayload, FlowOwner},
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
	/// Returns the credential payload parked for `owner` and deletes it.
	///
	/// Any later call fails with [`Error::NoCredentials`] until a new flow completes, even when
	/// the caller never received the first response.
	pub async fn get_credentials(&self, owner: &FlowOwner) -> Result<CredentialPayload> {
		self.observe(FlowKind::Credentials, async move {
			let key = self.key(RecordPhase::Credentials, owner);
			let raw = self.store.get(&key).await?.ok_or(Error::NoCredentials)?;
			let payload = CredentialPayload::parse(&raw)?;

			self.store.delete(&key).await?;

			Ok(payload)
		})
		.await
	}
}
