//! Anti-forgery authorization state and its transport codec.
//!
//! The encoded token that travels through the platform redirect is only a transport
//! encoding (URL-safe base64 over JSON). It carries no secrecy or integrity guarantee on its
//! own: a callback is trusted only when the decoded nonce equals the one held in the store
//! for the same flow owner.

// crates.io
use base64::{
	Engine as _,
	alphabet,
	engine::{
		DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig,
		general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
	},
};
use rand::Rng;
// self
use crate::{
	_prelude::*,
	auth::{CallerId, FlowOwner, TenantId},
};

const NONCE_BYTES: usize = 32;
const STATE_DECODER: GeneralPurpose = GeneralPurpose::new(
	&alphabet::URL_SAFE,
	GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Pending authorization record bound to a single flow owner.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationState {
	/// Random URL-safe nonce.
	#[serde(rename = "state")]
	pub nonce: String,
	/// End user that initiated the flow.
	#[serde(rename = "user_id")]
	pub caller: CallerId,
	/// Organization that owns the flow.
	#[serde(rename = "org_id")]
	pub tenant: TenantId,
}
impl AuthorizationState {
	/// Creates a state record with a fresh nonce.
	pub fn generate(owner: &FlowOwner) -> Self {
		Self {
			nonce: random_nonce(),
			caller: owner.caller.clone(),
			tenant: owner.tenant.clone(),
		}
	}

	/// Returns the owner the state was issued for.
	pub fn owner(&self) -> FlowOwner {
		FlowOwner::new(self.tenant.clone(), self.caller.clone())
	}

	/// Serializes the record for storage.
	pub fn to_record(&self) -> String {
		serde_json::to_string(self).unwrap_or_default()
	}

	/// Parses a stored record.
	pub fn from_record(raw: &str) -> Result<Self> {
		let state: Self = serde_json::from_str(raw).map_err(|_| Error::MalformedState)?;

		if state.nonce.is_empty() {
			return Err(Error::MalformedState);
		}

		Ok(state)
	}

	/// Encodes the record into the transport-safe `state` parameter.
	pub fn encode(&self) -> String {
		URL_SAFE.encode(self.to_record())
	}

	/// Decodes a `state` parameter produced by [`AuthorizationState::encode`].
	///
	/// Fails with [`Error::MalformedState`] when the token is not base64, not JSON, or lacks
	/// any of the nonce, caller, or tenant fields.
	pub fn decode(token: &str) -> Result<Self> {
		let bytes = STATE_DECODER.decode(token.trim()).map_err(|_| Error::MalformedState)?;
		let raw = String::from_utf8(bytes).map_err(|_| Error::MalformedState)?;

		Self::from_record(&raw)
	}

	/// Hard equality check between the presented nonce and the stored one.
	pub fn matches(&self, stored: &AuthorizationState) -> bool {
		self.nonce.len() == stored.nonce.len()
			&& self
				.nonce
				.bytes()
				.zip(stored.nonce.bytes())
				.fold(0_u8, |acc, (lhs, rhs)| acc | (lhs ^ rhs))
				== 0
	}
}
impl Debug for AuthorizationState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationState")
			.field("nonce", &"<redacted>")
			.field("caller", &self.caller)
			.field("tenant", &self.tenant)
			.finish()
	}
}

fn random_nonce() -> String {
	let mut bytes = [0_u8; NONCE_BYTES];

	rand::rng().fill(&mut bytes);

	URL_SAFE_NO_PAD.encode(bytes)
}
