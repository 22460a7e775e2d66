//! Raw token-endpoint payloads handed to callers exactly once.

// self
use crate::_prelude::*;

/// Token response returned by a platform, kept verbatim apart from redacted formatting.
///
/// The shape is platform-defined; the broker only requires an `access_token` string.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialPayload(JsonMap<String, JsonValue>);
impl CredentialPayload {
	/// Parses a token response body, requiring a JSON object with an `access_token`.
	pub fn parse(raw: &str) -> Result<Self> {
		let map: JsonMap<String, JsonValue> =
			serde_json::from_str(raw).map_err(Error::malformed_response)?;
		let payload = Self(map);

		if payload.access_token().is_none() {
			return Err(Error::malformed_response("token response lacks an access_token"));
		}

		Ok(payload)
	}

	/// Returns the access token. Callers must avoid logging this string.
	pub fn access_token(&self) -> Option<&str> {
		self.0.get("access_token").and_then(JsonValue::as_str).filter(|token| !token.is_empty())
	}

	/// Returns an arbitrary field of the token response.
	pub fn get(&self, field: &str) -> Option<&JsonValue> {
		self.0.get(field)
	}

	/// Consumes the payload, returning the underlying JSON object.
	pub fn into_inner(self) -> JsonMap<String, JsonValue> {
		self.0
	}
}
impl From<JsonMap<String, JsonValue>> for CredentialPayload {
	fn from(map: JsonMap<String, JsonValue>) -> Self {
		Self(map)
	}
}
impl Debug for CredentialPayload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let fields = self.0.keys().collect::<Vec<_>>();

		f.debug_struct("CredentialPayload").field("fields", &fields).finish()
	}
}
