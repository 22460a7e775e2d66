// self
use crate::{_prelude::*, platform::TokenRequestFormat};

/// Platform-specific quirks that influence how flows behave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformQuirks {
	/// Indicates whether the authorization grant requires PKCE.
	pub pkce_required: bool,
	/// Character used to join scopes when constructing `scope` parameters.
	pub scope_delimiter: char,
	/// Body encoding expected by the token endpoint.
	pub token_request_format: TokenRequestFormat,
}
impl Default for PlatformQuirks {
	fn default() -> Self {
		Self {
			pkce_required: false,
			scope_delimiter: ' ',
			token_request_format: TokenRequestFormat::Form,
		}
	}
}
