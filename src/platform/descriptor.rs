//! Platform descriptor data structures shared by all flows.

/// Builder API for assembling platform descriptors.
pub mod builder;
/// Platform-specific quirk toggles.
pub mod quirks;

pub use builder::*;
pub use quirks::*;

// self
use crate::{
	_prelude::*,
	auth::{PlatformId, ScopeSet},
	error::ConfigError,
	items::ItemCatalog,
};

/// How client credentials reach the token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// HTTP Basic header carrying `base64(client_id:client_secret)`.
	ClientSecretBasic,
	/// `client_id`/`client_secret` embedded in the request body.
	ClientSecretPost,
}

/// Body encoding expected by a token endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenRequestFormat {
	#[default]
	/// `application/x-www-form-urlencoded`.
	Form,
	/// `application/json`.
	Json,
}

/// Endpoint set declared by a platform descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEndpoints {
	/// Authorization endpoint the end user is redirected to.
	pub authorization: Url,
	/// Token endpoint used for the code exchange.
	pub token: Url,
	/// Base URL of the platform's data API.
	pub api: Url,
}

/// Immutable platform descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
	/// Descriptor identifier; prefixes every store key.
	pub id: PlatformId,
	/// Endpoint definitions exposed by the platform.
	pub endpoints: PlatformEndpoints,
	/// Scopes requested on the authorization URL (omitted when empty).
	pub scope: ScopeSet,
	/// Preferred client authentication mechanism.
	pub preferred_client_auth_method: ClientAuthMethod,
	/// Platform-specific quirks.
	pub quirks: PlatformQuirks,
	/// Fixed parameters appended to every authorization URL (e.g., `owner=user`).
	pub authorize_params: Vec<(String, String)>,
	/// Fixed headers sent with every data API request (e.g., an API version pin).
	pub api_headers: Vec<(String, String)>,
	/// Item catalog served by the platform's data API.
	pub catalog: ItemCatalog,
}
impl PlatformDescriptor {
	/// Creates a new builder for the provided identifier.
	pub fn builder(id: PlatformId) -> PlatformDescriptorBuilder {
		PlatformDescriptorBuilder::new(id)
	}

	/// Returns true when the authorization grant requires proof-of-possession.
	pub fn requires_pkce(&self) -> bool {
		self.quirks.pkce_required
	}

	/// Resolves a path relative to the data API base URL.
	pub fn api_url(&self, path: &str) -> Result<Url> {
		let mut url = self.endpoints.api.clone();

		{
			let mut segments = url.path_segments_mut().map_err(|_| ConfigError::InvalidEndpoint {
				url: self.endpoints.api.to_string(),
			})?;

			segments.pop_if_empty();
			segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
		}

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_url_appends_segments_to_base_path() {
		let descriptor = PlatformDescriptor::airtable().expect("Preset should build.");
		let url = descriptor.api_url("meta/bases/app123/tables").expect("API URL should resolve.");

		assert_eq!(url.as_str(), "https://api.airtable.com/v0/meta/bases/app123/tables");

		let hubspot = PlatformDescriptor::hubspot().expect("Preset should build.");

		assert_eq!(
			hubspot.api_url("/crm/v3/objects/contacts").expect("API URL should resolve.").as_str(),
			"https://api.hubapi.com/crm/v3/objects/contacts"
		);
	}
}
