//! Descriptor presets for the supported platforms.
//!
//! Tests and self-hosted deployments can start from a preset and point the endpoints
//! elsewhere; the public fields stay editable after construction.

// self
use crate::{
	_prelude::*,
	auth::{PlatformId, ScopeSet},
	items::ItemCatalog,
	platform::{
		ClientAuthMethod, PlatformDescriptor, PlatformDescriptorBuilder, PlatformDescriptorError,
		TokenRequestFormat,
	},
};

const NOTION_VERSION: &str = "2022-06-28";

impl PlatformDescriptor {
	/// Tabular-data platform: PKCE plus Basic client authentication.
	pub fn airtable() -> Result<Self, PlatformDescriptorError> {
		builder_for("airtable")?
			.authorization_endpoint(endpoint("https://airtable.com/oauth2/v1/authorize")?)
			.token_endpoint(endpoint("https://api.airtable.com/oauth2/v1/token")?)
			.api_endpoint(endpoint("https://api.airtable.com/v0")?)
			.scope(scopes([
				"data.records:read",
				"data.records:write",
				"data.recordComments:read",
				"data.recordComments:write",
				"schema.bases:read",
				"schema.bases:write",
			])?)
			.require_pkce()
			.authorize_param("owner", "user")
			.catalog(ItemCatalog::Airtable)
			.build()
	}

	/// Workspace platform: no scopes and a JSON token request body.
	pub fn notion() -> Result<Self, PlatformDescriptorError> {
		builder_for("notion")?
			.authorization_endpoint(endpoint("https://api.notion.com/v1/oauth/authorize")?)
			.token_endpoint(endpoint("https://api.notion.com/v1/oauth/token")?)
			.api_endpoint(endpoint("https://api.notion.com/v1")?)
			.token_request_format(TokenRequestFormat::Json)
			.authorize_param("owner", "user")
			.api_header("Notion-Version", NOTION_VERSION)
			.catalog(ItemCatalog::Notion)
			.build()
	}

	/// CRM platform: client credentials travel in the request body.
	pub fn hubspot() -> Result<Self, PlatformDescriptorError> {
		builder_for("hubspot")?
			.authorization_endpoint(endpoint("https://app.hubspot.com/oauth/authorize")?)
			.token_endpoint(endpoint("https://api.hubapi.com/oauth/v1/token")?)
			.api_endpoint(endpoint("https://api.hubapi.com")?)
			.scope(scopes([
				"crm.objects.contacts.read",
				"crm.objects.contacts.write",
				"crm.objects.companies.read",
				"crm.objects.companies.write",
				"oauth",
			])?)
			.preferred_client_auth_method(ClientAuthMethod::ClientSecretPost)
			.catalog(ItemCatalog::HubSpot)
			.build()
	}

	/// Looks up a preset by its platform identifier.
	pub fn preset(id: &str) -> Option<Result<Self, PlatformDescriptorError>> {
		match id {
			"airtable" => Some(Self::airtable()),
			"notion" => Some(Self::notion()),
			"hubspot" => Some(Self::hubspot()),
			_ => None,
		}
	}
}

fn builder_for(id: &str) -> Result<PlatformDescriptorBuilder, PlatformDescriptorError> {
	let id = PlatformId::new(id)
		.map_err(|_| PlatformDescriptorError::InvalidIdentifier { id: id.into() })?;

	Ok(PlatformDescriptor::builder(id))
}

fn endpoint(raw: &str) -> Result<Url, PlatformDescriptorError> {
	Url::parse(raw).map_err(|_| PlatformDescriptorError::InvalidUrl { url: raw.into() })
}

fn scopes<const N: usize>(values: [&str; N]) -> Result<ScopeSet, PlatformDescriptorError> {
	ScopeSet::new(values).map_err(|_| PlatformDescriptorError::InvalidScope)
}
