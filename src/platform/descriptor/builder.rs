// self
use crate::{
	_prelude::*,
	auth::{PlatformId, ScopeSet},
	items::ItemCatalog,
	platform::{
		ClientAuthMethod, PlatformDescriptor, PlatformEndpoints, PlatformQuirks,
		TokenRequestFormat,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum PlatformDescriptorError {
	/// Authorization endpoint is required.
	#[error("Missing authorization endpoint.")]
	MissingAuthorizationEndpoint,
	/// Token endpoint is required.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// Data API base URL is required.
	#[error("Missing API endpoint.")]
	MissingApiEndpoint,
	/// Item catalog is required.
	#[error("Missing item catalog.")]
	MissingCatalog,
	/// Platform identifier failed validation.
	#[error("Platform identifier `{id}` is invalid.")]
	InvalidIdentifier {
		/// Rejected input.
		id: String,
	},
	/// A scope entry failed validation.
	#[error("Scope list is invalid.")]
	InvalidScope,
	/// Endpoint string is not a URL.
	#[error("Endpoint `{url}` is not a valid URL.")]
	InvalidUrl {
		/// Rejected input.
		url: String,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoints must be hierarchical so request paths can be appended.
	#[error("The {endpoint} endpoint cannot be used as a base URL: {url}.")]
	OpaqueEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Fixed authorization parameters cannot shadow ones the flow computes.
	#[error("Authorization parameter `{name}` is reserved.")]
	ReservedAuthorizeParam {
		/// Offending parameter name.
		name: String,
	},
	/// Reject scope delimiters that are control characters.
	#[error("Scope delimiter must be a printable character.")]
	InvalidScopeDelimiter {
		/// Invalid delimiter that was supplied.
		delimiter: char,
	},
}

const RESERVED_AUTHORIZE_PARAMS: &[&str] = &[
	"client_id",
	"redirect_uri",
	"response_type",
	"scope",
	"state",
	"code_challenge",
	"code_challenge_method",
];

/// Builder for [`PlatformDescriptor`] values.
#[derive(Debug)]
pub struct PlatformDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: PlatformId,
	/// Authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint used for the code exchange.
	pub token_endpoint: Option<Url>,
	/// Data API base URL.
	pub api_endpoint: Option<Url>,
	/// Requested scopes.
	pub scope: ScopeSet,
	/// Preferred client authentication method for the token endpoint.
	pub preferred_client_auth_method: ClientAuthMethod,
	/// Platform-specific quirks.
	pub quirks: PlatformQuirks,
	/// Fixed authorization parameters.
	pub authorize_params: Vec<(String, String)>,
	/// Fixed data API headers.
	pub api_headers: Vec<(String, String)>,
	/// Item catalog served by the platform.
	pub catalog: Option<ItemCatalog>,
}
impl PlatformDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: PlatformId) -> Self {
		Self {
			id,
			authorization_endpoint: None,
			token_endpoint: None,
			api_endpoint: None,
			scope: ScopeSet::default(),
			preferred_client_auth_method: ClientAuthMethod::default(),
			quirks: PlatformQuirks::default(),
			authorize_params: Vec::new(),
			api_headers: Vec::new(),
			catalog: None,
		}
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the data API base URL.
	pub fn api_endpoint(mut self, url: Url) -> Self {
		self.api_endpoint = Some(url);

		self
	}

	/// Sets the requested scopes.
	pub fn scope(mut self, scope: ScopeSet) -> Self {
		self.scope = scope;

		self
	}

	/// Overrides the preferred client authentication method.
	pub fn preferred_client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.preferred_client_auth_method = method;

		self
	}

	/// Overrides the platform quirks.
	pub fn quirks(mut self, quirks: PlatformQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Requires PKCE for the authorization grant.
	pub fn require_pkce(mut self) -> Self {
		self.quirks.pkce_required = true;

		self
	}

	/// Overrides the token request body encoding.
	pub fn token_request_format(mut self, format: TokenRequestFormat) -> Self {
		self.quirks.token_request_format = format;

		self
	}

	/// Appends a fixed authorization URL parameter.
	pub fn authorize_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.authorize_params.push((name.into(), value.into()));

		self
	}

	/// Appends a fixed data API header.
	pub fn api_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.api_headers.push((name.into(), value.into()));

		self
	}

	/// Sets the item catalog served by the platform.
	pub fn catalog(mut self, catalog: ItemCatalog) -> Self {
		self.catalog = Some(catalog);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<PlatformDescriptor, PlatformDescriptorError> {
		let authorization = self
			.authorization_endpoint
			.ok_or(PlatformDescriptorError::MissingAuthorizationEndpoint)?;
		let token = self.token_endpoint.ok_or(PlatformDescriptorError::MissingTokenEndpoint)?;
		let api = self.api_endpoint.ok_or(PlatformDescriptorError::MissingApiEndpoint)?;
		let catalog = self.catalog.ok_or(PlatformDescriptorError::MissingCatalog)?;
		let descriptor = PlatformDescriptor {
			id: self.id,
			endpoints: PlatformEndpoints { authorization, token, api },
			scope: self.scope,
			preferred_client_auth_method: self.preferred_client_auth_method,
			quirks: self.quirks,
			authorize_params: self.authorize_params,
			api_headers: self.api_headers,
			catalog,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl PlatformDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), PlatformDescriptorError> {
		validate_endpoint("authorization", &self.endpoints.authorization)?;
		validate_endpoint("token", &self.endpoints.token)?;
		validate_endpoint("api", &self.endpoints.api)?;
		validate_scope_delimiter(self.quirks.scope_delimiter)?;

		if let Some((name, _)) = self
			.authorize_params
			.iter()
			.find(|(name, _)| RESERVED_AUTHORIZE_PARAMS.contains(&name.as_str()))
		{
			return Err(PlatformDescriptorError::ReservedAuthorizeParam { name: name.clone() });
		}

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), PlatformDescriptorError> {
	if url.cannot_be_a_base() {
		return Err(PlatformDescriptorError::OpaqueEndpoint {
			endpoint: name,
			url: url.to_string(),
		});
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ =>
			Err(PlatformDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
		Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
		None => false,
	}
}

fn validate_scope_delimiter(delimiter: char) -> Result<(), PlatformDescriptorError> {
	if delimiter.is_control() {
		Err(PlatformDescriptorError::InvalidScopeDelimiter { delimiter })
	} else {
		Ok(())
	}
}
