//! Normalized integration items and the per-platform fetchers that produce them.
//!
//! Fetchers talk to the platform through an [`ApiSession`], which owns authentication, the
//! request timeout, and error classification. Every sub-request of one listing is joined before
//! returning, so a single failure fails the whole listing.

mod airtable;
mod hubspot;
mod notion;
mod search;

pub use search::{MAX_SEARCH_DEPTH, find_key};

// crates.io
use oauth2::http::Method;
// self
use crate::{_prelude::*, platform::PlatformDescriptor};

/// Boxed future returned by [`ApiSession`] calls.
pub type ApiFuture<'a> = Pin<Box<dyn Future<Output = Result<JsonValue>> + 'a + Send>>;

/// Authenticated access to one platform's data API.
pub trait ApiSession
where
	Self: Send + Sync,
{
	/// Descriptor of the platform the session talks to.
	fn descriptor(&self) -> &PlatformDescriptor;

	/// Issues a request and decodes the JSON response body.
	///
	/// Non-success statuses surface as [`Error::ApiRejected`].
	fn call<'a>(&'a self, method: Method, url: Url, body: Option<JsonValue>) -> ApiFuture<'a>;
}

/// Resource listings a platform serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCatalog {
	/// Bases and their tables.
	Airtable,
	/// Pages and databases visible to the integration.
	Notion,
	/// CRM contacts and companies.
	HubSpot,
}
impl ItemCatalog {
	/// Lists every item reachable with `session`.
	pub async fn fetch(self, session: &dyn ApiSession) -> Result<Vec<IntegrationItem>> {
		match self {
			ItemCatalog::Airtable => airtable::fetch(session).await,
			ItemCatalog::Notion => notion::fetch(session).await,
			ItemCatalog::HubSpot => hubspot::fetch(session).await,
		}
	}
}

/// Platform resource normalized into one shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationItem {
	/// Platform identifier, suffixed with the item type where platforms reuse id spaces.
	pub id: String,
	/// Resource kind (`Base`, `Table`, `page`, `database`, `contact`, `company`).
	#[serde(rename = "type")]
	pub item_type: String,
	/// Display name.
	pub name: Option<String>,
	/// Creation timestamp as reported by the platform.
	pub creation_time: Option<String>,
	/// Last modification timestamp as reported by the platform.
	pub last_modified_time: Option<String>,
	/// Identifier of the containing resource.
	pub parent_id: Option<String>,
	/// Display name or path of the containing resource.
	pub parent_path_or_name: Option<String>,
	/// Deep link into the platform UI.
	pub url: Option<String>,
}
impl IntegrationItem {
	pub(crate) fn new(id: impl Into<String>, item_type: impl Into<String>) -> Self {
		Self { id: id.into(), item_type: item_type.into(), ..Default::default() }
	}
}

/// Reads `value[field]` as an owned string. Numbers are rendered, other shapes are ignored.
pub(crate) fn string_field(value: &JsonValue, field: &str) -> Option<String> {
	match value.get(field)? {
		JsonValue::String(s) => Some(s.clone()),
		JsonValue::Number(n) => Some(n.to_string()),
		_ => None,
	}
}

/// Returns `value[field]` as an array, treating absent or mistyped fields as empty.
pub(crate) fn array_field<'a>(value: &'a JsonValue, field: &str) -> &'a [JsonValue] {
	value.get(field).and_then(JsonValue::as_array).map(Vec::as_slice).unwrap_or_default()
}
