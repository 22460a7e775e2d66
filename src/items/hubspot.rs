// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	items::{ApiSession, IntegrationItem, array_field, string_field},
};

const CONTACT: &str = "contact";
const COMPANY: &str = "company";
const APP_BASE: &str = "https://app.hubspot.com";

/// Lists contacts and companies concurrently.
pub(super) async fn fetch(session: &dyn ApiSession) -> Result<Vec<IntegrationItem>> {
	let (contacts, companies) =
		futures::try_join!(list(session, "contacts"), list(session, "companies"))?;
	let contacts = array_field(&contacts, "results").iter().map(|value| item(value, CONTACT));
	let companies = array_field(&companies, "results").iter().map(|value| item(value, COMPANY));

	Ok(contacts.chain(companies).collect())
}

async fn list(session: &dyn ApiSession, object: &str) -> Result<JsonValue> {
	let url = session.descriptor().api_url(&format!("crm/v3/objects/{object}"))?;

	session.call(Method::GET, url, None).await
}

fn item(value: &JsonValue, item_type: &str) -> IntegrationItem {
	let id = string_field(value, "id").unwrap_or_default();

	IntegrationItem {
		name: Some(name(value, item_type)),
		creation_time: string_field(value, "createdAt"),
		last_modified_time: string_field(value, "updatedAt"),
		url: Some(format!("{APP_BASE}/{item_type}s/{id}")),
		..IntegrationItem::new(id, item_type)
	}
}

fn name(value: &JsonValue, item_type: &str) -> String {
	let properties = value.get("properties").cloned().unwrap_or(JsonValue::Null);
	let property = |field: &str| string_field(&properties, field).unwrap_or_default();

	if item_type == CONTACT {
		let full = format!("{} {}", property("firstname"), property("lastname"));
		let full = full.trim();

		if !full.is_empty() {
			return full.to_owned();
		}
	}

	property("name")
}
