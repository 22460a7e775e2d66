// crates.io
use futures::future;
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	items::{ApiSession, IntegrationItem, array_field, string_field},
};

const BASE: &str = "Base";
const TABLE: &str = "Table";

/// Lists every base, then every base's tables concurrently.
pub(super) async fn fetch(session: &dyn ApiSession) -> Result<Vec<IntegrationItem>> {
	let bases = fetch_bases(session).await?;
	let tables = future::try_join_all(bases.iter().map(|base| fetch_tables(session, base))).await?;
	let mut items = bases.iter().map(|base| item(base, BASE, None)).collect::<Vec<_>>();

	items.extend(tables.into_iter().flatten());

	Ok(items)
}

async fn fetch_bases(session: &dyn ApiSession) -> Result<Vec<JsonValue>> {
	let mut bases = Vec::new();
	let mut offset = None::<String>;

	loop {
		let mut url = session.descriptor().api_url("meta/bases")?;

		if let Some(offset) = &offset {
			url.query_pairs_mut().append_pair("offset", offset);
		}

		let page = session.call(Method::GET, url, None).await?;

		bases.extend(array_field(&page, "bases").iter().cloned());

		match string_field(&page, "offset") {
			Some(next) => offset = Some(next),
			None => return Ok(bases),
		}
	}
}

async fn fetch_tables(session: &dyn ApiSession, base: &JsonValue) -> Result<Vec<IntegrationItem>> {
	let base_id = string_field(base, "id").unwrap_or_default();
	let url = session.descriptor().api_url(&format!("meta/bases/{base_id}/tables"))?;
	let response = session.call(Method::GET, url, None).await?;

	Ok(array_field(&response, "tables")
		.iter()
		.map(|table| item(table, TABLE, Some(base)))
		.collect())
}

fn item(value: &JsonValue, item_type: &str, parent: Option<&JsonValue>) -> IntegrationItem {
	let id = string_field(value, "id").unwrap_or_default();

	IntegrationItem {
		name: string_field(value, "name"),
		parent_id: parent
			.and_then(|base| string_field(base, "id"))
			.map(|base_id| format!("{base_id}_{BASE}")),
		parent_path_or_name: parent.and_then(|base| string_field(base, "name")),
		..IntegrationItem::new(format!("{id}_{item_type}"), item_type)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::{items::testing::ScriptedSession, platform::PlatformDescriptor};

	fn session() -> ScriptedSession {
		ScriptedSession::new(PlatformDescriptor::airtable().expect("Preset should build."))
	}

	#[tokio::test]
	async fn follows_offsets_and_attaches_tables_to_bases() {
		let session = session()
			.respond(
				"GET /v0/meta/bases",
				json!({ "bases": [{ "id": "app1", "name": "CRM" }], "offset": "page2" }),
			)
			.respond(
				"GET /v0/meta/bases?offset=page2",
				json!({ "bases": [{ "id": "app2", "name": "Ops" }] }),
			)
			.respond(
				"GET /v0/meta/bases/app1/tables",
				json!({ "tables": [{ "id": "tbl1", "name": "Leads" }] }),
			)
			.respond("GET /v0/meta/bases/app2/tables", json!({ "tables": [] }));
		let items = fetch(&session).await.expect("Listing should succeed.");

		assert_eq!(
			items.iter().map(|item| item.id.as_str()).collect::<Vec<_>>(),
			["app1_Base", "app2_Base", "tbl1_Table"]
		);

		let table = &items[2];

		assert_eq!(table.item_type, "Table");
		assert_eq!(table.name.as_deref(), Some("Leads"));
		assert_eq!(table.parent_id.as_deref(), Some("app1_Base"));
		assert_eq!(table.parent_path_or_name.as_deref(), Some("CRM"));
		assert_eq!(items[0].parent_id, None);
	}

	#[tokio::test]
	async fn rejected_table_listing_fails_the_whole_fetch() {
		let session = session()
			.respond("GET /v0/meta/bases", json!({ "bases": [{ "id": "app1", "name": "CRM" }] }))
			.reject("GET /v0/meta/bases/app1/tables", 403);
		let err = fetch(&session).await.expect_err("Rejected table listing should fail.");

		assert_eq!(err.status_code(), 403);
	}
}
