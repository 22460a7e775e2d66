// std
use std::collections::HashSet;
// crates.io
use oauth2::http::Method;
// self
use crate::{
	_prelude::*,
	items::{ApiSession, IntegrationItem, array_field, find_key, string_field},
};

const FALLBACK_NAME: &str = "multi_select";

/// Runs one workspace search and normalizes each distinct result.
pub(super) async fn fetch(session: &dyn ApiSession) -> Result<Vec<IntegrationItem>> {
	let url = session.descriptor().api_url("search")?;
	let response = session.call(Method::POST, url, None).await?;
	let mut seen = HashSet::new();

	Ok(array_field(&response, "results")
		.iter()
		.filter(|result| string_field(result, "id").is_some_and(|id| seen.insert(id)))
		.map(item)
		.collect())
}

fn item(value: &JsonValue) -> IntegrationItem {
	let object = string_field(value, "object").unwrap_or_default();

	IntegrationItem {
		name: Some(format!("{object} {}", name(value))),
		creation_time: string_field(value, "created_time"),
		last_modified_time: string_field(value, "last_edited_time"),
		parent_id: parent_id(value),
		..IntegrationItem::new(string_field(value, "id").unwrap_or_default(), object)
	}
}

fn name(value: &JsonValue) -> String {
	let found = value
		.get("properties")
		.and_then(|properties| find_key(properties, "content"))
		.or_else(|| find_key(value, "content"));

	match found {
		Some(JsonValue::String(content)) => content.clone(),
		Some(other) => other.to_string(),
		None => FALLBACK_NAME.into(),
	}
}

fn parent_id(value: &JsonValue) -> Option<String> {
	let parent = value.get("parent")?;
	let parent_type = parent.get("type")?.as_str()?;

	if parent_type == "workspace" {
		return None;
	}

	string_field(parent, parent_type)
}
