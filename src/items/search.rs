//! First-match key lookup over nested JSON documents.

// self
use crate::_prelude::*;

/// Nesting depth beyond which [`find_key`] stops descending.
pub const MAX_SEARCH_DEPTH: usize = 32;

/// Finds the first value stored under `key` in a pre-order walk of `value`.
///
/// At each object the key itself is checked first; a `null` there counts as a miss and the
/// object's children are skipped. Otherwise children are visited in document order, descending
/// into nested objects and into objects held by arrays. Scalars inside arrays are ignored.
pub fn find_key<'a>(value: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
	search(value.as_object()?, key, 0)
}

fn search<'a>(
	map: &'a JsonMap<String, JsonValue>,
	key: &str,
	depth: usize,
) -> Option<&'a JsonValue> {
	if depth >= MAX_SEARCH_DEPTH {
		return None;
	}
	if let Some(found) = map.get(key) {
		return (!found.is_null()).then_some(found);
	}

	map.values().find_map(|child| match child {
		JsonValue::Object(nested) => search(nested, key, depth + 1),
		JsonValue::Array(elements) => elements
			.iter()
			.filter_map(JsonValue::as_object)
			.find_map(|nested| search(nested, key, depth + 1)),
		_ => None,
	})
}
