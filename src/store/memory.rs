//! Thread-safe in-memory [`EphemeralStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{EphemeralStore, StoreError, StoreFuture, StoreKey},
};

type StoreMap = Arc<RwLock<HashMap<StoreKey, Entry>>>;

#[derive(Clone, Debug)]
struct Entry {
	value: String,
	expires_at: OffsetDateTime,
}

/// Storage backend that keeps expiring records in-process.
///
/// Expiry is evaluated lazily on read; expired entries are purged when touched.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of live (unexpired) records.
	pub fn len(&self) -> usize {
		let now = OffsetDateTime::now_utc();

		self.0.read().values().filter(|entry| entry.expires_at > now).count()
	}

	/// Returns true when no live records remain.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn put_now(
		map: StoreMap,
		key: StoreKey,
		value: String,
		ttl: Duration,
	) -> Result<(), StoreError> {
		let expires_at = OffsetDateTime::now_utc()
			.checked_add(ttl)
			.filter(|_| ttl.is_positive())
			.ok_or(StoreError::InvalidTtl { seconds: ttl.whole_seconds() })?;

		map.write().insert(key, Entry { value, expires_at });

		Ok(())
	}

	fn get_now(map: StoreMap, key: &StoreKey) -> Option<String> {
		let now = OffsetDateTime::now_utc();

		{
			let guard = map.read();

			match guard.get(key) {
				Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
				Some(_) => {},
				None => return None,
			}
		}

		let mut guard = map.write();

		if guard.get(key).is_some_and(|entry| entry.expires_at <= now) {
			guard.remove(key);
		}

		None
	}
}
impl EphemeralStore for MemoryStore {
	fn put<'a>(
		&'a self,
		key: &'a StoreKey,
		value: String,
		ttl: Duration,
	) -> StoreFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Self::put_now(map, key, value, ttl) })
	}

	fn get<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<String>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn delete<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			map.write().remove(key);

			Ok(())
		})
	}
}
