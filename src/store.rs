//! Ephemeral key-value store contract and built-in implementations.
//!
//! The store is the only place cross-request flow state lives. Every record carries a bounded
//! lifetime set atomically with the value, and the store (not the broker) decides when a
//! record has expired.

pub mod memory;
#[cfg(feature = "redis")] pub mod redis;

pub use memory::MemoryStore;
#[cfg(feature = "redis")] pub use self::redis::RedisStore;

// self
use crate::{
	_prelude::*,
	auth::{FlowOwner, PlatformId},
};

/// Boxed future returned by [`EphemeralStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage backend contract for short-lived flow records.
pub trait EphemeralStore
where
	Self: Send + Sync,
{
	/// Writes `value` under `key`, unconditionally replacing any previous value and setting a
	/// fresh expiry of `ttl`.
	fn put<'a>(&'a self, key: &'a StoreKey, value: String, ttl: Duration)
	-> StoreFuture<'a, ()>;

	/// Reads the value under `key`, returning `None` when absent or expired.
	fn get<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<String>>;

	/// Removes `key`; succeeds when the key is already absent.
	fn delete<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`EphemeralStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// The requested lifetime cannot be represented by the backend.
	#[error("Record lifetime must be positive, got {seconds} seconds.")]
	InvalidTtl {
		/// Requested lifetime in whole seconds.
		seconds: i64,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Flow phase a stored record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordPhase {
	/// Pending anti-forgery state written by the authorization initiator.
	State,
	/// PKCE verifier for proof-of-possession platforms.
	Verifier,
	/// Token payload awaiting its single retrieval.
	Credentials,
}
impl RecordPhase {
	/// Returns the key segment used for this phase.
	pub const fn as_str(self) -> &'static str {
		match self {
			RecordPhase::State => "state",
			RecordPhase::Verifier => "verifier",
			RecordPhase::Credentials => "credentials",
		}
	}
}
impl Display for RecordPhase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Unique key identifying a stored record: `{platform}_{phase}:{tenant}:{caller}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreKey {
	/// Platform the flow runs against.
	pub platform: PlatformId,
	/// Flow phase of the record.
	pub phase: RecordPhase,
	/// Owner of the flow.
	pub owner: FlowOwner,
}
impl StoreKey {
	/// Builds a key for the provided platform, phase, and owner.
	pub fn new(platform: &PlatformId, phase: RecordPhase, owner: &FlowOwner) -> Self {
		Self { platform: platform.clone(), phase, owner: owner.clone() }
	}
}
impl Display for StoreKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}_{}:{}:{}", self.platform, self.phase, self.owner.tenant, self.owner.caller)
	}
}
