//! Redis-backed [`EphemeralStore`] shared by every broker process.

// crates.io
use redis::{AsyncCommands, Client, RedisError, aio::MultiplexedConnection};
// self
use crate::{
	_prelude::*,
	config::RedisSettings,
	store::{EphemeralStore, StoreError, StoreFuture, StoreKey},
};

/// Network store speaking to a single Redis instance over a multiplexed connection.
///
/// Values are written with `SET key value EX ttl`, so a record never exists without its
/// expiry.
#[derive(Clone)]
pub struct RedisStore {
	connection: MultiplexedConnection,
}
impl RedisStore {
	/// Connects to the Redis server described by `settings`.
	pub async fn connect(settings: &RedisSettings) -> Result<Self, StoreError> {
		let client = Client::open(settings.url()).map_err(backend("open Redis client"))?;
		let connection = client
			.get_multiplexed_async_connection()
			.await
			.map_err(backend("connect to Redis"))?;

		#[cfg(feature = "tracing")]
		tracing::info!(host = %settings.host, port = settings.port, "connected to redis");

		Ok(Self { connection })
	}

	/// Closes the connection. In-flight clones held by other tasks finish independently.
	pub fn disconnect(self) {
		#[cfg(feature = "tracing")]
		tracing::info!("disconnecting from redis");

		drop(self.connection);
	}
}
impl Debug for RedisStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RedisStore(..)")
	}
}
impl EphemeralStore for RedisStore {
	fn put<'a>(
		&'a self,
		key: &'a StoreKey,
		value: String,
		ttl: Duration,
	) -> StoreFuture<'a, ()> {
		let mut connection = self.connection.clone();

		Box::pin(async move {
			let seconds = u64::try_from(ttl.whole_seconds())
				.ok()
				.filter(|seconds| *seconds > 0)
				.ok_or(StoreError::InvalidTtl { seconds: ttl.whole_seconds() })?;

			connection
				.set_ex::<_, _, ()>(key.to_string(), value, seconds)
				.await
				.map_err(backend("Redis set failed"))
		})
	}

	fn get<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, Option<String>> {
		let mut connection = self.connection.clone();

		Box::pin(async move {
			connection
				.get::<_, Option<String>>(key.to_string())
				.await
				.map_err(backend("Redis get failed"))
		})
	}

	fn delete<'a>(&'a self, key: &'a StoreKey) -> StoreFuture<'a, ()> {
		let mut connection = self.connection.clone();

		Box::pin(async move {
			connection.del::<_, ()>(key.to_string()).await.map_err(backend("Redis delete failed"))
		})
	}
}

fn backend(context: &'static str) -> impl Fn(RedisError) -> StoreError {
	move |e| StoreError::Backend { message: format!("{context}: {e}") }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn tls_urls_are_accepted_by_the_client() {
		let settings = RedisSettings { secure: true, ..RedisSettings::default() };

		Client::open(settings.url()).expect("TLS Redis URLs should open without connecting.");
	}
}
