//! Serde-friendly settings for brokers, client credentials, and the shared store.
//!
//! Loading these values (environment, files, secret managers) is left to the embedding
//! service; every struct deserializes from any serde format and fills in defaults.

// self
use crate::{_prelude::*, auth::PlatformId, error::ConfigError};

const DEFAULT_RECORD_TTL_SECS: u64 = 600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REDIRECT_BASE: &str = "http://localhost:8000/integrations";

/// Per-broker tunables shared by every platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerSettings {
	/// Lifetime of state, verifier, and credential records.
	pub record_ttl_secs: u64,
	/// Upper bound on any single platform request.
	pub request_timeout_secs: u64,
	/// Base URL under which `{platform}/oauth2callback` is served.
	pub redirect_base: String,
}
impl BrokerSettings {
	/// Record lifetime as a [`Duration`].
	pub fn record_ttl(&self) -> Duration {
		Duration::seconds(i64::try_from(self.record_ttl_secs).unwrap_or(i64::MAX))
	}

	/// Request timeout for the HTTP transport.
	pub fn request_timeout(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.request_timeout_secs)
	}

	/// Overrides the record lifetime.
	pub fn with_record_ttl_secs(mut self, secs: u64) -> Self {
		self.record_ttl_secs = secs;

		self
	}

	/// Overrides the request timeout.
	pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
		self.request_timeout_secs = secs;

		self
	}

	/// Builds the callback URI registered with `platform`.
	pub fn redirect_uri(&self, platform: &PlatformId) -> Result<Url, ConfigError> {
		let base = self.redirect_base.trim_end_matches('/');

		Url::parse(&format!("{base}/{platform}/oauth2callback"))
			.map_err(|source| ConfigError::InvalidRedirect { source })
	}
}
impl Default for BrokerSettings {
	fn default() -> Self {
		Self {
			record_ttl_secs: DEFAULT_RECORD_TTL_SECS,
			request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
			redirect_base: DEFAULT_REDIRECT_BASE.into(),
		}
	}
}

/// OAuth client registration for one platform.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// OAuth 2.0 client identifier.
	pub client_id: String,
	/// Client secret; optional so public registrations can still start flows.
	#[serde(default)]
	pub client_secret: Option<String>,
}
impl ClientCredentials {
	/// Creates a confidential client registration.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: Some(client_secret.into()) }
	}

	/// Creates a registration without a secret.
	pub fn public(client_id: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: None }
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}

/// Connection settings for the shared Redis store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisSettings {
	/// Server host name.
	pub host: String,
	/// Server port.
	pub port: u16,
	/// Logical database index.
	pub database: u8,
	/// Use TLS (`rediss://`).
	pub secure: bool,
	/// Optional ACL user name.
	pub user: Option<String>,
	/// Optional ACL password.
	pub password: Option<String>,
}
impl RedisSettings {
	/// Renders the connection URL.
	pub fn url(&self) -> String {
		format!(
			"{}://{}{}:{}/{}",
			if self.secure { "rediss" } else { "redis" },
			match (self.user.as_ref(), self.password.as_ref()) {
				(Some(user), Some(password)) => format!("{user}:{password}@"),
				(Some(user), None) => format!("{user}@"),
				(None, Some(password)) => format!(":{password}@"),
				(None, None) => String::new(),
			},
			self.host,
			self.port,
			self.database
		)
	}
}
impl Default for RedisSettings {
	fn default() -> Self {
		Self {
			host: "localhost".into(),
			port: 6379,
			database: 0,
			secure: false,
			user: None,
			password: None,
		}
	}
}
impl Debug for RedisSettings {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RedisSettings")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("database", &self.database)
			.field("secure", &self.secure)
			.field("user", &self.user)
			.field("password_set", &self.password.is_some())
			.finish()
	}
}
