//! Broker-level error types shared across flows, platforms, and stores.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (timeout, DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The platform reported a failed or declined grant on the callback.
	#[error("Platform reported an authorization failure: {description}.")]
	PlatformDenied {
		/// Platform-supplied `error_description`, falling back to `error`.
		description: String,
	},
	/// The callback lacks a required query parameter.
	#[error("Missing required callback parameter: {name}.")]
	MissingCallbackParameter {
		/// Name of the absent parameter.
		name: &'static str,
	},
	/// The state token cannot be decoded or lacks required fields.
	#[error("Invalid state parameter.")]
	MalformedState,
	/// No pending state exists for the flow owner, or its nonce differs.
	#[error("State does not match.")]
	StateMismatch,
	/// The PKCE verifier for a proof-of-possession platform is absent.
	#[error("Code verifier not found.")]
	MissingVerifier,
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the exchange with status {status}: {body}")]
	ExchangeRejected {
		/// HTTP status returned by the platform.
		status: u16,
		/// Raw response body returned by the platform.
		body: String,
	},
	/// Platform API answered an item request with a non-success status.
	#[error("Platform API rejected the request with status {status}: {body}")]
	ApiRejected {
		/// HTTP status returned by the platform.
		status: u16,
		/// Raw response body returned by the platform.
		body: String,
	},
	/// Platform returned a body that is not the expected JSON document.
	#[error("Platform returned a malformed response: {reason}.")]
	MalformedResponse {
		/// Parser or validation failure summary.
		reason: String,
	},
	/// No credential is pending for the flow owner (never stored, consumed, or expired).
	#[error("No credentials found.")]
	NoCredentials,
	/// Credential object handed to an item fetch lacks an access token.
	#[error("Invalid credentials.")]
	InvalidCredentials,
}
impl Error {
	/// HTTP status the routing layer should surface for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			Error::PlatformDenied { .. }
			| Error::MissingCallbackParameter { .. }
			| Error::MalformedState
			| Error::StateMismatch
			| Error::MissingVerifier
			| Error::NoCredentials
			| Error::InvalidCredentials => 400,
			Error::ExchangeRejected { status, .. } | Error::ApiRejected { status, .. } => *status,
			Error::Transport(TransportError::Timeout { .. }) => 504,
			Error::Transport(_)
			| Error::Storage(_)
			| Error::Config(_)
			| Error::MalformedResponse { .. } => 500,
		}
	}

	/// Returns true when the upstream platform did not answer within the request timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Transport(TransportError::Timeout { .. }))
	}

	pub(crate) fn malformed_response(reason: impl Display) -> Self {
		Self::MalformedResponse { reason: reason.to_string() }
	}
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Platform endpoint cannot be joined with a request path.
	#[error("Platform endpoint `{url}` cannot be used as a base URL.")]
	InvalidEndpoint {
		/// Offending endpoint URL.
		url: String,
	},
	/// Redirect URI cannot be derived from the configured base.
	#[error("Redirect URI is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Token request body could not be serialized.
	#[error("Token request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Confidential client authentication requires a secret.
	#[error("Platform `{platform}` requires a client secret.")]
	MissingClientSecret {
		/// Platform identifier string.
		platform: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (timeout, network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The platform did not answer within the configured request timeout.
	#[error("Request to {target} timed out.")]
	Timeout {
		/// Human-readable request target (token endpoint, platform API).
		target: &'static str,
	},
	/// Underlying HTTP client reported a network failure.
	#[error("Failed to connect to {target}.")]
	Network {
		/// Human-readable request target (token endpoint, platform API).
		target: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the platform.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed in a way it could not classify.
	#[error("HTTP client error occurred while calling the platform: {message}.")]
	Other {
		/// Transport-supplied failure summary.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(target: &'static str, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { target, source: Box::new(src) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::StoreError;

	#[test]
	fn validation_failures_map_to_bad_request() {
		for err in [
			Error::PlatformDenied { description: "access_denied".into() },
			Error::MissingCallbackParameter { name: "code" },
			Error::MalformedState,
			Error::StateMismatch,
			Error::MissingVerifier,
			Error::NoCredentials,
			Error::InvalidCredentials,
		] {
			assert_eq!(err.status_code(), 400, "{err} should be a client error.");
		}
	}

	#[test]
	fn upstream_failures_keep_their_status() {
		let rejected = Error::ExchangeRejected { status: 401, body: "bad client".into() };

		assert_eq!(rejected.status_code(), 401);
		assert_eq!(Error::ApiRejected { status: 429, body: String::new() }.status_code(), 429);
		assert_eq!(
			Error::from(TransportError::Timeout { target: "platform API" }).status_code(),
			504
		);
		assert_eq!(
			Error::from(TransportError::Other { message: "reset".into() }).status_code(),
			500
		);
		assert_eq!(Error::from(StoreError::Backend { message: "down".into() }).status_code(), 500);
	}

	#[test]
	fn timeout_helper_only_matches_timeouts() {
		assert!(Error::from(TransportError::Timeout { target: "token endpoint" }).is_timeout());
		assert!(!Error::StateMismatch.is_timeout());
	}
}
