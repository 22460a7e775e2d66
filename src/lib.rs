//! OAuth credential broker for SaaS integrations.
//!
//! A [`flows::Broker`] drives one platform through single-use anti-forgery state, PKCE custody,
//! and a consume-once token hand-off, coordinated entirely through an ephemeral key-value store.
//! Credentials it hands out can then list the platform's resources as normalized
//! [`items::IntegrationItem`] records.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod items;
pub mod oauth;
pub mod obs;
pub mod platform;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{BrokerSettings, ClientCredentials},
		flows::Broker,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
		platform::PlatformDescriptor,
		store::{EphemeralStore, MemoryStore},
	};

	/// Broker type alias used by reqwest-backed integration tests.
	pub type ReqwestTestBroker = Broker<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Redirect URI shared by integration-test brokers.
	pub const TEST_REDIRECT_URI: &str = "http://localhost:8000/integrations/test/oauth2callback";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client(timeout: std::time::Duration) -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.redirect(reqwest::redirect::Policy::none())
			.timeout(timeout)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`Broker`] backed by an in-memory store and the reqwest transport used
	/// across integration tests.
	pub fn build_reqwest_test_broker(
		descriptor: PlatformDescriptor,
		client_id: &str,
		client_secret: &str,
	) -> (ReqwestTestBroker, Arc<MemoryStore>) {
		build_reqwest_test_broker_with_settings(
			descriptor,
			client_id,
			client_secret,
			BrokerSettings::default(),
		)
	}

	/// Same as [`build_reqwest_test_broker`] but with caller-provided settings (e.g., a short
	/// request timeout).
	pub fn build_reqwest_test_broker_with_settings(
		descriptor: PlatformDescriptor,
		client_id: &str,
		client_secret: &str,
		settings: BrokerSettings,
	) -> (ReqwestTestBroker, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn EphemeralStore> = store_backend.clone();
		let http_client = test_reqwest_http_client(settings.request_timeout());
		let mapper = Arc::new(ReqwestTransportErrorMapper);
		let redirect_uri =
			Url::parse(TEST_REDIRECT_URI).expect("Test redirect URI should parse successfully.");
		let broker = Broker::with_http_client(
			store,
			descriptor,
			ClientCredentials::new(client_id, client_secret),
			settings,
			http_client,
			mapper,
		)
		.expect("Test broker should build.")
		.with_redirect_uri(redirect_uri);

		(broker, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
