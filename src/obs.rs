//! Optional observability helpers for broker flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `integration_broker.flow` carrying the `flow`,
//!   `platform`, and `stage` fields, plus warning events when a platform or caller is rejected.
//! - Enable `metrics` to increment the `integration_broker_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow`, `platform`, and `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Broker operations observed by the instrumentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization URL construction.
	Authorize,
	/// Callback validation and code exchange.
	Callback,
	/// One-time credential retrieval.
	Credentials,
	/// Item listing against a platform API.
	Items,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorize => "authorize",
			FlowKind::Callback => "callback",
			FlowKind::Credentials => "credentials",
			FlowKind::Items => "items",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a broker operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}

	/// Maps a flow result onto its terminal outcome.
	pub fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { FlowOutcome::Success } else { FlowOutcome::Failure }
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
