// self
use crate::{
	auth::PlatformId,
	obs::{FlowKind, FlowOutcome},
};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(kind: FlowKind, platform: &PlatformId, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"integration_broker_flow_total",
			"flow" => kind.as_str(),
			"platform" => platform.to_string(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, platform, outcome);
	}
}
