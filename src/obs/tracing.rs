// self
use crate::{_prelude::*, auth::PlatformId, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// Span wrapping one broker operation against one platform.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the flow kind and platform.
	pub fn new(kind: FlowKind, platform: &PlatformId) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"integration_broker.flow",
				flow = kind.as_str(),
				platform = %platform,
				stage = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, platform);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Records the stage the current flow has reached on its span.
pub fn record_stage(stage: &'static str) {
	#[cfg(feature = "tracing")]
	tracing::Span::current().record("stage", stage);

	#[cfg(not(feature = "tracing"))]
	let _ = stage;
}

/// Emits a warning for a rejected request inside the current flow span.
pub fn warn_rejected(error: &Error) {
	#[cfg(feature = "tracing")]
	tracing::warn!(status = error.status_code(), %error, "request rejected");

	#[cfg(not(feature = "tracing"))]
	let _ = error;
}
