// self
use crate::{_prelude::*, obs::ExchangeStage};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedStage<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedStage<F> = F;

/// A span builder used by exchange stages.
#[derive(Clone, Debug)]
pub struct StageSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage + step.
	pub fn new(stage: ExchangeStage, step: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("vauth_credential.exchange", stage = stage.as_str(), step);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, step);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedStage<Fut>
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

	/// Emits a warning event inside the span describing a failed stage.
	pub fn warn_failure(&self, error: &Error) {
		#[cfg(feature = "tracing")]
		{
			self.span.in_scope(|| tracing::warn!(%error, "exchange stage failed"));
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = error;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn stage_span_noop_without_tracing() {
		let span = StageSpan::new(ExchangeStage::TokenSource, "test");

		span.warn_failure(&Error::UnrecognizedExchanger { name: "test".into() });
	}

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = StageSpan::new(ExchangeStage::Authority, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
