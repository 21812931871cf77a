//! Optional observability helpers for exchange stages.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `vauth_credential.exchange` with the `stage`
//!   (network round trip) and `step` (call site) fields.
//! - Enable `metrics` to increment the `vauth_credential_exchange_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Network round trips performed during a single exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeStage {
	/// Bearer token fetch against the hosting platform's identity endpoint.
	TokenSource,
	/// Credential fetch against the VeraId Authority.
	Authority,
}
impl ExchangeStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeStage::TokenSource => "token_source",
			ExchangeStage::Authority => "authority",
		}
	}

	/// Returns the human-readable name of the artifact fetched by this stage.
	pub const fn subject(self) -> &'static str {
		match self {
			ExchangeStage::TokenSource => "JWT",
			ExchangeStage::Authority => "VeraId credential",
		}
	}
}
impl Display for ExchangeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageOutcome {
	/// Entry to a network stage.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl StageOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageOutcome::Attempt => "attempt",
			StageOutcome::Success => "success",
			StageOutcome::Failure => "failure",
		}
	}
}
impl Display for StageOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a stage span and records attempt/success/failure around it.
pub(crate) async fn observe_stage<T, Fut>(
	stage: ExchangeStage,
	step: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = StageSpan::new(stage, step);

	record_stage_outcome(stage, StageOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_stage_outcome(stage, StageOutcome::Success),
		Err(e) => {
			span.warn_failure(e);
			record_stage_outcome(stage, StageOutcome::Failure);
		},
	}

	result
}
