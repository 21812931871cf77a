//! Per-call timeout budgets for an exchange.

// std
use std::num::NonZeroU64;
// crates.io
use serde::{Deserializer, Serializer};
// self
use crate::_prelude::*;

/// Timeout overrides applied to a single [`Exchanger::exchange`](crate::Exchanger::exchange)
/// call.
///
/// The serde representation uses whole, positive seconds
/// (`initial_credential_timeout_seconds`, `vauth_credential_timeout_seconds`); omitted fields
/// fall back to [`ExchangeOptions::DEFAULT_TIMEOUT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeOptions {
	#[serde(rename = "initial_credential_timeout_seconds", with = "seconds")]
	initial_credential_timeout: Duration,
	#[serde(rename = "vauth_credential_timeout_seconds", with = "seconds")]
	vauth_credential_timeout: Duration,
}
impl ExchangeOptions {
	/// Budget applied to each stage when no override is given.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

	/// Bound on acquiring the `Authorization` header (the token-source round trip).
	pub fn initial_credential_timeout(&self) -> Duration {
		self.initial_credential_timeout
	}

	/// Bound on the authority round trip.
	pub fn vauth_credential_timeout(&self) -> Duration {
		self.vauth_credential_timeout
	}

	/// Overrides the header acquisition budget; a zero duration keeps the default.
	pub fn with_initial_credential_timeout(mut self, timeout: Duration) -> Self {
		self.initial_credential_timeout = positive_or_default(timeout);

		self
	}

	/// Overrides the authority fetch budget; a zero duration keeps the default.
	pub fn with_vauth_credential_timeout(mut self, timeout: Duration) -> Self {
		self.vauth_credential_timeout = positive_or_default(timeout);

		self
	}

	/// Seconds-based variant of [`Self::with_initial_credential_timeout`].
	pub fn with_initial_credential_timeout_seconds(self, seconds: u64) -> Self {
		self.with_initial_credential_timeout(Duration::from_secs(seconds))
	}

	/// Seconds-based variant of [`Self::with_vauth_credential_timeout`].
	pub fn with_vauth_credential_timeout_seconds(self, seconds: u64) -> Self {
		self.with_vauth_credential_timeout(Duration::from_secs(seconds))
	}
}
impl Default for ExchangeOptions {
	fn default() -> Self {
		Self {
			initial_credential_timeout: Self::DEFAULT_TIMEOUT,
			vauth_credential_timeout: Self::DEFAULT_TIMEOUT,
		}
	}
}

fn positive_or_default(timeout: Duration) -> Duration {
	if timeout.is_zero() { ExchangeOptions::DEFAULT_TIMEOUT } else { timeout }
}

mod seconds {
	// self
	use super::*;

	pub(super) fn serialize<S>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(timeout.as_secs())
	}

	pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secs = NonZeroU64::deserialize(deserializer)?;

		Ok(Duration::from_secs(secs.get()))
	}
}
