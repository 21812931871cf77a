//! Exchange-level error types shared across the orchestrator, token sources, and registry.

// self
use crate::{_prelude::*, obs::ExchangeStage};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical exchange error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem raised before any network I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Upstream responded with a non-success HTTP status.
	#[error("Failed to fetch {} (HTTP {status})", .stage.subject())]
	UpstreamStatus {
		/// Stage that received the response.
		stage: ExchangeStage,
		/// Numeric HTTP status code.
		status: u16,
	},
	/// Authority response does not carry the recognized credential content type.
	#[error(
		"VeraId credential response has invalid content type ({})",
		.observed.as_deref().unwrap_or("none")
	)]
	InvalidContentType {
		/// Observed `Content-Type` header value, if the header was present.
		observed: Option<String>,
	},
	/// Local deadline elapsed before the stage completed.
	#[error("Request to fetch {} hit the {timeout:?} timeout", .stage.subject())]
	Timeout {
		/// Stage that timed out.
		stage: ExchangeStage,
		/// Deadline that was exceeded.
		timeout: Duration,
	},
	/// Transport failure (DNS, TCP, TLS, body read).
	#[error("Network error occurred while fetching {}", .stage.subject())]
	Transport {
		/// Stage that failed.
		stage: ExchangeStage,
		/// Underlying transport failure.
		#[source]
		source: BoxError,
	},
	/// Requested exchanger name has no implementation.
	#[error("Unrecognised exchanger ({name})")]
	UnrecognizedExchanger {
		/// Original, non-normalized input.
		name: String,
	},
}
impl Error {
	/// Returns the network stage that produced this error, if any.
	pub fn stage(&self) -> Option<ExchangeStage> {
		match self {
			Self::UpstreamStatus { stage, .. }
			| Self::Timeout { stage, .. }
			| Self::Transport { stage, .. } => Some(*stage),
			Self::InvalidContentType { .. } => Some(ExchangeStage::Authority),
			Self::Config(_) | Self::UnrecognizedExchanger { .. } => None,
		}
	}

	/// Returns true when the failure was caused by an elapsed deadline.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Self::Timeout { .. })
	}

	/// Classifies a reqwest failure raised while `stage` was in flight.
	pub(crate) fn from_reqwest(stage: ExchangeStage, timeout: Duration, e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::Timeout { stage, timeout }
		} else {
			Self::Transport { stage, source: Box::new(e) }
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required environment variable is unset or empty.
	#[error("{name} must be set")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Token-source request URL cannot be parsed.
	#[error("Token request URL `{url}` is invalid.")]
	InvalidRequestUrl {
		/// URL that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn messages_embed_diagnostic_context() {
		let err = Error::UpstreamStatus { stage: ExchangeStage::Authority, status: 400 };

		assert_eq!(err.to_string(), "Failed to fetch VeraId credential (HTTP 400)");

		let err = Error::UpstreamStatus { stage: ExchangeStage::TokenSource, status: 401 };

		assert_eq!(err.to_string(), "Failed to fetch JWT (HTTP 401)");

		let err = Error::InvalidContentType { observed: Some("text/html".into()) };

		assert_eq!(
			err.to_string(),
			"VeraId credential response has invalid content type (text/html)"
		);

		let err = Error::InvalidContentType { observed: None };

		assert_eq!(err.to_string(), "VeraId credential response has invalid content type (none)");
	}

	#[test]
	fn timeout_errors_mention_timeout() {
		let err =
			Error::Timeout { stage: ExchangeStage::TokenSource, timeout: Duration::from_secs(3) };

		assert!(err.is_timeout());
		assert!(err.to_string().contains("timeout"));
		assert_eq!(err.stage(), Some(ExchangeStage::TokenSource));
	}

	#[test]
	fn config_errors_name_the_variable() {
		let err: Error = ConfigError::MissingEnv { name: "ACTIONS_ID_TOKEN_REQUEST_URL" }.into();

		assert_eq!(err.to_string(), "ACTIONS_ID_TOKEN_REQUEST_URL must be set");
		assert_eq!(err.stage(), None);
	}
}
