//! JWT-bearer specialization of the header extension point.

// self
use crate::{
	_prelude::*,
	exchange::{AuthHeaderSource, SourceFuture},
};

/// Supplies JWTs minted by an external identity provider.
///
/// Implementations may perform network I/O but must finish within `timeout`.
pub trait JwtSource
where
	Self: 'static + Send + Sync,
{
	/// Fetches a JWT whose audience is `audience`.
	fn fetch_jwt<'a>(&'a self, audience: &'a str, timeout: Duration) -> SourceFuture<'a, String>;
}

/// Adapts any [`JwtSource`] into an [`AuthHeaderSource`] producing `Bearer <jwt>` headers.
///
/// The audience requested from the source is always the authority URL the header is for.
#[derive(Clone, Debug, Default)]
pub struct JwtBearer<J>(pub J);
impl<J> JwtBearer<J>
where
	J: JwtSource,
{
	/// Wraps a JWT source.
	pub fn new(source: J) -> Self {
		Self(source)
	}

	/// Returns the wrapped JWT source.
	pub fn source(&self) -> &J {
		&self.0
	}
}
impl<J> AuthHeaderSource for JwtBearer<J>
where
	J: JwtSource,
{
	fn generate_auth_header<'a>(
		&'a self,
		authority_url: &'a Url,
		timeout: Duration,
	) -> SourceFuture<'a, String> {
		Box::pin(async move {
			let jwt = self.0.fetch_jwt(authority_url.as_str(), timeout).await?;

			Ok(format!("Bearer {jwt}"))
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::Mutex;
	// self
	use super::*;
	use crate::obs::ExchangeStage;

	const JWT: &str = "header.payload.signature";

	#[derive(Default)]
	struct RecordingSource {
		fail: bool,
		calls: Mutex<Vec<(String, Duration)>>,
	}
	impl JwtSource for RecordingSource {
		fn fetch_jwt<'a>(
			&'a self,
			audience: &'a str,
			timeout: Duration,
		) -> SourceFuture<'a, String> {
			Box::pin(async move {
				self.calls
					.lock()
					.expect("Recording mutex should not be poisoned.")
					.push((audience.to_owned(), timeout));

				if self.fail {
					Err(Error::UpstreamStatus { stage: ExchangeStage::TokenSource, status: 401 })
				} else {
					Ok(JWT.to_owned())
				}
			})
		}
	}

	fn authority_url() -> Url {
		Url::parse("https://vauth.example.com/credentials/id-123")
			.expect("Static authority URL should parse.")
	}

	#[tokio::test]
	async fn header_is_bearer_jwt_with_authority_audience() {
		let bearer = JwtBearer::new(RecordingSource::default());
		let timeout = Duration::from_millis(42);
		let header = bearer
			.generate_auth_header(&authority_url(), timeout)
			.await
			.expect("Header generation should succeed.");

		assert_eq!(header, format!("Bearer {JWT}"));

		let calls = bearer.source().calls.lock().expect("Recording mutex should not be poisoned.");

		assert_eq!(calls.as_slice(), [(authority_url().to_string(), timeout)]);
	}

	#[tokio::test]
	async fn source_failures_propagate_unchanged() {
		let bearer = JwtBearer::new(RecordingSource { fail: true, ..Default::default() });
		let err = bearer
			.generate_auth_header(&authority_url(), Duration::from_secs(1))
			.await
			.expect_err("Source failures should surface.");

		assert!(matches!(
			err,
			Error::UpstreamStatus { stage: ExchangeStage::TokenSource, status: 401 }
		));
	}
}
