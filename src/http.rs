//! Transport primitives shared by every network stage.
//!
//! Both the token-source fetch and the authority fetch go through
//! [`ReqwestHttpClient::bounded_get`], which stamps the fixed [`USER_AGENT`], marks the
//! `Authorization` header as sensitive, and enforces a local deadline covering the whole round
//! trip (connect, headers, and body).

// std
use std::ops::Deref;
// crates.io
use reqwest::{
	Response,
	header::{AUTHORIZATION, HeaderValue, USER_AGENT as USER_AGENT_HEADER},
};
// self
use crate::{_prelude::*, obs::ExchangeStage};

/// `User-Agent` sent on every outbound request.
pub const USER_AGENT: &str = concat!("VeraId-Authority-Credential-RS/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Cloning is cheap and clones share the underlying connection pool; no request state is kept
/// between calls.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Issues a `GET` to `url` that must complete within `timeout`.
	///
	/// The response is returned for any status; status and header validation belong to the
	/// caller. Transport failures are classified as [`Error::Timeout`] or
	/// [`Error::Transport`] for `stage`.
	pub async fn bounded_get(
		&self,
		stage: ExchangeStage,
		url: Url,
		authorization: &str,
		timeout: Duration,
	) -> Result<Response> {
		let mut authorization = HeaderValue::from_str(authorization)
			.map_err(|e| Error::Transport { stage, source: Box::new(e) })?;

		authorization.set_sensitive(true);

		self.0
			.get(url)
			.header(AUTHORIZATION, authorization)
			.header(USER_AGENT_HEADER, USER_AGENT)
			.timeout(timeout)
			.send()
			.await
			.map_err(|e| Error::from_reqwest(stage, timeout, e))
	}
}
impl From<ReqwestClient> for ReqwestHttpClient {
	fn from(client: ReqwestClient) -> Self {
		Self::with_client(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
