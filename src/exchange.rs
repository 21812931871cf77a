//! Exchange orchestration: header acquisition, bounded authority fetch, response validation.
//!
//! [`Exchanger`] owns the fixed algorithm while the way an `Authorization` header is obtained
//! is injected through [`AuthHeaderSource`]. [`JwtBearer`] narrows that extension point for
//! identity providers that mint JWTs, leaving only [`JwtSource::fetch_jwt`] to implement.

pub mod jwt;
pub mod options;

pub use jwt::*;
pub use options::*;

// crates.io
use reqwest::header::CONTENT_TYPE;
// self
use crate::{
	_prelude::*,
	credential::{Credential, CredentialType},
	http::ReqwestHttpClient,
	obs::{self, ExchangeStage},
};

/// Boxed future returned by header and token sources.
pub type SourceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Produces the `Authorization` header value presented to the authority.
///
/// Implementations may perform their own network I/O but must respect `timeout`. Errors are
/// propagated to the caller of [`Exchanger::exchange`] unchanged.
pub trait AuthHeaderSource
where
	Self: 'static + Send + Sync,
{
	/// Generates the header value for a request to `authority_url`.
	fn generate_auth_header<'a>(
		&'a self,
		authority_url: &'a Url,
		timeout: Duration,
	) -> SourceFuture<'a, String>;
}

/// Exchanges credentials from an [`AuthHeaderSource`] for VeraId credentials.
///
/// The exchanger holds no per-call state, so a single instance (or its clones) can serve any
/// number of concurrent exchanges. Each call performs exactly one authority request on top of
/// whatever the header source does.
pub struct Exchanger<S = dyn AuthHeaderSource>
where
	S: ?Sized + AuthHeaderSource,
{
	source: Arc<S>,
	http_client: ReqwestHttpClient,
}
impl<S> Exchanger<S>
where
	S: ?Sized + AuthHeaderSource,
{
	/// Creates an exchanger around a shared source, backed by the default reqwest transport.
	pub fn from_arc(source: Arc<S>) -> Self {
		Self { source, http_client: ReqwestHttpClient::default() }
	}

	/// Replaces the transport used for the authority request.
	pub fn with_http_client(mut self, http_client: impl Into<ReqwestHttpClient>) -> Self {
		self.http_client = http_client.into();

		self
	}

	/// Returns the header source.
	pub fn source(&self) -> &S {
		&self.source
	}

	/// Exchanges the source's credential for a VeraId credential issued by `authority_url`.
	pub async fn exchange(
		&self,
		authority_url: &Url,
		options: ExchangeOptions,
	) -> Result<Credential> {
		let authorization = self
			.source
			.generate_auth_header(authority_url, options.initial_credential_timeout())
			.await?;

		obs::observe_stage(
			ExchangeStage::Authority,
			"exchange",
			self.fetch_credential(authority_url, &authorization, options.vauth_credential_timeout()),
		)
		.await
	}

	async fn fetch_credential(
		&self,
		authority_url: &Url,
		authorization: &str,
		timeout: Duration,
	) -> Result<Credential> {
		const STAGE: ExchangeStage = ExchangeStage::Authority;

		let response = self
			.http_client
			.bounded_get(STAGE, authority_url.clone(), authorization, timeout)
			.await?;
		let status = response.status();

		if !status.is_success() {
			return Err(Error::UpstreamStatus { stage: STAGE, status: status.as_u16() });
		}

		let kind = match response.headers().get(CONTENT_TYPE) {
			Some(value) => String::from_utf8_lossy(value.as_bytes()).parse::<CredentialType>()?,
			None => return Err(Error::InvalidContentType { observed: None }),
		};
		let bytes = response.bytes().await.map_err(|e| Error::from_reqwest(STAGE, timeout, e))?;

		Ok(Credential::new(bytes.to_vec(), kind))
	}
}
impl<S> Exchanger<S>
where
	S: AuthHeaderSource,
{
	/// Creates an exchanger backed by the default reqwest transport.
	pub fn new(source: S) -> Self {
		Self::from_arc(Arc::new(source))
	}

	/// Erases the concrete source type.
	pub fn into_dyn(self) -> Exchanger {
		let source: Arc<dyn AuthHeaderSource> = self.source;

		Exchanger { source, http_client: self.http_client }
	}
}
impl<S> Clone for Exchanger<S>
where
	S: ?Sized + AuthHeaderSource,
{
	fn clone(&self) -> Self {
		Self { source: Arc::clone(&self.source), http_client: self.http_client.clone() }
	}
}
impl<S> Debug for Exchanger<S>
where
	S: ?Sized + AuthHeaderSource,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Exchanger").field("http_client", &self.http_client).finish_non_exhaustive()
	}
}
