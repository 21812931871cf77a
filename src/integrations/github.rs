//! GitHub Actions OIDC token source.
//!
//! Jobs granted `id-token: write` receive `ACTIONS_ID_TOKEN_REQUEST_URL` (which already carries a
//! query string) and `ACTIONS_ID_TOKEN_REQUEST_TOKEN`. The token source appends the requested
//! audience to that URL and authenticates with the request token to obtain a signed JWT.

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	exchange::{Exchanger, JwtBearer, JwtSource, SourceFuture},
	http::ReqwestHttpClient,
	obs::{self, ExchangeStage},
	secret::TokenSecret,
};

/// Environment variable holding the token endpoint URL.
pub const REQUEST_URL_ENV: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";
/// Environment variable holding the request token.
pub const REQUEST_TOKEN_ENV: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";

/// Exchanger that trades GitHub Actions OIDC tokens for VeraId credentials.
pub type GithubExchanger = Exchanger<JwtBearer<GithubTokenSource>>;
impl GithubExchanger {
	/// Builds an exchanger from an explicit GitHub configuration.
	pub fn from_config(config: GithubConfig) -> Self {
		Exchanger::new(JwtBearer::new(GithubTokenSource::from_config(config)))
	}

	/// Builds an exchanger from the GitHub Actions environment.
	pub fn from_env() -> Result<Self> {
		Ok(Self::from_config(GithubConfig::from_env()?))
	}
}

/// Connection details for the GitHub Actions OIDC token endpoint.
///
/// Only deserialization is supported so the request token is never written back out.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GithubConfig {
	/// Token endpoint URL (`ACTIONS_ID_TOKEN_REQUEST_URL`).
	pub request_url: String,
	/// Bearer token authenticating to the endpoint (`ACTIONS_ID_TOKEN_REQUEST_TOKEN`).
	pub token: TokenSecret,
}
impl GithubConfig {
	/// Creates a configuration from explicit values.
	pub fn new(request_url: impl Into<String>, token: impl Into<TokenSecret>) -> Self {
		Self { request_url: request_url.into(), token: token.into() }
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`; unset and empty values are both missing.
	///
	/// The URL is checked before the token and each failure names its own variable.
	pub fn from_lookup<F>(mut lookup: F) -> Result<Self>
	where
		F: FnMut(&str) -> Option<String>,
	{
		let mut require = |name: &'static str| {
			lookup(name).filter(|value| !value.is_empty()).ok_or(ConfigError::MissingEnv { name })
		};
		let request_url = require(REQUEST_URL_ENV)?;
		let token = require(REQUEST_TOKEN_ENV)?;

		Ok(Self::new(request_url, token))
	}
}

/// [`JwtSource`] backed by the GitHub Actions OIDC token endpoint.
#[derive(Clone, Debug)]
pub struct GithubTokenSource {
	config: GithubConfig,
	http_client: ReqwestHttpClient,
}
impl GithubTokenSource {
	/// Creates a token source for `request_url`, authenticating with `token`.
	pub fn new(request_url: impl Into<String>, token: impl Into<TokenSecret>) -> Self {
		Self::from_config(GithubConfig::new(request_url, token))
	}

	/// Creates a token source from an explicit configuration.
	pub fn from_config(config: GithubConfig) -> Self {
		Self { config, http_client: ReqwestHttpClient::default() }
	}

	/// Creates a token source from the GitHub Actions environment.
	pub fn from_env() -> Result<Self> {
		Ok(Self::from_config(GithubConfig::from_env()?))
	}

	/// Replaces the transport used for token requests.
	pub fn with_http_client(mut self, http_client: impl Into<ReqwestHttpClient>) -> Self {
		self.http_client = http_client.into();

		self
	}

	/// Returns the configuration backing this source.
	pub fn config(&self) -> &GithubConfig {
		&self.config
	}

	/// Builds the token request URL for `audience`.
	///
	/// The audience is appended verbatim because the configured URL already ends with a query.
	pub fn token_request_url(&self, audience: &str) -> Result<Url> {
		let raw = format!("{}&audience={audience}", self.config.request_url);

		Url::parse(&raw).map_err(|source| ConfigError::InvalidRequestUrl { url: raw, source }.into())
	}

	async fn request_jwt(&self, audience: &str, timeout: Duration) -> Result<String> {
		const STAGE: ExchangeStage = ExchangeStage::TokenSource;

		let url = self.token_request_url(audience)?;
		let authorization = format!("Bearer {}", self.config.token.expose());
		let response = self.http_client.bounded_get(STAGE, url, &authorization, timeout).await?;
		let status = response.status();

		if !status.is_success() {
			return Err(Error::UpstreamStatus { stage: STAGE, status: status.as_u16() });
		}

		response.text().await.map_err(|e| Error::from_reqwest(STAGE, timeout, e))
	}
}
impl JwtSource for GithubTokenSource {
	fn fetch_jwt<'a>(&'a self, audience: &'a str, timeout: Duration) -> SourceFuture<'a, String> {
		Box::pin(obs::observe_stage(
			ExchangeStage::TokenSource,
			"fetch_jwt",
			self.request_jwt(audience, timeout),
		))
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	const REQUEST_URL: &str = "https://github.example.com/token?api-version=2.0";
	const TOKEN: &str = "github-token-123";

	fn lookup(vars: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
		let vars: HashMap<String, String> =
			vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();

		move |name| vars.get(name).cloned()
	}

	#[test]
	fn missing_url_is_reported_regardless_of_token() {
		for vars in [&[][..], &[(REQUEST_TOKEN_ENV, TOKEN)][..]] {
			let err = GithubConfig::from_lookup(lookup(vars))
				.expect_err("Missing request URL should fail.");

			assert_eq!(err.to_string(), "ACTIONS_ID_TOKEN_REQUEST_URL must be set");
		}
	}

	#[test]
	fn missing_or_empty_token_is_reported() {
		for token in [None, Some("")] {
			let mut vars = vec![(REQUEST_URL_ENV, REQUEST_URL)];

			if let Some(token) = token {
				vars.push((REQUEST_TOKEN_ENV, token));
			}

			let err = GithubConfig::from_lookup(lookup(&vars))
				.expect_err("Missing request token should fail.");

			assert!(matches!(
				err,
				Error::Config(ConfigError::MissingEnv { name: "ACTIONS_ID_TOKEN_REQUEST_TOKEN" })
			));
		}
	}

	#[test]
	fn complete_environment_builds_config() {
		let config = GithubConfig::from_lookup(lookup(&[
			(REQUEST_URL_ENV, REQUEST_URL),
			(REQUEST_TOKEN_ENV, TOKEN),
		]))
		.expect("Complete environment should build a config.");

		assert_eq!(config.request_url, REQUEST_URL);
		assert_eq!(config.token.expose(), TOKEN);
		assert!(!format!("{config:?}").contains(TOKEN));
	}

	#[test]
	fn config_deserializes_with_redacted_token() {
		let config: GithubConfig = serde_json::from_str(&format!(
			r#"{{"request_url":"{REQUEST_URL}","token":"{TOKEN}"}}"#
		))
		.expect("Config JSON should deserialize.");

		assert_eq!(config, GithubConfig::new(REQUEST_URL, TOKEN));
		assert!(!format!("{config:?}").contains(TOKEN));
	}

	#[test]
	fn token_request_url_appends_audience() {
		let source = GithubTokenSource::new(REQUEST_URL, TOKEN);
		let url = source
			.token_request_url("the-audience")
			.expect("Token request URL should parse.");

		assert_eq!(url.as_str(), format!("{REQUEST_URL}&audience=the-audience"));
	}

	#[test]
	fn unparsable_request_url_is_a_config_error() {
		let source = GithubTokenSource::new("not a url", TOKEN);
		let err = source.token_request_url("aud").expect_err("Relative URLs should be rejected.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidRequestUrl { .. })));
	}
}
