//! Name-based construction of concrete exchangers.
//!
//! The mapping is closed: every [`ExchangerName`] variant has exactly one constructor, so adding
//! a token source means adding a variant and extending the exhaustive matches below.

// self
use crate::{
	_prelude::*,
	exchange::Exchanger,
	integrations::github::{GithubConfig, GithubExchanger},
};

/// Token sources that can be selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangerName {
	/// GitHub Actions OIDC.
	Github,
}
impl ExchangerName {
	/// Every selectable exchanger.
	pub const ALL: [ExchangerName; 1] = [ExchangerName::Github];

	/// Returns the canonical (upper-case) name.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangerName::Github => "GITHUB",
		}
	}

	/// Builds the named exchanger from environment values resolved through `lookup`.
	pub fn init_from_lookup<F>(self, lookup: F) -> Result<Exchanger>
	where
		F: FnMut(&str) -> Option<String>,
	{
		match self {
			ExchangerName::Github =>
				Ok(GithubExchanger::from_config(GithubConfig::from_lookup(lookup)?).into_dyn()),
		}
	}

	/// Builds the named exchanger from the process environment.
	pub fn init_from_env(self) -> Result<Exchanger> {
		self.init_from_lookup(|name| std::env::var(name).ok())
	}
}
impl Display for ExchangerName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ExchangerName {
	type Err = Error;

	/// Matches case-insensitively; failures carry the input exactly as given.
	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|name| name.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| Error::UnrecognizedExchanger { name: s.to_owned() })
	}
}

/// Resolves `name` and builds that exchanger from the process environment.
pub fn init_exchanger_from_env(name: &str) -> Result<Exchanger> {
	name.parse::<ExchangerName>()?.init_from_env()
}
