//! Trade CI identity tokens for short-lived VeraId Authority credentials.
//!
//! An [`Exchanger`] resolves an `Authorization` header through a pluggable
//! [`AuthHeaderSource`], fetches the credential from the authority within a bounded deadline,
//! and hands back a typed [`Credential`] once the response passes strict validation.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod credential;
pub mod error;
pub mod exchange;
pub mod http;
pub mod integrations;
pub mod obs;
pub mod registry;
pub mod secret;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, serde_json as _, tokio as _};

pub use credential::{Credential, CredentialType};
pub use exchange::{AuthHeaderSource, ExchangeOptions, Exchanger, JwtBearer, JwtSource};
pub use integrations::github::{GithubConfig, GithubExchanger, GithubTokenSource};
pub use registry::{ExchangerName, init_exchanger_from_env};
