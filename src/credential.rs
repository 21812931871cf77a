//! Typed credentials returned by the VeraId Authority.

// self
use crate::_prelude::*;

/// Closed taxonomy of credential content types issued by the authority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialType {
	/// Organisation signature bundle.
	#[serde(rename = "application/vnd.veraid.signature-bundle")]
	OrgSignatureBundle,
}
impl CredentialType {
	/// Every recognized credential type.
	pub const ALL: [CredentialType; 1] = [CredentialType::OrgSignatureBundle];

	/// Returns the media type the authority uses for this credential.
	pub const fn as_str(self) -> &'static str {
		match self {
			CredentialType::OrgSignatureBundle => "application/vnd.veraid.signature-bundle",
		}
	}
}
impl Display for CredentialType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for CredentialType {
	type Err = Error;

	/// Matches the media type exactly; parameters, casing, or whitespace variants are rejected.
	fn from_str(s: &str) -> Result<Self> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.ok_or_else(|| Error::InvalidContentType { observed: Some(s.to_owned()) })
	}
}

/// Serialized credential handed back by a successful exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	bytes: Vec<u8>,
	kind: CredentialType,
}
impl Credential {
	pub(crate) fn new(bytes: Vec<u8>, kind: CredentialType) -> Self {
		Self { bytes, kind }
	}

	/// Raw credential payload exactly as returned by the authority.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Content type of the credential.
	pub fn kind(&self) -> CredentialType {
		self.kind
	}

	/// Consumes the credential, returning the raw payload.
	pub fn into_bytes(self) -> Vec<u8> {
		self.bytes
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("kind", &self.kind)
			.field("len", &self.bytes.len())
			.finish()
	}
}
