//! Client identifier/secret pair and its Basic `Authorization` encoding.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE};
// self
use crate::{_prelude::*, auth::ClientSecret};

/// API credentials issued for one shop.
///
/// The pair is immutable; the encoded Basic token is derived lazily by
/// [`Credentials::basic_token`] and cached for the lifetime of the value.
#[derive(Serialize, Deserialize)]
pub struct Credentials {
	/// Client (login) identifier.
	pub client_id: String,
	/// Client secret (API key).
	pub client_secret: ClientSecret,
	#[serde(skip)]
	token_cache: OnceLock<String>,
}
impl Credentials {
	/// Creates credentials from an identifier and secret.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<ClientSecret>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			token_cache: OnceLock::new(),
		}
	}

	/// URL-safe base64 (padded) encoding of `client_id:client_secret`.
	///
	/// Computed on first call and reused afterwards.
	pub fn basic_token(&self) -> &str {
		self.token_cache.get_or_init(|| {
			URL_SAFE.encode(format!("{}:{}", self.client_id, self.client_secret.expose()))
		})
	}

	/// Full `Authorization` header value (`Basic <token>`).
	pub fn authorization_header(&self) -> String {
		format!("Basic {}", self.basic_token())
	}
}
impl Clone for Credentials {
	fn clone(&self) -> Self {
		Self::new(self.client_id.clone(), self.client_secret.clone())
	}
}
impl PartialEq for Credentials {
	fn eq(&self, other: &Self) -> bool {
		self.client_id == other.client_id && self.client_secret == other.client_secret
	}
}
impl Eq for Credentials {}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}
