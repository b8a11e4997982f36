//! Fully resolved request URLs.

// self
use crate::{_prelude::*, error::ConfigError, request::QueryParams};

/// Absolute URL of one outbound GET.
///
/// Built from the base URL, a resource path, and form-encoded query parameters. A redirect
/// replaces the whole target with the resolved `Location`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestTarget {
	url: Url,
}
impl RequestTarget {
	/// Joins `base` and `path` textually and appends `params` as a query string.
	///
	/// The base URL keeps its own path prefix (e.g. `/api/v2`); a trailing `/` on the base is
	/// dropped before `path` is appended. No query string is emitted for empty `params`.
	pub fn new(base: &Url, path: &str, params: &QueryParams) -> Result<Self> {
		let raw = format!("{}{}", base.as_str().trim_end_matches('/'), path);
		let mut url = Url::parse(&raw).map_err(|e| ConfigError::invalid_url(&raw, e))?;

		if !params.is_empty() {
			url.query_pairs_mut().extend_pairs(params.iter());
		}

		Ok(Self { url })
	}

	/// Resolves a redirect `location` relative to this target.
	pub fn redirect(&self, location: &str) -> Result<Self> {
		let url = self.url.join(location).map_err(|e| ConfigError::invalid_url(location, e))?;

		Ok(Self { url })
	}

	/// Target URL.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Path component, used for span fields.
	pub fn path(&self) -> &str {
		self.url.path()
	}
}
impl From<Url> for RequestTarget {
	fn from(url: Url) -> Self {
		Self { url }
	}
}
impl Display for RequestTarget {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.url.as_str())
	}
}
