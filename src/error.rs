//! Client-level error types shared across fetches, pagination, and configuration.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A `200` response body was not a JSON object, or an item did not match the requested
	/// type.
	#[error("JSON could not be decoded at `{path}`.")]
	Decode {
		/// JSON path of the failing value (`.` for the document root).
		path: String,
		/// Underlying decoding failure.
		#[source]
		source: serde_json::Error,
	},

	/// The API answered with a status the client does not classify.
	#[error("{status}: {body}: {}", format_headers(.headers))]
	UnknownError {
		/// HTTP status code.
		status: u16,
		/// Raw response body (lossy UTF-8).
		body: String,
		/// Every response header as a name/value pair.
		headers: Vec<(String, String)>,
	},
	/// The API rate limit was hit (HTTP 429); the caller decides when to retry.
	#[error("API rate limit exceeded.")]
	TooManyRequests {
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// The redirect chain exceeded the configured hop budget.
	#[error("Exceeded the limit of {limit} redirects.")]
	TooManyRedirects {
		/// Maximum number of redirect hops that were allowed.
		limit: u8,
	},
	/// A redirect response carried no usable `Location` header.
	#[error("Redirect response has no usable Location header: {location:?}.")]
	InvalidRedirect {
		/// Raw header value, when present.
		location: Option<String>,
	},
}
impl Error {
	/// Returns the HTTP status behind the error, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::UnknownError { status, .. } => Some(*status),
			Self::TooManyRequests { .. } => Some(429),
			Self::InvalidRedirect { .. } => Some(301),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// A URL could not be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// The offending URL string.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL lacks a host component.
	#[error("Base URL `{url}` has no host.")]
	MissingHost {
		/// The offending URL string.
		url: String,
	},
	/// Base URL does not use HTTPS.
	#[error("Base URL `{url}` must use https.")]
	InsecureBaseUrl {
		/// The offending URL string.
		url: String,
	},

	/// Builder finished without a base URL.
	#[error("Client builder is missing a base URL.")]
	MissingBaseUrl,
	/// Builder finished without credentials.
	#[error("Client builder is missing credentials.")]
	MissingCredentials,
	/// Credentials contain characters that cannot travel in a header.
	#[error("Credentials cannot be encoded into an Authorization header.")]
	InvalidCredentials,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	pub(crate) fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
		Self::InvalidUrl { url: url.into(), source }
	}
}
impl From<serde_json::Error> for Error {
	fn from(e: serde_json::Error) -> Self {
		Self::Decode { path: ".".into(), source: e }
	}
}
impl From<serde_path_to_error::Error<serde_json::Error>> for Error {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		Self::Decode { path: e.path().to_string(), source: e.into_inner() }
	}
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// URL of the failed request.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(url: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { url: url.into(), source: Box::new(src) }
	}
}

fn format_headers(headers: &[(String, String)]) -> String {
	let pairs = headers.iter().map(|(name, value)| format!("[{name:?}, {value:?}]"));

	format!("[{}]", pairs.collect::<Vec<_>>().join(", "))
}
