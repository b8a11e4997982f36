//! Transport primitives for API requests.
//!
//! The module exposes [`HttpTransport`] so downstream crates can plug in a custom HTTP
//! stack (or a scripted one in tests) while the [`Fetcher`](crate::fetch::Fetcher) keeps
//! ownership of authentication, redirect following, and status classification.
//! Transports must hand every response back verbatim; in particular they must not follow
//! redirects on their own.

// std
use std::ops::Deref;
// crates.io
use http::{HeaderMap, header::RETRY_AFTER};
use time::{OffsetDateTime, format_description::well_known::Rfc2822};
// self
use crate::_prelude::*;

/// Outbound request handed to a transport.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Response returned by a transport.
pub type HttpResponse = http::Response<Vec<u8>>;

/// Abstraction over blocking HTTP transports.
///
/// The trait is the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back several clients behind an `Arc`.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request` and returns the raw response, whatever its status.
	fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError>;
}

/// Thin wrapper around a blocking [`reqwest::blocking::Client`] so shared HTTP behavior lives
/// in one place. Redirects are surfaced to the fetcher instead of being followed, so any
/// custom client passed to [`ReqwestHttpClient::with_client`] should disable redirect
/// following as well.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub reqwest::blocking::Client);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds the default client with redirect following disabled.
	pub fn new() -> Result<Self> {
		let client = reqwest::blocking::Client::builder()
			.redirect(reqwest::redirect::Policy::none())
			.build()
			.map_err(crate::error::ConfigError::from)?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest client.
	pub fn with_client(client: reqwest::blocking::Client) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<reqwest::blocking::Client> for ReqwestHttpClient {
	fn as_ref(&self) -> &reqwest::blocking::Client {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = reqwest::blocking::Client;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type TransportError = reqwest::Error;

	fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError> {
		let response = self.0.execute(request.try_into()?)?;
		let status = response.status();
		let headers = response.headers().to_owned();
		let mut response_new = HttpResponse::new(response.bytes()?.to_vec());

		*response_new.status_mut() = status;
		*response_new.headers_mut() = headers;

		Ok(response_new)
	}
}

/// Reads a `Retry-After` header expressed either as delta-seconds or as an RFC 2822 date.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	parse_retry_after_at(headers, OffsetDateTime::now_utc())
}

fn parse_retry_after_at(headers: &HeaderMap, now: OffsetDateTime) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - now;

		if delta.is_positive() {
			return Some(delta.unsigned_abs());
		}
	}

	None
}

/// Flattens response headers into name/value pairs, decoding values lossily.
pub(crate) fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
	headers
		.iter()
		.map(|(name, value)| {
			(name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
		})
		.collect()
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::HeaderValue;
	use time::macros::datetime;
	// self
	use super::*;

	fn retry_after(value: &'static str) -> HeaderMap {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static(value));

		headers
	}

	#[test]
	fn retry_after_accepts_delta_seconds() {
		assert_eq!(parse_retry_after(&retry_after("120")), Some(Duration::from_secs(120)));
		assert_eq!(parse_retry_after(&retry_after(" 7 ")), Some(Duration::from_secs(7)));
	}

	#[test]
	fn retry_after_accepts_future_http_dates() {
		let now = datetime!(2025-01-06 10:00:00 UTC);
		let headers = retry_after("Mon, 06 Jan 2025 10:00:30 +0000");

		assert_eq!(parse_retry_after_at(&headers, now), Some(Duration::from_secs(30)));
	}

	#[test]
	fn retry_after_ignores_past_dates_and_garbage() {
		let now = datetime!(2025-01-06 10:00:00 UTC);

		assert_eq!(
			parse_retry_after_at(&retry_after("Mon, 06 Jan 2025 09:00:00 +0000"), now),
			None
		);
		assert_eq!(parse_retry_after(&retry_after("soon")), None);
		assert_eq!(parse_retry_after(&HeaderMap::new()), None);
	}

	#[test]
	fn header_pairs_keep_every_value() {
		let mut headers = HeaderMap::new();

		headers.append("x-trace", HeaderValue::from_static("a"));
		headers.append("x-trace", HeaderValue::from_static("b"));

		assert_eq!(
			header_pairs(&headers),
			vec![("x-trace".to_owned(), "a".to_owned()), ("x-trace".to_owned(), "b".to_owned())]
		);
	}
}
