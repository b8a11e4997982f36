//! Authenticated GET with bounded redirect following and status classification.
//!
//! [`Fetcher::fetch`] issues one logical request: it attaches the Basic `Authorization`
//! header, follows `301` responses up to the configured hop budget, and maps every other
//! status onto the crate's error taxonomy. Nothing is retried; a `429` is surfaced as
//! [`Error::TooManyRequests`] so callers can apply their own backoff.

// crates.io
use http::{
	HeaderValue, Method, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE, LOCATION},
};
// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::{ConfigError, TransportError},
	http::{self as transport, HttpRequest, HttpResponse, HttpTransport},
	obs::{self, FetchOutcome, FetchSpan, FetchStage},
	page::Page,
	request::{QueryParams, RequestTarget},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Default number of redirect hops followed before giving up.
pub const DEFAULT_MAX_REDIRECTS: u8 = 4;

/// Issues authenticated requests against one API base URL.
///
/// The fetcher owns its credentials and the Basic token derived from them; the token is
/// encoded on the first request and reused for every later one.
pub struct Fetcher<C = DefaultTransport>
where
	C: ?Sized + HttpTransport,
{
	base_url: Url,
	credentials: Credentials,
	http_client: Arc<C>,
	max_redirects: u8,
}

/// Transport used when none is specified.
#[cfg(feature = "reqwest")]
pub type DefaultTransport = ReqwestHttpClient;
/// Transport used when none is specified.
#[cfg(not(feature = "reqwest"))]
pub type DefaultTransport = dyn HttpTransport<TransportError = TransportError>;

impl<C> Fetcher<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a fetcher for `base_url` with the default redirect budget.
	pub fn new(base_url: Url, credentials: Credentials, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			base_url,
			credentials,
			http_client: http_client.into(),
			max_redirects: DEFAULT_MAX_REDIRECTS,
		}
	}

	/// Overrides the number of redirect hops followed before failing.
	pub fn with_max_redirects(mut self, max_redirects: u8) -> Self {
		self.max_redirects = max_redirects;

		self
	}

	/// API base URL every path is appended to.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Credentials attached to every request.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Redirect hop budget.
	pub fn max_redirects(&self) -> u8 {
		self.max_redirects
	}

	/// Builds the target for `path` + `params` under the base URL.
	pub fn target(&self, path: &str, params: &QueryParams) -> Result<RequestTarget> {
		RequestTarget::new(&self.base_url, path, params)
	}

	/// Fetches `path` with `params` and returns the decoded page.
	pub fn get(&self, path: &str, params: &QueryParams) -> Result<Page> {
		self.get_staged(FetchStage::Get, path, params)
	}

	/// Performs one logical GET against `target`, following redirects.
	pub fn fetch(&self, target: RequestTarget) -> Result<Page> {
		self.fetch_staged(FetchStage::Get, target)
	}

	pub(crate) fn get_staged(
		&self,
		stage: FetchStage,
		path: &str,
		params: &QueryParams,
	) -> Result<Page> {
		self.fetch_staged(stage, self.target(path, params)?)
	}

	fn fetch_staged(&self, stage: FetchStage, target: RequestTarget) -> Result<Page> {
		let _span = FetchSpan::new(stage, target.path()).entered();
		let mut target = target;
		let mut redirects = 0_u8;

		loop {
			let response = self.execute(&target).inspect_err(|_| {
				obs::record_fetch_outcome(FetchOutcome::Failure);
			})?;

			match response.status() {
				StatusCode::OK => {
					let page = decode_page(response.body()).inspect_err(|_| {
						obs::record_fetch_outcome(FetchOutcome::Failure);
					})?;

					obs::record_fetch_outcome(FetchOutcome::Success);

					return Ok(page.with_code(StatusCode::OK.as_u16()));
				},
				StatusCode::MOVED_PERMANENTLY => {
					if redirects >= self.max_redirects {
						obs::record_fetch_outcome(FetchOutcome::Failure);

						return Err(Error::TooManyRedirects { limit: self.max_redirects });
					}

					target = redirect_target(&target, &response).inspect_err(|_| {
						obs::record_fetch_outcome(FetchOutcome::Failure);
					})?;
					redirects += 1;

					obs::record_fetch_outcome(FetchOutcome::Redirect);
					obs::trace_redirect(redirects, target.url().as_str());
				},
				StatusCode::TOO_MANY_REQUESTS => {
					obs::record_fetch_outcome(FetchOutcome::RateLimited);

					return Err(Error::TooManyRequests {
						retry_after: transport::parse_retry_after(response.headers()),
					});
				},
				status => {
					obs::record_fetch_outcome(FetchOutcome::Failure);

					return Err(Error::UnknownError {
						status: status.as_u16(),
						body: String::from_utf8_lossy(response.body()).into_owned(),
						headers: transport::header_pairs(response.headers()),
					});
				},
			}
		}
	}

	fn execute(&self, target: &RequestTarget) -> Result<HttpResponse> {
		let request = self.build_request(target)?;

		self.http_client
			.execute(request)
			.map_err(|e| TransportError::network(target.url().as_str(), e).into())
	}

	fn build_request(&self, target: &RequestTarget) -> Result<HttpRequest> {
		let authorization = HeaderValue::from_str(&self.credentials.authorization_header())
			.map_err(|_| ConfigError::InvalidCredentials)?;
		let request = http::Request::builder()
			.method(Method::GET)
			.uri(target.url().as_str())
			.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
			.header(AUTHORIZATION, authorization)
			.body(Vec::new())
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl Fetcher<ReqwestHttpClient> {
	/// Creates a fetcher backed by the default reqwest transport.
	pub fn with_reqwest(base_url: Url, credentials: Credentials) -> Result<Self> {
		Ok(Self::new(base_url, credentials, ReqwestHttpClient::new()?))
	}
}
impl<C> Debug for Fetcher<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Fetcher")
			.field("base_url", &self.base_url.as_str())
			.field("credentials", &self.credentials)
			.field("max_redirects", &self.max_redirects)
			.finish()
	}
}

fn decode_page(body: &[u8]) -> Result<Page> {
	let mut de = serde_json::Deserializer::from_slice(body);
	let fields: Map<String, Value> = serde_path_to_error::deserialize(&mut de)?;

	de.end()?;

	Ok(Page::new(fields))
}

fn redirect_target(current: &RequestTarget, response: &HttpResponse) -> Result<RequestTarget> {
	let location = response.headers().get(LOCATION);
	let Some(raw) = location.and_then(|value| value.to_str().ok()) else {
		return Err(Error::InvalidRedirect {
			location: location.map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned()),
		});
	};

	current
		.redirect(raw)
		.map_err(|_| Error::InvalidRedirect { location: Some(raw.to_owned()) })
}
