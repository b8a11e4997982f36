//! Builder and serializable configuration for [`Client`].

// self
use crate::{
	_prelude::*,
	auth::{ClientSecret, Credentials},
	client::Client,
	error::ConfigError,
	fetch::{DEFAULT_MAX_REDIRECTS, Fetcher},
	http::HttpTransport,
};

/// Client settings in a shape applications can deserialize from their own config files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
	/// API base URL, e.g. `https://shop.admin.upgates.com/api/v2`.
	pub base_url: String,
	/// API login.
	pub client_id: String,
	/// API key.
	pub client_secret: ClientSecret,
	/// Redirect hops followed before failing.
	#[serde(default = "default_max_redirects")]
	pub max_redirects: u8,
	/// Accept plain `http` base URLs (local proxies, tests).
	#[serde(default)]
	pub allow_http: bool,
}

/// Step-by-step [`Client`] construction with base URL validation.
#[derive(Clone, Debug)]
pub struct ClientBuilder {
	base_url: Option<String>,
	credentials: Option<Credentials>,
	max_redirects: u8,
	allow_http: bool,
}
impl ClientBuilder {
	/// Creates an empty builder with the default redirect budget.
	pub fn new() -> Self {
		Self {
			base_url: None,
			credentials: None,
			max_redirects: DEFAULT_MAX_REDIRECTS,
			allow_http: false,
		}
	}

	/// Seeds a builder from deserialized settings.
	pub fn from_config(config: ClientConfig) -> Self {
		Self::new()
			.base_url(config.base_url)
			.credentials(config.client_id, config.client_secret)
			.max_redirects(config.max_redirects)
			.allow_http(config.allow_http)
	}

	/// Sets the API base URL.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());

		self
	}

	/// Sets the client identifier and secret.
	pub fn credentials(
		mut self,
		client_id: impl Into<String>,
		client_secret: impl Into<ClientSecret>,
	) -> Self {
		self.credentials = Some(Credentials::new(client_id, client_secret));

		self
	}

	/// Overrides the redirect hop budget (defaults to 4).
	pub fn max_redirects(mut self, max_redirects: u8) -> Self {
		self.max_redirects = max_redirects;

		self
	}

	/// Allows plain `http` base URLs.
	pub fn allow_http(mut self, allow: bool) -> Self {
		self.allow_http = allow;

		self
	}

	/// Consumes the builder and wires the provided transport.
	pub fn build_with<C>(self, http_client: impl Into<Arc<C>>) -> Result<Client<C>>
	where
		C: ?Sized + HttpTransport,
	{
		let raw = self.base_url.ok_or(ConfigError::MissingBaseUrl)?;
		let base_url = validate_base_url(&raw, self.allow_http)?;
		let credentials = self.credentials.ok_or(ConfigError::MissingCredentials)?;
		let fetcher =
			Fetcher::new(base_url, credentials, http_client).with_max_redirects(self.max_redirects);

		Ok(Client::from_fetcher(fetcher))
	}

	/// Consumes the builder and wires the default reqwest transport.
	#[cfg(feature = "reqwest")]
	pub fn build(self) -> Result<Client> {
		let http_client = crate::http::ReqwestHttpClient::new()?;

		self.build_with(http_client)
	}
}
impl Default for ClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn default_max_redirects() -> u8 {
	DEFAULT_MAX_REDIRECTS
}

fn validate_base_url(raw: &str, allow_http: bool) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|e| ConfigError::invalid_url(raw, e))?;

	if !url.has_host() {
		return Err(ConfigError::MissingHost { url: raw.to_owned() });
	}

	match url.scheme() {
		"https" => Ok(url),
		"http" if allow_http => Ok(url),
		_ => Err(ConfigError::InsecureBaseUrl { url: raw.to_owned() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	fn build(builder: ClientBuilder) -> Result<Client<ScriptedTransport>> {
		builder.build_with(ScriptedTransport::default())
	}

	#[test]
	fn builder_requires_base_url_and_credentials() {
		let err = build(ClientBuilder::new().credentials("id", "secret"))
			.expect_err("Base URL is mandatory.");

		assert!(matches!(err, Error::Config(ConfigError::MissingBaseUrl)));

		let err = build(ClientBuilder::new().base_url("https://shop.example.com"))
			.expect_err("Credentials are mandatory.");

		assert!(matches!(err, Error::Config(ConfigError::MissingCredentials)));
	}

	#[test]
	fn builder_rejects_invalid_and_insecure_urls() {
		let builder = || ClientBuilder::new().credentials("id", "secret");

		assert!(matches!(
			build(builder().base_url("not a url")),
			Err(Error::Config(ConfigError::InvalidUrl { .. }))
		));
		assert!(matches!(
			build(builder().base_url("mailto:shop@example.com")),
			Err(Error::Config(ConfigError::MissingHost { .. }))
		));
		assert!(matches!(
			build(builder().base_url("http://shop.example.com")),
			Err(Error::Config(ConfigError::InsecureBaseUrl { .. }))
		));
		assert!(build(builder().base_url("http://127.0.0.1:8080").allow_http(true)).is_ok());
	}

	#[test]
	fn config_deserializes_with_defaults() {
		let config: ClientConfig = serde_json::from_str(
			r#"{"base_url":"https://shop.example.com/api/v2","client_id":"id","client_secret":"secret"}"#,
		)
		.expect("Config should deserialize.");

		assert_eq!(config.max_redirects, 4);
		assert!(!config.allow_http);

		let client = build(ClientBuilder::from_config(config)).expect("Config should build.");

		assert_eq!(client.fetcher().base_url().as_str(), "https://shop.example.com/api/v2");
		assert_eq!(client.fetcher().credentials().client_secret.expose(), "secret");
		assert_eq!(client.fetcher().max_redirects(), 4);
	}
}
