//! High-level API facade over the fetcher and collection enumerators.

pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	fetch::{DefaultTransport, Fetcher},
	http::HttpTransport,
	page::Page,
	pagination::PageEnumerator,
	request::QueryParams,
};

/// Client bound to one shop's API base URL and credentials.
///
/// Cloning is cheap; clones share the same fetcher (and therefore the same encoded Basic
/// token).
pub struct Client<C = DefaultTransport>
where
	C: ?Sized + HttpTransport,
{
	fetcher: Arc<Fetcher<C>>,
}
impl<C> Client<C>
where
	C: ?Sized + HttpTransport,
{
	/// Wraps an already configured fetcher.
	pub fn from_fetcher(fetcher: impl Into<Arc<Fetcher<C>>>) -> Self {
		Self { fetcher: fetcher.into() }
	}

	/// Shared fetcher used for every request.
	pub fn fetcher(&self) -> &Arc<Fetcher<C>> {
		&self.fetcher
	}

	/// Issues one GET against `path` (relative to the base URL) without paginating.
	pub fn get(&self, path: &str, params: &QueryParams) -> Result<Page> {
		self.fetcher.get(path, params)
	}

	/// Lazily enumerates `/products`.
	pub fn products(&self, params: QueryParams) -> PageEnumerator<C> {
		self.enumerize("/products", "products", params)
	}

	/// Lazily enumerates `/categories`.
	pub fn categories(&self, params: QueryParams) -> PageEnumerator<C> {
		self.enumerize("/categories", "categories", params)
	}

	/// Lazily enumerates any paginated resource at `path`, reading items from `data_key`.
	pub fn enumerize(
		&self,
		path: impl Into<String>,
		data_key: impl Into<String>,
		params: QueryParams,
	) -> PageEnumerator<C> {
		PageEnumerator::new(self.fetcher.clone(), path, data_key, params)
	}

	/// Probes the bare base URL to check whether the credentials are accepted.
	///
	/// The API answers an authenticated request to its root with `404`, so:
	///
	/// - `404` yields `Ok(true)`;
	/// - `401` and `403` yield `Ok(false)`;
	/// - a `200` yields `Ok(false)` unless the decoded page reports code `"404"`;
	/// - every other failure (rate limiting, redirects, transport) is returned as-is.
	pub fn valid_credentials(&self) -> Result<bool> {
		match self.get("", &QueryParams::new()) {
			Ok(page) => Ok(page.code() == Some("404")),
			Err(Error::UnknownError { status: 404, .. }) => Ok(true),
			Err(Error::UnknownError { status: 401 | 403, .. }) => Ok(false),
			Err(e) => Err(e),
		}
	}
}
#[cfg(feature = "reqwest")]
impl Client {
	/// Creates a client backed by the default reqwest transport.
	///
	/// `base_url` must be an absolute `https` URL; it may carry a path prefix such as
	/// `/api/v2`.
	pub fn new(
		base_url: &str,
		client_id: impl Into<String>,
		client_secret: impl Into<crate::auth::ClientSecret>,
	) -> Result<Self> {
		ClientBuilder::new().base_url(base_url).credentials(client_id, client_secret).build()
	}
}
impl Client {
	/// Starts a [`ClientBuilder`].
	pub fn builder() -> ClientBuilder {
		ClientBuilder::new()
	}
}
impl<C> Clone for Client<C>
where
	C: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self { fetcher: self.fetcher.clone() }
	}
}
impl<C> Debug for Client<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client").field("fetcher", &self.fetcher).finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::_preludet::*;

	fn client(transport: &Arc<ScriptedTransport>) -> Client<ScriptedTransport> {
		Client::from_fetcher(scripted_fetcher(transport.clone()))
	}

	#[test]
	fn resource_helpers_target_expected_paths() {
		let transport = Arc::new(ScriptedTransport::default());
		let client = client(&transport);
		let products = client.products(QueryParams::new());
		let categories = client.categories(QueryParams::new().with("language", "en"));

		assert_eq!((products.path(), products.data_key()), ("/products", "products"));
		assert_eq!((categories.path(), categories.data_key()), ("/categories", "categories"));
		assert_eq!(categories.params().get("language"), Some("en"));
		assert!(transport.requested_urls().is_empty(), "Enumerators must not fetch eagerly.");
	}

	#[test]
	fn get_does_not_paginate() {
		let transport = Arc::new(
			ScriptedTransport::default().page(json!({ "orders": [1], "number_of_pages": 9 })),
		);
		let page = client(&transport)
			.get("/orders", &QueryParams::new().with("status", "new"))
			.expect("Raw get should succeed.");

		assert_eq!(page.code(), Some("200"));
		assert_eq!(
			transport.requested_urls(),
			vec!["https://shop.example.com/api/v2/orders?status=new"]
		);
	}

	#[test]
	fn valid_credentials_maps_probe_statuses() {
		let transport = Arc::new(
			ScriptedTransport::default()
				.respond(404, &[], "{\"message\":\"Not found\"}")
				.respond(401, &[], "unauthorized")
				.respond(403, &[], "forbidden")
				.page(json!({})),
		);
		let client = client(&transport);

		assert!(client.valid_credentials().expect("404 should be accepted."));
		assert!(!client.valid_credentials().expect("401 should map to false."));
		assert!(!client.valid_credentials().expect("403 should map to false."));
		assert!(!client.valid_credentials().expect("200 should map to false."));
		assert_eq!(
			transport.requested_urls(),
			vec!["https://shop.example.com/api/v2"; 4]
		);
	}

	#[test]
	fn valid_credentials_propagates_other_failures() {
		let transport = Arc::new(ScriptedTransport::default().respond(429, &[], ""));
		let err = client(&transport)
			.valid_credentials()
			.expect_err("Rate limiting should not be folded into the boolean.");

		assert!(matches!(err, Error::TooManyRequests { .. }));
	}
}
