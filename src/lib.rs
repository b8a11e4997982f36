//! Blocking Upgates REST API client: Basic-auth fetches with bounded redirects, explicit
//! rate-limit errors, and lazy page-by-page collection iterators.
//!
//! ```no_run
//! use upgates_client::{client::Client, request::QueryParams};
//!
//! # fn main() -> upgates_client::error::Result<()> {
//! let client = Client::new("https://shop.admin.upgates.com/api/v2", "id", "secret")?;
//! let products = client.products(QueryParams::new().with("language", "cs"));
//!
//! println!("{:?} products on {} pages", products.size()?, products.total_pages()?);
//!
//! for product in &products {
//! 	println!("{}", product?);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod error;
pub mod fetch;
pub mod http;
pub mod obs;
pub mod page;
pub mod pagination;
pub mod request;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test`
	//! crate feature.

	pub use crate::_prelude::*;

	// std
	use std::{collections::VecDeque, sync::Mutex as StdMutex};
	// self
	use crate::{
		auth::Credentials,
		fetch::Fetcher,
		http::{HttpRequest, HttpResponse, HttpTransport},
	};

	/// Error emitted by [`ScriptedTransport`] once its script runs dry.
	#[derive(Debug, ThisError)]
	#[error("Scripted transport has no response left for {url}.")]
	pub struct ScriptExhausted {
		/// URL of the unexpected request.
		pub url: String,
	}

	/// Request observed by [`ScriptedTransport`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// Fully built request URL.
		pub url: String,
		/// Headers sent with the request.
		pub headers: ::http::HeaderMap,
	}

	/// In-memory transport replaying canned responses and recording every request URL.
	#[derive(Debug, Default)]
	pub struct ScriptedTransport {
		responses: StdMutex<VecDeque<HttpResponse>>,
		requests: StdMutex<Vec<RecordedRequest>>,
	}
	impl ScriptedTransport {
		/// Queues a response with the provided status, headers, and body.
		pub fn respond(self, status: u16, headers: &[(&str, &str)], body: &str) -> Self {
			let mut builder = ::http::Response::builder().status(status);

			for (name, value) in headers {
				builder = builder.header(*name, *value);
			}

			let response = builder
				.body(body.as_bytes().to_vec())
				.expect("Scripted response should be a valid HTTP response.");

			self.responses.lock().expect("Response script lock poisoned.").push_back(response);

			self
		}

		/// Queues a `200` JSON page response.
		pub fn page(self, body: serde_json::Value) -> Self {
			self.respond(200, &[("content-type", "application/json")], &body.to_string())
		}

		/// Returns every requested URL in dispatch order.
		pub fn requested_urls(&self) -> Vec<String> {
			self.requests
				.lock()
				.expect("Request log lock poisoned.")
				.iter()
				.map(|request| request.url.clone())
				.collect()
		}

		/// Returns the recorded requests.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().expect("Request log lock poisoned.").clone()
		}
	}
	impl HttpTransport for ScriptedTransport {
		type TransportError = ScriptExhausted;

		fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Self::TransportError> {
			let url = request.uri().to_string();

			self.requests
				.lock()
				.expect("Request log lock poisoned.")
				.push(RecordedRequest { url: url.clone(), headers: request.headers().clone() });
			self.responses
				.lock()
				.expect("Response script lock poisoned.")
				.pop_front()
				.ok_or(ScriptExhausted { url })
		}
	}

	/// Builds a [`Fetcher`] rooted at `https://shop.example.com/api/v2` over `transport`.
	pub fn scripted_fetcher(transport: Arc<ScriptedTransport>) -> Arc<Fetcher<ScriptedTransport>> {
		let base_url = Url::parse("https://shop.example.com/api/v2")
			.expect("Scripted base URL should parse.");

		Arc::new(Fetcher::new(base_url, Credentials::new("demo-id", "demo-secret"), transport))
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::{Arc, OnceLock},
		time::Duration,
	};

	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
