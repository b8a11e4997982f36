//! Decoded API responses.

// self
use crate::_prelude::*;

/// One decoded JSON object returned by the API.
///
/// The fetcher injects a `code` field holding the HTTP status as a string (`"200"`), so a
/// page is never byte-for-byte identical to the wire payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(Map<String, Value>);
impl Page {
	/// Field holding the injected HTTP status code.
	pub const CODE_KEY: &'static str = "code";
	/// Field holding the total number of items across every page.
	pub const NUMBER_OF_ITEMS_KEY: &'static str = "number_of_items";
	/// Field holding the total number of pages.
	pub const NUMBER_OF_PAGES_KEY: &'static str = "number_of_pages";

	/// Wraps a decoded JSON object.
	pub fn new(fields: Map<String, Value>) -> Self {
		Self(fields)
	}

	/// Returns a copy of `self` carrying `code`, replacing any payload value of that name.
	pub(crate) fn with_code(mut self, status: u16) -> Self {
		self.0.insert(Self::CODE_KEY.into(), Value::String(status.to_string()));

		self
	}

	/// Injected HTTP status code.
	pub fn code(&self) -> Option<&str> {
		self.0.get(Self::CODE_KEY).and_then(Value::as_str)
	}

	/// Declared page count, `0` when absent or not a non-negative integer.
	pub fn number_of_pages(&self) -> u64 {
		self.0.get(Self::NUMBER_OF_PAGES_KEY).and_then(Value::as_u64).unwrap_or(0)
	}

	/// Declared item count across all pages, when present.
	pub fn number_of_items(&self) -> Option<u64> {
		self.0.get(Self::NUMBER_OF_ITEMS_KEY).and_then(Value::as_u64)
	}

	/// Items stored under `data_key`; empty when the key is absent or not an array.
	pub fn items(&self, data_key: &str) -> &[Value] {
		match self.0.get(data_key) {
			Some(Value::Array(items)) => items,
			_ => &[],
		}
	}

	/// Consumes the page and returns the items stored under `data_key`.
	pub fn into_items(mut self, data_key: &str) -> Vec<Value> {
		match self.0.remove(data_key) {
			Some(Value::Array(items)) => items,
			_ => Vec::new(),
		}
	}

	/// Raw field lookup.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Underlying JSON object.
	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Unwraps the underlying JSON object.
	pub fn into_map(self) -> Map<String, Value> {
		self.0
	}
}
impl From<Map<String, Value>> for Page {
	fn from(fields: Map<String, Value>) -> Self {
		Self(fields)
	}
}
