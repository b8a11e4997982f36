//! Ordered query parameter set with override-on-insert semantics.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

/// Query parameters attached to an API request.
///
/// Insertion order is preserved. Setting a key that already exists replaces its value in
/// place, so merging `page` into caller-supplied parameters always wins over a caller
/// `page` without reordering the rest of the query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(Vec<(String, String)>);
impl QueryParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style [`set`](Self::set).
	pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.set(key, value);

		self
	}

	/// Inserts or replaces `key`.
	pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
		let key = key.into();
		let value = value.to_string();

		match self.0.iter_mut().find(|(existing, _)| *existing == key) {
			Some(slot) => slot.1 = value,
			None => self.0.push((key, value)),
		}
	}

	/// Returns a copy with `page` set to `page`.
	pub fn with_page(&self, page: u64) -> Self {
		self.clone().with("page", page)
	}

	/// Value stored under `key`, if any.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value.as_str())
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over `(key, value)` pairs in insertion order.
	pub fn iter(&self) -> Iter<'_, (String, String)> {
		self.0.iter()
	}
}
impl<K, V> FromIterator<(K, V)> for QueryParams
where
	K: Into<String>,
	V: ToString,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut params = Self::new();

		for (key, value) in iter {
			params.set(key, value);
		}

		params
	}
}
impl<K, V, const N: usize> From<[(K, V); N]> for QueryParams
where
	K: Into<String>,
	V: ToString,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}
impl<'a> IntoIterator for &'a QueryParams {
	type IntoIter = Iter<'a, (String, String)>;
	type Item = &'a (String, String);

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn set_replaces_in_place_and_appends_new_keys() {
		let mut params = QueryParams::from([("page", "9"), ("language", "cs")]);

		params.set("page", 2);
		params.set("limit", 50);

		let pairs: Vec<_> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

		assert_eq!(pairs, vec![("page", "2"), ("language", "cs"), ("limit", "50")]);
	}

	#[test]
	fn with_page_overrides_caller_page_without_mutating_original() {
		let original = QueryParams::new().with("page", 7).with("active", true);
		let paged = original.with_page(3);

		assert_eq!(paged.get("page"), Some("3"));
		assert_eq!(paged.get("active"), Some("true"));
		assert_eq!(original.get("page"), Some("7"));
	}

	#[test]
	fn duplicate_keys_collapse_when_collected() {
		let params: QueryParams = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

		assert_eq!(params.len(), 2);
		assert_eq!(params.get("a"), Some("3"));
	}
}
