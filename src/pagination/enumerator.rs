//! Collection enumerator with memoized first and last pages.

// self
use crate::{
	_prelude::*,
	fetch::{DefaultTransport, Fetcher},
	obs::FetchStage,
	http::HttpTransport,
	page::Page,
	pagination::{Items, TypedItems},
	request::QueryParams,
};

/// Re-iterable, lazily fetched view over every item of a paginated resource.
///
/// Accessors take `&self`; the first and last page memos are populated on first use and
/// live as long as the enumerator. They are not shared across enumerators.
pub struct PageEnumerator<C = DefaultTransport>
where
	C: ?Sized + HttpTransport,
{
	fetcher: Arc<Fetcher<C>>,
	path: String,
	data_key: String,
	params: QueryParams,
	first_page: OnceLock<Page>,
	last_page: OnceLock<Page>,
}
impl<C> PageEnumerator<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates an enumerator for `path`, reading items from `data_key`.
	pub fn new(
		fetcher: Arc<Fetcher<C>>,
		path: impl Into<String>,
		data_key: impl Into<String>,
		params: QueryParams,
	) -> Self {
		Self {
			fetcher,
			path: path.into(),
			data_key: data_key.into(),
			params,
			first_page: OnceLock::new(),
			last_page: OnceLock::new(),
		}
	}

	/// Resource path relative to the base URL.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Field holding each page's items.
	pub fn data_key(&self) -> &str {
		&self.data_key
	}

	/// Caller-supplied query parameters.
	pub fn params(&self) -> &QueryParams {
		&self.params
	}

	/// Page 1, fetched on first access with the caller's parameters untouched.
	pub fn first_page(&self) -> Result<&Page> {
		memoized(&self.first_page, || {
			self.fetcher.get_staged(FetchStage::FirstPage, &self.path, &self.params)
		})
	}

	/// Final page; the first page itself when there are fewer than two pages.
	pub fn last_page(&self) -> Result<&Page> {
		let total_pages = self.total_pages()?;

		if total_pages < 2 {
			return self.first_page();
		}

		memoized(&self.last_page, || {
			self.fetcher.get_staged(
				FetchStage::LastPage,
				&self.path,
				&self.params.with_page(total_pages),
			)
		})
	}

	/// Page count declared by the first page (`0` when absent).
	pub fn total_pages(&self) -> Result<u64> {
		Ok(self.first_page()?.number_of_pages())
	}

	/// Item count declared by the first page, when present.
	pub fn size(&self) -> Result<Option<u64>> {
		Ok(self.first_page()?.number_of_items())
	}

	/// Fetches page `page` without memoizing it.
	pub fn fetch_page(&self, page: u64) -> Result<Page> {
		self.fetcher.get_staged(FetchStage::MiddlePage, &self.path, &self.params.with_page(page))
	}

	/// Starts a fresh traversal from page 1.
	pub fn iter(&self) -> Items<'_, C> {
		Items::new(self)
	}

	/// Starts a fresh traversal decoding every item into `T`.
	pub fn iter_as<T>(&self) -> TypedItems<'_, C, T>
	where
		T: DeserializeOwned,
	{
		TypedItems::new(self.iter())
	}

	/// Drains a full traversal into a vector, stopping at the first error.
	pub fn collect_all(&self) -> Result<Vec<Value>> {
		self.iter().collect()
	}
}
impl<'a, C> IntoIterator for &'a PageEnumerator<C>
where
	C: ?Sized + HttpTransport,
{
	type IntoIter = Items<'a, C>;
	type Item = Result<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
impl<C> Debug for PageEnumerator<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PageEnumerator")
			.field("path", &self.path)
			.field("data_key", &self.data_key)
			.field("params", &self.params)
			.field("first_page_cached", &self.first_page.get().is_some())
			.field("last_page_cached", &self.last_page.get().is_some())
			.finish()
	}
}

// Concurrent first accesses may both fetch; the first stored page wins.
fn memoized<F>(cell: &OnceLock<Page>, fetch: F) -> Result<&Page>
where
	F: FnOnce() -> Result<Page>,
{
	if let Some(page) = cell.get() {
		return Ok(page);
	}

	let page = fetch()?;

	Ok(cell.get_or_init(|| page))
}
