//! Item iterators driving the page fetch plan.

// std
use std::{iter::FusedIterator, marker::PhantomData, vec::IntoIter};
// self
use crate::{_prelude::*, http::HttpTransport, pagination::PageEnumerator};

/// Position of a traversal within the fetch plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
	NotStarted,
	FirstPage,
	MiddlePages(u64),
	LastPage,
	Done,
}

/// One forward pass over every item of a [`PageEnumerator`].
///
/// Each call to [`next`](Iterator::next) drains the buffered page before advancing the
/// state machine, so a page is only requested once the consumer has pulled every item of
/// the previous one. The first error is yielded once and ends the traversal.
pub struct Items<'a, C>
where
	C: ?Sized + HttpTransport,
{
	pages: &'a PageEnumerator<C>,
	state: State,
	total_pages: u64,
	buffer: IntoIter<Value>,
}
impl<'a, C> Items<'a, C>
where
	C: ?Sized + HttpTransport,
{
	pub(crate) fn new(pages: &'a PageEnumerator<C>) -> Self {
		Self { pages, state: State::NotStarted, total_pages: 0, buffer: Vec::new().into_iter() }
	}

	/// Page whose items are currently being yielded (`None` before the first fetch and after
	/// the traversal ends).
	pub fn current_page(&self) -> Option<u64> {
		match self.state {
			State::NotStarted | State::Done => None,
			State::FirstPage => Some(1),
			State::MiddlePages(page) => Some(page),
			State::LastPage => Some(self.total_pages),
		}
	}

	fn advance(&mut self) -> Result<()> {
		let data_key = self.pages.data_key();

		self.state = match self.state {
			State::NotStarted => {
				let first = self.pages.first_page()?;

				self.total_pages = first.number_of_pages();
				self.buffer = first.items(data_key).to_vec().into_iter();

				State::FirstPage
			},
			State::FirstPage | State::MiddlePages(_) if self.next_page() >= self.total_pages => {
				if self.total_pages <= 1 {
					State::Done
				} else {
					self.buffer = self.pages.last_page()?.items(data_key).to_vec().into_iter();

					State::LastPage
				}
			},
			State::FirstPage | State::MiddlePages(_) => {
				let page = self.next_page();

				self.buffer = self.pages.fetch_page(page)?.into_items(data_key).into_iter();

				State::MiddlePages(page)
			},
			State::LastPage | State::Done => State::Done,
		};

		Ok(())
	}

	fn next_page(&self) -> u64 {
		match self.state {
			State::MiddlePages(page) => page + 1,
			_ => 2,
		}
	}
}
impl<C> Iterator for Items<'_, C>
where
	C: ?Sized + HttpTransport,
{
	type Item = Result<Value>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(item) = self.buffer.next() {
				return Some(Ok(item));
			}
			if self.state == State::Done {
				return None;
			}
			if let Err(e) = self.advance() {
				self.state = State::Done;

				return Some(Err(e));
			}
		}
	}
}
impl<C> FusedIterator for Items<'_, C> where C: ?Sized + HttpTransport {}
impl<C> Debug for Items<'_, C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Items")
			.field("state", &self.state)
			.field("total_pages", &self.total_pages)
			.field("buffered", &self.buffer.len())
			.finish()
	}
}

/// [`Items`] adapter decoding every item into `T`.
///
/// Decode failures carry the JSON path inside the item and end the traversal like any
/// other error.
pub struct TypedItems<'a, C, T>
where
	C: ?Sized + HttpTransport,
{
	inner: Items<'a, C>,
	failed: bool,
	_marker: PhantomData<fn() -> T>,
}
impl<'a, C, T> TypedItems<'a, C, T>
where
	C: ?Sized + HttpTransport,
	T: DeserializeOwned,
{
	pub(crate) fn new(inner: Items<'a, C>) -> Self {
		Self { inner, failed: false, _marker: PhantomData }
	}
}
impl<C, T> Iterator for TypedItems<'_, C, T>
where
	C: ?Sized + HttpTransport,
	T: DeserializeOwned,
{
	type Item = Result<T>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		let decoded = self
			.inner
			.next()?
			.and_then(|value| serde_path_to_error::deserialize(value).map_err(Error::from));

		self.failed = decoded.is_err();

		Some(decoded)
	}
}
impl<C, T> FusedIterator for TypedItems<'_, C, T>
where
	C: ?Sized + HttpTransport,
	T: DeserializeOwned,
{
}
