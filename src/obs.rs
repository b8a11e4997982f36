//! Optional observability helpers for API fetches.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `upgates.fetch` with the `stage` (call
//!   site) and `path` fields, plus a `debug` event per redirect hop.
//! - Enable `metrics` to increment the `upgates_fetch_total` counter for every classified
//!   response, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Call site a fetch is issued from, recorded on its span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchStage {
	/// Direct [`Fetcher::get`](crate::fetch::Fetcher::get) or `fetch` call.
	Get,
	/// Memoized first page of an enumerator.
	FirstPage,
	/// Unmemoized page between the first and the last.
	MiddlePage,
	/// Memoized last page of an enumerator.
	LastPage,
}
impl FetchStage {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchStage::Get => "get",
			FetchStage::FirstPage => "first_page",
			FetchStage::MiddlePage => "middle_page",
			FetchStage::LastPage => "last_page",
		}
	}
}
impl Display for FetchStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Classification recorded for each HTTP response the fetcher handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
	/// `200` decoded into a page.
	Success,
	/// `301` followed to a new location.
	Redirect,
	/// `429` surfaced to the caller.
	RateLimited,
	/// Any other failure propagated back to the caller.
	Failure,
}
impl FetchOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FetchOutcome::Success => "success",
			FetchOutcome::Redirect => "redirect",
			FetchOutcome::RateLimited => "rate_limited",
			FetchOutcome::Failure => "failure",
		}
	}
}
impl Display for FetchOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
