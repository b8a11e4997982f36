// self
use crate::{_prelude::*, obs::FetchStage};

/// A span builder used around each logical fetch.
#[derive(Clone, Debug)]
pub struct FetchSpan {
	stage: FetchStage,
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FetchSpan {
	/// Creates a new span tagged with the call-site stage and the request path.
	pub fn new(stage: FetchStage, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("upgates.fetch", stage = stage.as_str(), path);

			Self { stage, span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = path;

			Self { stage }
		}
	}

	/// Call site recorded on the span.
	pub fn stage(&self) -> FetchStage {
		self.stage
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> FetchSpanGuard {
		#[cfg(feature = "tracing")]
		{
			FetchSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			FetchSpanGuard {}
		}
	}
}

/// RAII guard returned by [`FetchSpan::entered`].
pub struct FetchSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for FetchSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FetchSpanGuard(..)")
	}
}

/// Emits a `debug` event for a followed redirect hop (when enabled).
pub fn trace_redirect(hop: u8, location: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(hop, location, "following redirect");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (hop, location);
	}
}
