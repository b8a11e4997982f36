// self
use crate::obs::FetchOutcome;

#[cfg(test)]
thread_local! {
	static RECORDED: std::cell::RefCell<Vec<FetchOutcome>> = const { std::cell::RefCell::new(Vec::new()) };
}

/// Records a fetch outcome via the global metrics recorder (when enabled).
pub fn record_fetch_outcome(outcome: FetchOutcome) {
	#[cfg(test)]
	RECORDED.with(|recorded| recorded.borrow_mut().push(outcome));

	#[cfg(feature = "metrics")]
	{
		metrics::counter!("upgates_fetch_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Drains the outcomes recorded on the current thread.
#[cfg(test)]
pub(crate) fn take_recorded_outcomes() -> Vec<FetchOutcome> {
	RECORDED.with(|recorded| recorded.take())
}
