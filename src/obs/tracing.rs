// self
#[cfg(feature = "tracing")] use crate::{error::ErrorKind, obs::error_chain};
use crate::{_prelude::*, request::Method};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// A span builder used by the dispatcher.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the request method + URL path.
	pub fn new(method: Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("schoology_client.request", method = method.as_str(), path);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a failed call before the error is handed back to the caller.
///
/// API rejections are logged at `warn`, everything else at `error`.
pub fn log_failure(method: Method, url: &str, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		let kind = err.kind();

		match kind {
			ErrorKind::Api => tracing::warn!(
				method = method.as_str(),
				url,
				kind = kind.as_str(),
				status = err.status(),
				"Error while processing request: {}",
				error_chain(err)
			),
			_ => tracing::error!(
				method = method.as_str(),
				url,
				kind = kind.as_str(),
				"Error while processing request: {}",
				error_chain(err)
			),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (method, url, err);
	}
}
