// self
use crate::{_prelude::*, obs::CycleStage};

/// A span builder used by bridge operations.
#[derive(Clone, Debug)]
pub struct CycleSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CycleSpan {
	/// Creates a new span tagged with the provided stage + realm.
	pub fn new(stage: CycleStage, realm: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("challenge_bridge.cycle", stage = stage.as_str(), realm);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (stage, realm);

			Self {}
		}
	}

	/// Enters the span for the rest of the calling scope.
	pub fn entered(self) -> CycleSpanGuard {
		#[cfg(feature = "tracing")]
		{
			CycleSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			CycleSpanGuard {}
		}
	}
}

/// RAII guard returned by [`CycleSpan::entered`].
pub struct CycleSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for CycleSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CycleSpanGuard(..)")
	}
}

/// Emits an error event for a failure the bridge absorbed or returned.
pub fn log_error(stage: CycleStage, error: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::error!(stage = stage.as_str(), %error, "challenge cycle error");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, error);
	}
}

/// Emits a warning event, e.g. when a host challenge is deliberately left unanswered.
pub fn log_warn(stage: CycleStage, message: &str) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(stage = stage.as_str(), message);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, message);
	}
}

/// Emits a debug event for a state transition.
pub fn log_transition(stage: CycleStage, cycle: &str, to: &'static str) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(stage = stage.as_str(), cycle, to, "challenge cycle transition");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, cycle, to);
	}
}
