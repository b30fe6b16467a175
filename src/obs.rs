//! Optional observability helpers for challenge cycles.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (default) to emit spans named `challenge_bridge.cycle` with the `stage` and
//!   `realm` fields, plus events when a cycle fails or is dropped.
//! - Enable `metrics` to increment the `challenge_bridge_cycle_total` counter for every stage,
//!   labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Bridge call sites observed by the helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleStage {
	/// Delegate registration with the host.
	Register,
	/// Challenge receipt.
	Challenge,
	/// Token answer submission.
	Answer,
	/// Failure submission.
	Failure,
	/// Activity result passthrough.
	ActivityResult,
	/// Host-driven reset after success or failure.
	Reset,
	/// Timeout sweep.
	Expire,
	/// Completion handle dropped without an outcome.
	Abandon,
}
impl CycleStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CycleStage::Register => "register",
			CycleStage::Challenge => "challenge",
			CycleStage::Answer => "answer",
			CycleStage::Failure => "failure",
			CycleStage::ActivityResult => "activity_result",
			CycleStage::Reset => "reset",
			CycleStage::Expire => "expire",
			CycleStage::Abandon => "abandon",
		}
	}
}
impl Display for CycleStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
	/// Entry to a bridge operation.
	Attempt,
	/// The stage completed and the host was notified where applicable.
	Success,
	/// The stage failed; the error was returned to the caller.
	Failure,
	/// The stage failed and the host was deliberately left waiting.
	Unresolved,
}
impl CycleOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CycleOutcome::Attempt => "attempt",
			CycleOutcome::Success => "success",
			CycleOutcome::Failure => "failure",
			CycleOutcome::Unresolved => "unresolved",
		}
	}
}
impl Display for CycleOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
