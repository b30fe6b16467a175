// self
use crate::obs::{CycleOutcome, CycleStage};

/// Records a stage outcome via the global metrics recorder (when enabled).
pub fn record_cycle_outcome(stage: CycleStage, outcome: CycleOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"challenge_bridge_cycle_total",
			"stage" => stage.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (stage, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_cycle_outcome_noop_without_recorder() {
		record_cycle_outcome(CycleStage::Challenge, CycleOutcome::Unresolved);
	}
}
