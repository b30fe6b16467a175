//! In-flight bookkeeping for the bridge state machine.

// self
use crate::{
	_prelude::*,
	auth::{CycleId, ProviderAppId},
	host::AuthenticationContext,
};

/// Host context owned by the bridge between challenge acceptance and resolution.
pub(crate) struct InFlight {
	pub(crate) cycle: CycleId,
	pub(crate) context: Arc<dyn AuthenticationContext>,
	pub(crate) app_id: ProviderAppId,
	pub(crate) started_at: OffsetDateTime,
}
impl InFlight {
	fn is_expired(&self, now: OffsetDateTime, timeout: Option<Duration>) -> bool {
		timeout.is_some_and(|timeout| now - self.started_at >= timeout)
	}
}

#[derive(Default)]
pub(crate) enum BridgeState {
	#[default]
	Idle,
	AwaitingDelegate(InFlight),
}
impl BridgeState {
	/// Stores `in_flight` unless a cycle is outstanding, in which case its id is returned.
	pub(crate) fn begin(&mut self, in_flight: InFlight) -> Result<(), CycleId> {
		match self {
			BridgeState::Idle => {
				*self = BridgeState::AwaitingDelegate(in_flight);

				Ok(())
			},
			BridgeState::AwaitingDelegate(current) => Err(current.cycle.clone()),
		}
	}

	/// Fails unless a context is outstanding and, when `expected` is given, belongs to it.
	pub(crate) fn check(&self, expected: Option<&CycleId>) -> Result<()> {
		match (self, expected) {
			(BridgeState::Idle, None) => Err(Error::NoInFlightContext),
			(BridgeState::Idle, Some(cycle)) =>
				Err(Error::StaleCompletion { cycle: cycle.clone() }),
			(BridgeState::AwaitingDelegate(current), Some(cycle)) if current.cycle != *cycle =>
				Err(Error::StaleCompletion { cycle: cycle.clone() }),
			(BridgeState::AwaitingDelegate(_), _) => Ok(()),
		}
	}

	/// Takes the outstanding context, optionally only when it belongs to `expected`.
	pub(crate) fn take(&mut self, expected: Option<&CycleId>) -> Result<InFlight> {
		self.check(expected)?;

		self.clear().ok_or(Error::NoInFlightContext)
	}

	/// Takes the outstanding context when it is older than `timeout`.
	pub(crate) fn take_expired(
		&mut self,
		now: OffsetDateTime,
		timeout: Option<Duration>,
	) -> Option<InFlight> {
		match std::mem::take(self) {
			BridgeState::AwaitingDelegate(current) if current.is_expired(now, timeout) =>
				Some(current),
			other => {
				*self = other;

				None
			},
		}
	}

	/// Unconditionally returns to `Idle`.
	pub(crate) fn clear(&mut self) -> Option<InFlight> {
		match std::mem::take(self) {
			BridgeState::Idle => None,
			BridgeState::AwaitingDelegate(in_flight) => Some(in_flight),
		}
	}
}
