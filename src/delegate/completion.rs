//! One-shot handle a login delegate resolves with the outcome of its login.

// self
use crate::{
	_prelude::*,
	auth::{CycleId, TokenSecret},
	bridge::ChallengeBridge,
	challenge::{FailureInfo, LoginOutcome},
};

/// Completion handle tied to exactly one challenge cycle.
///
/// Resolving consumes the handle, so an outcome is delivered at most once. Dropping the handle
/// detaches it: the cycle stays outstanding and can still be settled through
/// [`ChallengeBridge::on_delegate_token_received`] or [`ChallengeBridge::on_delegate_failure`].
/// Giving up on a login is explicit, via [`LoginCompletion::abandon`]. Handles for a cycle the
/// bridge already cleared are rejected with [`Error::StaleCompletion`] and never touch a newer
/// cycle.
pub struct LoginCompletion {
	bridge: Weak<ChallengeBridge>,
	cycle: CycleId,
}
impl LoginCompletion {
	pub(crate) fn new(bridge: Weak<ChallengeBridge>, cycle: CycleId) -> Self {
		Self { bridge, cycle }
	}

	/// Cycle this handle resolves.
	pub fn cycle(&self) -> &CycleId {
		&self.cycle
	}

	/// Answers the challenge with the provider's access token.
	pub fn succeed(self, token: impl Into<TokenSecret>) -> Result<()> {
		self.resolve(LoginOutcome::Token(token.into()))
	}

	/// Fails the challenge with the provider's failure payload.
	pub fn fail(self, info: FailureInfo) -> Result<()> {
		self.resolve(LoginOutcome::Failure(info))
	}

	/// Delivers `outcome` to the bridge.
	pub fn resolve(self, outcome: LoginOutcome) -> Result<()> {
		match self.bridge.upgrade() {
			Some(bridge) => bridge.complete_cycle(Some(&self.cycle), outcome),
			None => Err(Error::StaleCompletion { cycle: self.cycle }),
		}
	}

	/// Gives up on the login.
	///
	/// Under [`UnresolvedPolicy::Fail`](crate::UnresolvedPolicy::Fail) the host context is failed
	/// with `abandoned` and cleared; under `Leave` the cycle stays outstanding.
	pub fn abandon(self) -> Result<()> {
		match self.bridge.upgrade() {
			Some(bridge) => bridge.abandon_cycle(&self.cycle),
			None => Err(Error::StaleCompletion { cycle: self.cycle }),
		}
	}
}
impl Debug for LoginCompletion {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginCompletion").field("cycle", &self.cycle).finish()
	}
}
