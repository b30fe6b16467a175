//! The challenge bridge: receives host challenges for one realm, runs the login delegate, and
//! submits the outcome to the single in-flight authentication context.
//!
//! A bridge cycles `Idle` → `AwaitingDelegate` → `Idle` for as long as it lives. Every call into the
//! delegate or the host context happens after the state lock is released, so both sides may
//! re-enter the bridge synchronously and from any thread.

mod global;
mod state;

// std
use std::sync::Once;
// self
use crate::{
	_prelude::*,
	auth::{CycleId, ProviderAppId, RealmId, TokenSecret},
	challenge::{Challenge, ChallengeAnswer, FailureInfo, LoginOutcome, reason},
	config::{BridgeConfig, UnresolvedPolicy},
	delegate::{DefaultLoginDelegate, LoginCompletion, LoginDelegate, ProviderSdk},
	host::{
		ActivityResult, AuthenticationContext, AuthenticationListener, AuthenticationRegistry,
		PlatformContext,
	},
	obs::{self, CycleOutcome, CycleSpan, CycleStage},
};
use state::{BridgeState, InFlight};

/// Time source used to stamp and expire cycles.
pub type Clock = Arc<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// Read-only snapshot of the bridge state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeStatus {
	/// No authentication context is outstanding.
	Idle,
	/// A context awaits the login delegate.
	AwaitingDelegate {
		/// Cycle correlation id.
		cycle: CycleId,
		/// Provider app id extracted from the challenge.
		app_id: ProviderAppId,
		/// Instant the challenge was accepted.
		started_at: OffsetDateTime,
	},
}
impl BridgeStatus {
	/// Returns `true` when no context is outstanding.
	pub fn is_idle(&self) -> bool {
		matches!(self, BridgeStatus::Idle)
	}
}

/// Realm listener coordinating the host framework, the login delegate, and the in-flight context.
///
/// Bridges are always handed out as `Arc<ChallengeBridge>` because they register themselves with
/// the host registry and give delegates weak handles back to themselves.
pub struct ChallengeBridge {
	config: BridgeConfig,
	registry: Arc<dyn AuthenticationRegistry>,
	sdk: Arc<dyn ProviderSdk>,
	clock: Clock,
	delegate: RwLock<Option<Arc<dyn LoginDelegate>>>,
	state: Mutex<BridgeState>,
	sdk_init: Once,
	this: Weak<Self>,
}
impl ChallengeBridge {
	/// Creates a bridge over the host registry and provider SDK using the system clock.
	pub fn new(
		registry: Arc<dyn AuthenticationRegistry>,
		sdk: Arc<dyn ProviderSdk>,
		config: BridgeConfig,
	) -> Arc<Self> {
		Self::with_clock(registry, sdk, config, Arc::new(OffsetDateTime::now_utc))
	}

	/// Creates a bridge with a caller-provided time source.
	pub fn with_clock(
		registry: Arc<dyn AuthenticationRegistry>,
		sdk: Arc<dyn ProviderSdk>,
		config: BridgeConfig,
		clock: Clock,
	) -> Arc<Self> {
		Arc::new_cyclic(|this| Self {
			config,
			registry,
			sdk,
			clock,
			delegate: RwLock::new(None),
			state: Mutex::new(BridgeState::Idle),
			sdk_init: Once::new(),
			this: this.clone(),
		})
	}

	/// Configuration the bridge was built with.
	pub fn config(&self) -> &BridgeConfig {
		&self.config
	}

	/// Realm the bridge registers for.
	pub fn realm(&self) -> &RealmId {
		&self.config.realm
	}

	/// Currently registered login delegate.
	pub fn delegate(&self) -> Option<Arc<dyn LoginDelegate>> {
		self.delegate.read().clone()
	}

	/// Snapshot of the state machine.
	pub fn status(&self) -> BridgeStatus {
		match &*self.state.lock() {
			BridgeState::Idle => BridgeStatus::Idle,
			BridgeState::AwaitingDelegate(in_flight) => BridgeStatus::AwaitingDelegate {
				cycle: in_flight.cycle.clone(),
				app_id: in_flight.app_id.clone(),
				started_at: in_flight.started_at,
			},
		}
	}

	/// Registers [`DefaultLoginDelegate`] over the bridge's provider SDK.
	pub fn register_default_authentication_listener(&self, platform: &PlatformContext) {
		let delegate = Arc::new(DefaultLoginDelegate::new(self.sdk.clone()));

		self.register_authentication_listener(platform, delegate);
	}

	/// Stores `delegate`, initializes the provider SDK once, and registers the bridge for its
	/// realm. Registering again replaces the delegate.
	pub fn register_authentication_listener(
		&self,
		platform: &PlatformContext,
		delegate: Arc<dyn LoginDelegate>,
	) {
		let _guard = CycleSpan::new(CycleStage::Register, self.realm()).entered();

		*self.delegate.write() = Some(delegate);

		self.sdk_init.call_once(|| self.sdk.initialize(platform));

		if let Some(listener) = self.this.upgrade() {
			self.registry.register_authentication_listener(self.realm(), listener);
		}

		obs::record_cycle_outcome(CycleStage::Register, CycleOutcome::Success);
	}

	/// Forwards a platform activity result verbatim to the registered delegate.
	pub fn on_activity_result_called(&self, result: &ActivityResult) -> Result<()> {
		let Some(delegate) = self.delegate() else {
			obs::log_error(CycleStage::ActivityResult, &Error::NoDelegate);

			return Err(Error::NoDelegate);
		};

		delegate.handle_activity_result(result);

		Ok(())
	}

	/// Accepts a host challenge and starts the delegate login.
	///
	/// On success the bridge owns `context` until the cycle resolves and the returned id names the
	/// cycle. While another cycle is outstanding the new context is failed with `busy`. Malformed
	/// challenges are handled per [`UnresolvedPolicy`].
	pub fn on_challenge_received(
		&self,
		context: Arc<dyn AuthenticationContext>,
		challenge: &Challenge,
		platform: &PlatformContext,
	) -> Result<CycleId> {
		let _guard = CycleSpan::new(CycleStage::Challenge, self.realm()).entered();

		obs::record_cycle_outcome(CycleStage::Challenge, CycleOutcome::Attempt);

		let Some(delegate) = self.delegate() else {
			return Err(self.reject(CycleStage::Challenge, &*context, Error::NoDelegate));
		};
		let app_id = match challenge.app_id() {
			Ok(app_id) => app_id,
			Err(e) => {
				let e = self.settle_unresolvable(CycleStage::Challenge, &*context, e.into());

				return Err(e);
			},
		};
		let now = (self.clock)();
		let cycle = CycleId::generate();
		let in_flight = InFlight {
			cycle: cycle.clone(),
			context: context.clone(),
			app_id: app_id.clone(),
			started_at: now,
		};
		let (accepted, expired) = {
			let mut state = self.state.lock();
			let expired = state.take_expired(now, self.config.login_timeout());

			(state.begin(in_flight), expired)
		};

		if let Some(expired) = expired {
			self.fail_expired(expired);
		}
		if let Err(outstanding) = accepted {
			let e = Error::Busy { cycle: outstanding };

			return Err(self.reject(CycleStage::Challenge, &*context, e));
		}

		obs::log_transition(CycleStage::Challenge, &cycle, "awaiting_delegate");

		let completion = LoginCompletion::new(self.this.clone(), cycle.clone());

		delegate.perform_login(platform, &app_id, completion);
		obs::record_cycle_outcome(CycleStage::Challenge, CycleOutcome::Success);

		Ok(cycle)
	}

	/// Answers the in-flight context with `{ "accessToken": token }`.
	pub fn on_delegate_token_received(&self, token: impl Into<TokenSecret>) -> Result<()> {
		self.complete_cycle(None, LoginOutcome::Token(token.into()))
	}

	/// Fails the in-flight context with `info`, verbatim.
	pub fn on_delegate_failure(&self, info: FailureInfo) -> Result<()> {
		self.complete_cycle(None, LoginOutcome::Failure(info))
	}

	/// Fails the in-flight cycle with `timeout` when it is older than the configured login timeout.
	pub fn expire_stale(&self, now: OffsetDateTime) -> Option<CycleId> {
		let expired = self.state.lock().take_expired(now, self.config.login_timeout());

		expired.map(|in_flight| {
			let cycle = in_flight.cycle.clone();

			self.fail_expired(in_flight);

			cycle
		})
	}

	/// Drops the in-flight context without submitting anything.
	pub fn reset(&self) {
		let cleared = self.state.lock().clear();

		if let Some(in_flight) = cleared {
			obs::log_transition(CycleStage::Reset, &in_flight.cycle, "idle");
		}

		obs::record_cycle_outcome(CycleStage::Reset, CycleOutcome::Success);
	}

	pub(crate) fn complete_cycle(
		&self,
		expected: Option<&CycleId>,
		outcome: LoginOutcome,
	) -> Result<()> {
		let stage = match outcome {
			LoginOutcome::Token(_) => CycleStage::Answer,
			LoginOutcome::Failure(_) => CycleStage::Failure,
		};
		let _guard = CycleSpan::new(stage, self.realm()).entered();

		obs::record_cycle_outcome(stage, CycleOutcome::Attempt);

		let payload = match outcome {
			LoginOutcome::Token(token) => match ChallengeAnswer::new(&token).to_json() {
				Ok(answer) => answer,
				Err(e) => return self.settle_unbuildable_answer(expected, e),
			},
			LoginOutcome::Failure(info) => info.into_json(),
		};
		let taken = self.state.lock().take(expected);
		let in_flight = match taken {
			Ok(in_flight) => in_flight,
			Err(e) => {
				obs::log_error(stage, &e);
				obs::record_cycle_outcome(stage, CycleOutcome::Failure);

				return Err(e);
			},
		};

		match stage {
			CycleStage::Answer => in_flight.context.submit_answer(payload),
			_ => in_flight.context.submit_failure(payload),
		}

		obs::log_transition(stage, &in_flight.cycle, "idle");
		obs::record_cycle_outcome(stage, CycleOutcome::Success);

		Ok(())
	}

	pub(crate) fn abandon_cycle(&self, cycle: &CycleId) -> Result<()> {
		let stage = CycleStage::Abandon;
		let _guard = CycleSpan::new(stage, self.realm()).entered();

		match self.config.unresolved_policy {
			UnresolvedPolicy::Fail => {
				let in_flight = self
					.state
					.lock()
					.take(Some(cycle))
					.inspect_err(|e| obs::log_error(stage, e))?;

				obs::log_warn(stage, "login abandoned by the delegate");
				in_flight
					.context
					.submit_failure(FailureInfo::reason(reason::ABANDONED).into_json());
				obs::log_transition(stage, cycle, "idle");
				obs::record_cycle_outcome(stage, CycleOutcome::Failure);
			},
			UnresolvedPolicy::Leave => {
				self.state.lock().check(Some(cycle)).inspect_err(|e| obs::log_error(stage, e))?;

				obs::log_warn(stage, "login abandoned by the delegate; challenge left unanswered");
				obs::record_cycle_outcome(stage, CycleOutcome::Unresolved);
			},
		}

		Ok(())
	}

	/// Settles a token whose answer could not be built. Under `Leave` the cycle is checked but
	/// never taken, so it stays outstanding without an observable `Idle` gap.
	fn settle_unbuildable_answer(&self, expected: Option<&CycleId>, error: Error) -> Result<()> {
		let stage = CycleStage::Answer;

		match self.config.unresolved_policy {
			UnresolvedPolicy::Fail => {
				let in_flight =
					self.state.lock().take(expected).inspect_err(|e| obs::log_error(stage, e))?;

				Err(self.reject(stage, &*in_flight.context, error))
			},
			UnresolvedPolicy::Leave => {
				self.state.lock().check(expected).inspect_err(|e| obs::log_error(stage, e))?;

				Err(self.leave_unanswered(stage, error))
			},
		}
	}

	fn settle_unresolvable(
		&self,
		stage: CycleStage,
		context: &dyn AuthenticationContext,
		error: Error,
	) -> Error {
		match self.config.unresolved_policy {
			UnresolvedPolicy::Fail => self.reject(stage, context, error),
			UnresolvedPolicy::Leave => self.leave_unanswered(stage, error),
		}
	}

	fn leave_unanswered(&self, stage: CycleStage, error: Error) -> Error {
		obs::log_error(stage, &error);
		obs::log_warn(stage, "challenge left unanswered");
		obs::record_cycle_outcome(stage, CycleOutcome::Unresolved);

		error
	}

	fn reject(&self, stage: CycleStage, context: &dyn AuthenticationContext, error: Error) -> Error {
		obs::log_error(stage, &error);
		context.submit_failure(FailureInfo::from_error(&error).into_json());
		obs::record_cycle_outcome(stage, CycleOutcome::Failure);

		error
	}

	fn fail_expired(&self, in_flight: InFlight) {
		let info =
			FailureInfo::reason(reason::TIMEOUT).with_field("cycle", in_flight.cycle.to_string());

		obs::log_warn(CycleStage::Expire, "login timed out");
		in_flight.context.submit_failure(info.into_json());
		obs::record_cycle_outcome(CycleStage::Expire, CycleOutcome::Failure);
	}
}
impl AuthenticationListener for ChallengeBridge {
	fn on_authentication_challenge_received(
		&self,
		context: Arc<dyn AuthenticationContext>,
		challenge: &Challenge,
		platform: &PlatformContext,
	) {
		// Errors are already logged and, where the policy allows, reported to the host.
		let _ = self.on_challenge_received(context, challenge, platform);
	}

	fn on_authentication_success(&self, _platform: &PlatformContext, _info: &JsonValue) {
		self.reset();
	}

	fn on_authentication_failure(&self, _platform: &PlatformContext, _info: &JsonValue) {
		self.reset();
	}
}
impl Debug for ChallengeBridge {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ChallengeBridge")
			.field("config", &self.config)
			.field("status", &self.status())
			.field("delegate_set", &self.delegate.read().is_some())
			.finish()
	}
}
