//! Recording fakes for the host framework, provider SDK, and login delegate.

#![allow(dead_code)]

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use parking_lot::Mutex;
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime, macros};
// self
use challenge_bridge::{
	BridgeConfig, ChallengeBridge,
	auth::{ProviderAppId, RealmId},
	bridge::Clock,
	challenge::{Challenge, LoginOutcome},
	delegate::{LoginCompletion, LoginDelegate, ProviderSdk},
	host::{
		ActivityResult, AuthenticationContext, AuthenticationListener, AuthenticationRegistry,
		PlatformContext,
	},
};

/// Host registry that remembers every registration.
#[derive(Default)]
pub struct RecordingRegistry {
	registrations: Mutex<Vec<(RealmId, Arc<dyn AuthenticationListener>)>>,
}
impl RecordingRegistry {
	pub fn realms(&self) -> Vec<String> {
		self.registrations.lock().iter().map(|(realm, _)| realm.to_string()).collect()
	}

	/// Latest listener registered for `realm`, as the host would dispatch to it.
	pub fn listener(&self, realm: &str) -> Arc<dyn AuthenticationListener> {
		self.registrations
			.lock()
			.iter()
			.rev()
			.find(|(registered, _)| registered.as_ref() == realm)
			.map(|(_, listener)| listener.clone())
			.expect("A listener should be registered for the realm.")
	}
}
impl AuthenticationRegistry for RecordingRegistry {
	fn register_authentication_listener(
		&self,
		realm: &RealmId,
		listener: Arc<dyn AuthenticationListener>,
	) {
		self.registrations.lock().push((realm.clone(), listener));
	}
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// One-shot host context that records submissions.
#[derive(Default)]
pub struct RecordingContext {
	answers: Mutex<Vec<Value>>,
	failures: Mutex<Vec<Value>>,
	on_submit: Mutex<Option<Hook>>,
}
impl RecordingContext {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Runs `hook` synchronously inside the next submission, like a re-entrant host.
	pub fn on_submit(&self, hook: impl Fn() + Send + Sync + 'static) {
		*self.on_submit.lock() = Some(Box::new(hook));
	}

	pub fn answers(&self) -> Vec<Value> {
		self.answers.lock().clone()
	}

	pub fn failures(&self) -> Vec<Value> {
		self.failures.lock().clone()
	}

	pub fn submissions(&self) -> usize {
		self.answers.lock().len() + self.failures.lock().len()
	}

	pub fn failure_reason(&self, idx: usize) -> Value {
		self.failures.lock()[idx]["reason"].clone()
	}

	fn run_hook(&self) {
		let hook = self.on_submit.lock().take();

		if let Some(hook) = hook {
			hook();
		}
	}
}
impl AuthenticationContext for RecordingContext {
	fn submit_answer(&self, answer: Value) {
		self.answers.lock().push(answer);
		self.run_hook();
	}

	fn submit_failure(&self, info: Value) {
		self.failures.lock().push(info);
		self.run_hook();
	}
}

/// Provider SDK fake that finishes logins when told to.
#[derive(Default)]
pub struct ScriptedSdk {
	inits: AtomicUsize,
	logins: Mutex<Vec<String>>,
	next_outcome: Mutex<Option<LoginOutcome>>,
}
impl ScriptedSdk {
	pub fn inits(&self) -> usize {
		self.inits.load(Ordering::SeqCst)
	}

	pub fn logins(&self) -> Vec<String> {
		self.logins.lock().clone()
	}

	/// The next activity result reports `outcome`.
	pub fn finish_with(&self, outcome: LoginOutcome) {
		*self.next_outcome.lock() = Some(outcome);
	}
}
impl ProviderSdk for ScriptedSdk {
	fn initialize(&self, _platform: &PlatformContext) {
		self.inits.fetch_add(1, Ordering::SeqCst);
	}

	fn log_in(&self, _platform: &PlatformContext, app_id: &ProviderAppId) {
		self.logins.lock().push(app_id.to_string());
	}

	fn on_activity_result(&self, _result: &ActivityResult) -> Option<LoginOutcome> {
		self.next_outcome.lock().take()
	}
}

/// Custom delegate that parks completions until the test resolves them.
#[derive(Default)]
pub struct ScriptedDelegate {
	app_ids: Mutex<Vec<String>>,
	completions: Mutex<Vec<LoginCompletion>>,
	activity_results: Mutex<Vec<ActivityResult>>,
}
impl ScriptedDelegate {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn app_ids(&self) -> Vec<String> {
		self.app_ids.lock().clone()
	}

	pub fn logins(&self) -> usize {
		self.app_ids.lock().len()
	}

	pub fn activity_results(&self) -> Vec<ActivityResult> {
		self.activity_results.lock().clone()
	}

	/// Removes the oldest parked completion.
	pub fn take_completion(&self) -> LoginCompletion {
		let mut completions = self.completions.lock();

		assert!(!completions.is_empty(), "A login completion should be parked.");

		completions.remove(0)
	}
}
impl LoginDelegate for ScriptedDelegate {
	fn perform_login(
		&self,
		_platform: &PlatformContext,
		app_id: &ProviderAppId,
		completion: LoginCompletion,
	) {
		self.app_ids.lock().push(app_id.to_string());
		self.completions.lock().push(completion);
	}

	fn handle_activity_result(&self, result: &ActivityResult) {
		self.activity_results.lock().push(result.clone());
	}
}

/// Manually advanced clock.
pub struct TestClock(Mutex<OffsetDateTime>);
impl TestClock {
	pub fn new() -> Arc<Self> {
		Arc::new(Self(Mutex::new(macros::datetime!(2025-11-10 12:00 UTC))))
	}

	pub fn now(&self) -> OffsetDateTime {
		*self.0.lock()
	}

	pub fn advance(&self, by: Duration) {
		*self.0.lock() += by;
	}

	pub fn as_clock(self: &Arc<Self>) -> Clock {
		let clock = self.clone();

		Arc::new(move || clock.now())
	}
}

pub struct Harness {
	pub bridge: Arc<ChallengeBridge>,
	pub registry: Arc<RecordingRegistry>,
	pub sdk: Arc<ScriptedSdk>,
	pub clock: Arc<TestClock>,
}
impl Harness {
	pub fn new(config: BridgeConfig) -> Self {
		let registry = Arc::new(RecordingRegistry::default());
		let sdk = Arc::new(ScriptedSdk::default());
		let clock = TestClock::new();
		let bridge =
			ChallengeBridge::with_clock(registry.clone(), sdk.clone(), config, clock.as_clock());

		Self { bridge, registry, sdk, clock }
	}

	/// Harness with a registered [`ScriptedDelegate`].
	pub fn with_delegate(config: BridgeConfig) -> (Self, Arc<ScriptedDelegate>) {
		let harness = Self::new(config);
		let delegate = ScriptedDelegate::new();

		harness.bridge.register_authentication_listener(&PlatformContext::empty(), delegate.clone());

		(harness, delegate)
	}

	/// Dispatches a challenge the way the host does, through the registered listener.
	pub fn dispatch(&self, context: &Arc<RecordingContext>, payload: Value) {
		let listener = self.registry.listener(self.bridge.realm());

		listener.on_authentication_challenge_received(
			context.clone(),
			&Challenge::new(payload),
			&PlatformContext::empty(),
		);
	}
}

pub fn facebook_challenge(app_id: &str) -> Value {
	json!({ "facebookAppId": app_id })
}
