//! Runs one challenge end to end against an in-process host and a console "provider SDK".

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use parking_lot::Mutex;
use serde_json::{Value, json};
// self
use challenge_bridge::{
	BridgeConfig, ChallengeBridge,
	auth::{ProviderAppId, RealmId, TokenSecret},
	challenge::{Challenge, LoginOutcome},
	delegate::ProviderSdk,
	host::{
		ActivityResult, AuthenticationContext, AuthenticationListener, AuthenticationRegistry,
		PlatformContext,
	},
};

const LOGIN_REQUEST_CODE: i32 = 64206;
const RESULT_OK: i32 = -1;

#[derive(Default)]
struct InProcessHost {
	listeners: Mutex<Vec<(RealmId, Arc<dyn AuthenticationListener>)>>,
}
impl InProcessHost {
	fn challenge(&self, realm: &str, payload: Value, context: Arc<ConsoleContext>) -> Result<()> {
		let listener = self
			.listeners
			.lock()
			.iter()
			.rev()
			.find(|(registered, _)| registered.as_ref() == realm)
			.map(|(_, listener)| listener.clone())
			.ok_or_else(|| eyre!("no listener for realm {realm}"))?;

		listener.on_authentication_challenge_received(
			context,
			&Challenge::new(payload),
			&PlatformContext::empty(),
		);

		Ok(())
	}
}
impl AuthenticationRegistry for InProcessHost {
	fn register_authentication_listener(
		&self,
		realm: &RealmId,
		listener: Arc<dyn AuthenticationListener>,
	) {
		println!("host: listener registered for {realm}");

		self.listeners.lock().push((realm.clone(), listener));
	}
}

struct ConsoleContext;
impl AuthenticationContext for ConsoleContext {
	fn submit_answer(&self, answer: Value) {
		println!("host: challenge answered with {answer}");
	}

	fn submit_failure(&self, info: Value) {
		println!("host: challenge failed with {info}");
	}
}

struct ConsoleSdk;
impl ProviderSdk for ConsoleSdk {
	fn initialize(&self, _platform: &PlatformContext) {
		println!("sdk: initialized");
	}

	fn log_in(&self, _platform: &PlatformContext, app_id: &ProviderAppId) {
		println!("sdk: showing login dialog for app {app_id}");
	}

	fn on_activity_result(&self, result: &ActivityResult) -> Option<LoginOutcome> {
		(result.request_code == LOGIN_REQUEST_CODE && result.result_code == RESULT_OK)
			.then(|| LoginOutcome::Token(TokenSecret::new("console-token")))
	}
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let host = Arc::new(InProcessHost::default());
	let bridge = ChallengeBridge::global_or_init(|| {
		ChallengeBridge::new(host.clone(), Arc::new(ConsoleSdk), BridgeConfig::default())
	});

	bridge.register_default_authentication_listener(&PlatformContext::empty());
	host.challenge(
		RealmId::FACEBOOK,
		json!({ "facebookAppId": "123" }),
		Arc::new(ConsoleContext),
	)?;
	println!("bridge: {:?}", bridge.status());

	bridge.on_activity_result_called(&ActivityResult::new(LOGIN_REQUEST_CODE, RESULT_OK))?;
	println!("bridge: {:?}", bridge.status());

	Ok(())
}
