mod common;

// crates.io
use serde_json::json;
// self
use challenge_bridge::{
	BridgeConfig,
	auth::TokenSecret,
	challenge::{FailureInfo, LoginOutcome},
	host::{ActivityResult, PlatformContext},
};
use common::*;

const LOGIN_REQUEST_CODE: i32 = 64206;

#[test]
fn default_listener_answers_with_the_sdk_token() {
	let harness = Harness::new(BridgeConfig::default());
	let context = RecordingContext::new();

	harness.bridge.register_default_authentication_listener(&PlatformContext::empty());
	harness.dispatch(&context, facebook_challenge("123"));

	assert_eq!(harness.sdk.logins(), vec!["123".to_string()]);
	assert_eq!(harness.sdk.inits(), 1);

	// Intermediate activity results that do not finish the login are ignored.
	harness
		.bridge
		.on_activity_result_called(&ActivityResult::new(1, 0))
		.expect("Default delegate is registered.");

	assert_eq!(context.submissions(), 0);

	harness.sdk.finish_with(LoginOutcome::Token(TokenSecret::new("tok-abc")));
	harness
		.bridge
		.on_activity_result_called(&ActivityResult::new(LOGIN_REQUEST_CODE, -1))
		.expect("Default delegate is registered.");

	assert_eq!(context.answers(), vec![json!({ "accessToken": "tok-abc" })]);
	assert_eq!(context.submissions(), 1);
	assert!(harness.bridge.status().is_idle());
}

#[test]
fn default_listener_reports_sdk_failures() {
	let harness = Harness::new(BridgeConfig::default());
	let context = RecordingContext::new();

	harness.bridge.register_default_authentication_listener(&PlatformContext::empty());
	harness.dispatch(&context, facebook_challenge("123"));
	harness.sdk.finish_with(LoginOutcome::Failure(FailureInfo::reason("cancelled")));
	harness
		.bridge
		.on_activity_result_called(&ActivityResult::new(LOGIN_REQUEST_CODE, 0))
		.expect("Default delegate is registered.");

	assert_eq!(context.failures(), vec![json!({ "reason": "cancelled" })]);
	assert!(harness.bridge.status().is_idle());
}

#[test]
fn finished_login_without_pending_challenge_is_ignored() {
	let harness = Harness::new(BridgeConfig::default());

	harness.bridge.register_default_authentication_listener(&PlatformContext::empty());
	harness.sdk.finish_with(LoginOutcome::Token(TokenSecret::new("tok-orphan")));
	harness
		.bridge
		.on_activity_result_called(&ActivityResult::new(LOGIN_REQUEST_CODE, -1))
		.expect("Default delegate is registered.");

	assert!(harness.bridge.status().is_idle());
}

#[test]
fn sdk_token_after_host_reset_does_not_answer_the_next_challenge() {
	let harness = Harness::new(BridgeConfig::default());
	let first = RecordingContext::new();
	let second = RecordingContext::new();

	harness.bridge.register_default_authentication_listener(&PlatformContext::empty());
	harness.dispatch(&first, facebook_challenge("123"));
	harness.bridge.reset();
	harness.dispatch(&second, facebook_challenge("456"));
	harness.sdk.finish_with(LoginOutcome::Token(TokenSecret::new("tok-second")));
	harness
		.bridge
		.on_activity_result_called(&ActivityResult::new(LOGIN_REQUEST_CODE, -1))
		.expect("Default delegate is registered.");

	assert_eq!(first.submissions(), 0);
	assert_eq!(second.answers(), vec![json!({ "accessToken": "tok-second" })]);
	assert_eq!(harness.sdk.logins(), vec!["123".to_string(), "456".to_string()]);
}
