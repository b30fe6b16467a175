//! Contracts for the host authentication framework the bridge plugs into.
//!
//! The host owns challenge routing: it registers listeners per realm through
//! [`AuthenticationRegistry`], hands each challenge to the listener together with a one-shot
//! [`AuthenticationContext`], and later reports the overall result back to the listener. These
//! traits only describe that surface so the bridge never depends on a concrete platform SDK.

// self
use crate::{_prelude::*, auth::RealmId, challenge::Challenge};

/// One outstanding host challenge awaiting an answer or a failure.
///
/// The host treats the context as one-shot: after either submission it is spent. The bridge never
/// calls both, and never calls either twice.
pub trait AuthenticationContext: Send + Sync {
	/// Answers the challenge with the provided JSON payload.
	fn submit_answer(&self, answer: JsonValue);

	/// Fails the challenge with the provided JSON payload.
	fn submit_failure(&self, info: JsonValue);
}

/// Callback set the host invokes on the listener registered for a realm.
pub trait AuthenticationListener: Send + Sync {
	/// A challenge for the listener's realm arrived.
	fn on_authentication_challenge_received(
		&self,
		context: Arc<dyn AuthenticationContext>,
		challenge: &Challenge,
		platform: &PlatformContext,
	);

	/// The host considers the authentication successful.
	fn on_authentication_success(&self, platform: &PlatformContext, info: &JsonValue);

	/// The host considers the authentication failed.
	fn on_authentication_failure(&self, platform: &PlatformContext, info: &JsonValue);
}

/// Host registry that routes challenges to realm-specific listeners.
pub trait AuthenticationRegistry: Send + Sync {
	/// Registers `listener` for `realm`, replacing any previous listener for it.
	fn register_authentication_listener(
		&self,
		realm: &RealmId,
		listener: Arc<dyn AuthenticationListener>,
	);
}

/// Opaque platform handle (activity, window, UI context) threaded through to delegates.
#[derive(Clone)]
pub struct PlatformContext(Arc<dyn Any + Send + Sync>);
impl PlatformContext {
	/// Wraps a platform value.
	pub fn new<T>(value: T) -> Self
	where
		T: 'static + Send + Sync,
	{
		Self(Arc::new(value))
	}

	/// Context that carries nothing, for hosts without a UI handle.
	pub fn empty() -> Self {
		Self::new(())
	}

	/// Borrows the wrapped value when it has type `T`.
	pub fn downcast_ref<T>(&self) -> Option<&T>
	where
		T: 'static,
	{
		self.0.downcast_ref()
	}
}
impl Default for PlatformContext {
	fn default() -> Self {
		Self::empty()
	}
}
impl Debug for PlatformContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("PlatformContext(..)")
	}
}

/// Platform activity result forwarded verbatim to the login delegate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityResult {
	/// Request code the activity was started with.
	pub request_code: i32,
	/// Result code the activity finished with.
	pub result_code: i32,
	/// Optional opaque result data.
	pub data: Option<JsonValue>,
}
impl ActivityResult {
	/// Creates a new result without data.
	pub fn new(request_code: i32, result_code: i32) -> Self {
		Self { request_code, result_code, data: None }
	}

	/// Attaches result data.
	pub fn with_data(mut self, data: JsonValue) -> Self {
		self.data = Some(data);

		self
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn platform_context_downcasts_to_wrapped_type() {
		let platform = PlatformContext::new(String::from("main-activity"));

		assert_eq!(platform.downcast_ref::<String>().map(String::as_str), Some("main-activity"));
		assert!(platform.downcast_ref::<u32>().is_none());
		assert!(PlatformContext::empty().downcast_ref::<()>().is_some());
	}
}
