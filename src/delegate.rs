//! Login delegate contract, its one-shot completion handle, and the provider SDK seam.
//!
//! The bridge hands every accepted challenge to a [`LoginDelegate`] together with a
//! [`LoginCompletion`]. The delegate runs the provider's login UI however it likes and reports the
//! outcome once, from any thread. [`DefaultLoginDelegate`] drives the provider's
//! standard flow through a [`ProviderSdk`].

pub mod completion;
pub mod default;

pub use completion::*;
pub use default::*;

// self
use crate::{
	auth::ProviderAppId,
	challenge::LoginOutcome,
	host::{ActivityResult, PlatformContext},
};

/// Pluggable provider login performed on behalf of a challenge.
///
/// Implementors are required to be `Send + Sync`; the bridge calls them without holding any of
/// its locks, so resolving `completion` synchronously from inside `perform_login` is allowed.
pub trait LoginDelegate: Send + Sync {
	/// Starts the provider login for `app_id`.
	///
	/// The outcome reaches the bridge either through `completion` or through the bridge's
	/// `on_delegate_token_received` / `on_delegate_failure` entry points. Dropping `completion`
	/// leaves the cycle outstanding; call [`LoginCompletion::abandon`] to give up on it.
	fn perform_login(
		&self,
		platform: &PlatformContext,
		app_id: &ProviderAppId,
		completion: LoginCompletion,
	);

	/// Receives platform activity results forwarded by the bridge.
	fn handle_activity_result(&self, result: &ActivityResult);
}

/// Provider SDK surface used by [`DefaultLoginDelegate`] and bridge registration.
pub trait ProviderSdk: Send + Sync {
	/// Initializes process-wide SDK state. Must tolerate repeated calls.
	fn initialize(&self, platform: &PlatformContext);

	/// Launches the provider's standard login flow for `app_id`.
	fn log_in(&self, platform: &PlatformContext, app_id: &ProviderAppId);

	/// Feeds an activity result to the SDK; returns the login outcome once the flow finished.
	fn on_activity_result(&self, result: &ActivityResult) -> Option<LoginOutcome>;
}
