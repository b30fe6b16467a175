//! Default delegate wired to the provider SDK's standard login flow.

// self
use crate::{
	_prelude::*,
	auth::ProviderAppId,
	delegate::{LoginCompletion, LoginDelegate, ProviderSdk},
	host::{ActivityResult, PlatformContext},
	obs::{self, CycleStage},
};

/// Delegate that launches the SDK login and settles the pending completion from activity results.
///
/// Only one login is tracked at a time. Starting a new login detaches the previous handle; the
/// bridge only starts a login once the earlier cycle was cleared, so that handle is stale.
pub struct DefaultLoginDelegate {
	sdk: Arc<dyn ProviderSdk>,
	pending: Mutex<Option<LoginCompletion>>,
}
impl DefaultLoginDelegate {
	/// Creates a delegate over the provided SDK.
	pub fn new(sdk: Arc<dyn ProviderSdk>) -> Self {
		Self { sdk, pending: Mutex::new(None) }
	}

	/// Returns `true` while a login awaits its activity result.
	pub fn is_pending(&self) -> bool {
		self.pending.lock().is_some()
	}
}
impl LoginDelegate for DefaultLoginDelegate {
	fn perform_login(
		&self,
		platform: &PlatformContext,
		app_id: &ProviderAppId,
		completion: LoginCompletion,
	) {
		*self.pending.lock() = Some(completion);
		self.sdk.log_in(platform, app_id);
	}

	fn handle_activity_result(&self, result: &ActivityResult) {
		let Some(outcome) = self.sdk.on_activity_result(result) else {
			return;
		};
		let pending = self.pending.lock().take();
		let Some(completion) = pending else {
			obs::log_warn(CycleStage::ActivityResult, "login finished without a pending challenge");

			return;
		};

		if let Err(e) = completion.resolve(outcome) {
			obs::log_error(CycleStage::ActivityResult, &e);
		}
	}
}
impl Debug for DefaultLoginDelegate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("DefaultLoginDelegate").field("pending", &self.is_pending()).finish()
	}
}
