//! Process-wide bridge slot for hosts that look the bridge up instead of injecting it.

// std
use std::sync::OnceLock;
// self
use crate::{_prelude::*, bridge::ChallengeBridge};

static GLOBAL: OnceLock<Arc<ChallengeBridge>> = OnceLock::new();

impl ChallengeBridge {
	/// Returns the process-wide bridge, if one was installed.
	pub fn global() -> Option<Arc<Self>> {
		GLOBAL.get().cloned()
	}

	/// Returns the process-wide bridge, building it with `init` on first access.
	///
	/// Concurrent first callers block until one `init` finishes and all receive the same bridge;
	/// later calls are lock-free reads. The slot is never cleared.
	pub fn global_or_init<F>(init: F) -> Arc<Self>
	where
		F: FnOnce() -> Arc<Self>,
	{
		GLOBAL.get_or_init(init).clone()
	}
}
