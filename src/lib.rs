//! Answer host authentication challenges with a pluggable identity-provider login, keeping exactly
//! one in-flight authentication context per bridge.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod bridge;
pub mod challenge;
pub mod config;
pub mod delegate;
pub mod error;
pub mod host;
pub mod obs;

pub use bridge::{BridgeStatus, ChallengeBridge};
pub use config::{BridgeConfig, UnresolvedPolicy};
pub use error::{Error, Result};

mod _prelude {
	pub use std::{
		any::Any,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::{Arc, Weak},
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

pub use serde_json;
#[cfg(test)] use {color_eyre as _, tokio as _};
