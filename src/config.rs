//! Bridge configuration: realm, unresolved-cycle policy, and login timeout.

// self
use crate::{_prelude::*, auth::RealmId, error::ConfigError};

/// What the bridge does on paths that would otherwise leave the host challenge unanswered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
	/// Submit a failure to the host and clear the in-flight context.
	#[default]
	Fail,
	/// Log only and leave the host waiting.
	///
	/// Malformed challenges get no submission, and an answer that cannot be built keeps the
	/// in-flight context outstanding.
	Leave,
}
impl UnresolvedPolicy {
	/// Returns a stable label suitable for log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			UnresolvedPolicy::Fail => "fail",
			UnresolvedPolicy::Leave => "leave",
		}
	}
}

/// Runtime configuration for a [`ChallengeBridge`](crate::ChallengeBridge).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
	/// Realm the bridge registers for.
	pub realm: RealmId,
	/// Handling of paths that cannot produce a regular answer.
	pub unresolved_policy: UnresolvedPolicy,
	/// Seconds after which an unanswered login is failed with a timeout.
	pub login_timeout_secs: Option<u64>,
}
impl BridgeConfig {
	/// Parses a JSON configuration document, reporting the failing field path.
	pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(raw);
		let config: Self = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| ConfigError::Parse { source })?;

		config.validate()?;

		Ok(config)
	}

	/// Overrides the realm.
	pub fn with_realm(mut self, realm: RealmId) -> Self {
		self.realm = realm;

		self
	}

	/// Overrides the unresolved-cycle policy.
	pub fn with_unresolved_policy(mut self, policy: UnresolvedPolicy) -> Self {
		self.unresolved_policy = policy;

		self
	}

	/// Sets the login timeout, rounded up to whole seconds. Non-positive values disable it.
	pub fn with_login_timeout(mut self, timeout: Duration) -> Self {
		let secs = timeout.whole_seconds() + i64::from(timeout.subsec_nanoseconds() > 0);

		self.login_timeout_secs = u64::try_from(secs).ok().filter(|secs| *secs > 0);

		self
	}

	/// Login timeout, when configured. A zero timeout is treated as disabled.
	pub fn login_timeout(&self) -> Option<Duration> {
		self.login_timeout_secs
			.filter(|secs| *secs > 0)
			.map(|secs| Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)))
	}

	/// Checks invariants that serde cannot express.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.login_timeout_secs == Some(0) {
			return Err(ConfigError::NonPositiveTimeout);
		}

		Ok(())
	}
}
