//! Bridge-level error types shared across challenge handling, delegates, and configuration.

// self
use crate::{
	_prelude::*,
	auth::CycleId,
	challenge::{ChallengeError, reason},
};

/// Bridge-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical bridge error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Challenge payload is missing or carries an invalid provider app id.
	#[error(transparent)]
	MalformedChallenge(#[from] ChallengeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The `{accessToken}` answer payload could not be built.
	#[error("Challenge answer could not be serialized.")]
	AnswerSerialization {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// Another challenge cycle is still awaiting its delegate.
	#[error("Challenge cycle `{cycle}` is still awaiting the login delegate.")]
	Busy {
		/// Identifier of the outstanding cycle.
		cycle: CycleId,
	},
	/// No login delegate has been registered with the bridge.
	#[error("No login delegate is registered.")]
	NoDelegate,
	/// A login outcome arrived while no authentication context was outstanding.
	#[error("No authentication context is awaiting an answer.")]
	NoInFlightContext,
	/// A completion handle tried to resolve a cycle that was already cleared.
	#[error("Challenge cycle `{cycle}` is no longer in flight.")]
	StaleCompletion {
		/// Identifier of the cycle the completion belonged to.
		cycle: CycleId,
	},
}
impl Error {
	/// Stable label used when the error is reported to the host as a failure reason.
	pub const fn reason(&self) -> &'static str {
		match self {
			Error::MalformedChallenge(_) => reason::MALFORMED_CHALLENGE,
			Error::Config(_) => "config",
			Error::AnswerSerialization { .. } => reason::ANSWER_SERIALIZATION,
			Error::Busy { .. } => reason::BUSY,
			Error::NoDelegate => reason::NO_DELEGATE,
			Error::NoInFlightContext => "no_in_flight_context",
			Error::StaleCompletion { .. } => "stale_completion",
		}
	}
}

/// Configuration and validation failures raised while building a bridge.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Configuration document could not be parsed.
	#[error("Bridge configuration is malformed.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Login timeout must be positive.
	#[error("The login timeout must be positive.")]
	NonPositiveTimeout,
}
