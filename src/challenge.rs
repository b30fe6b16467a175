//! Challenge, answer, and failure payloads exchanged with the host framework.
//!
//! The host hands the bridge a JSON object carrying `facebookAppId`; the bridge answers with
//! `{ "accessToken": <token> }` or passes an opaque failure object through verbatim.

// self
use crate::{
	_prelude::*,
	auth::{ProviderAppId, TokenSecret},
};

/// Challenge field holding the provider application id.
pub const APP_ID_KEY: &str = "facebookAppId";
/// Answer field holding the provider access token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Reasons the bridge attaches to failures it originates.
pub mod reason {
	/// Challenge payload was malformed.
	pub const MALFORMED_CHALLENGE: &str = "malformed_challenge";
	/// Answer payload could not be built.
	pub const ANSWER_SERIALIZATION: &str = "answer_serialization";
	/// Another challenge is still outstanding.
	pub const BUSY: &str = "busy";
	/// No login delegate was registered.
	pub const NO_DELEGATE: &str = "no_delegate";
	/// The login delegate dropped its completion handle.
	pub const ABANDONED: &str = "abandoned";
	/// The login exceeded the configured timeout.
	pub const TIMEOUT: &str = "timeout";
}

/// Challenge payload could not yield a provider app id.
#[derive(Debug, ThisError)]
pub enum ChallengeError {
	/// The payload is not a JSON object.
	#[error("Challenge payload is not a JSON object.")]
	NotAnObject,
	/// The payload has no `facebookAppId` field.
	#[error("Challenge is missing the `facebookAppId` field.")]
	MissingAppId,
	/// The `facebookAppId` field is not a string.
	#[error("Challenge payload is malformed.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Opaque challenge payload received from the host framework.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Challenge(JsonValue);
impl Challenge {
	/// Wraps a raw JSON payload.
	pub fn new(payload: JsonValue) -> Self {
		Self(payload)
	}

	/// Raw payload as received.
	pub fn payload(&self) -> &JsonValue {
		&self.0
	}

	/// Extracts the provider app id. Any JSON string is accepted.
	pub fn app_id(&self) -> Result<ProviderAppId, ChallengeError> {
		#[derive(Deserialize)]
		struct Fields {
			#[serde(rename = "facebookAppId")]
			app_id: ProviderAppId,
		}

		let Some(object) = self.0.as_object() else {
			return Err(ChallengeError::NotAnObject);
		};

		if !object.contains_key(APP_ID_KEY) {
			return Err(ChallengeError::MissingAppId);
		}

		let fields: Fields = serde_path_to_error::deserialize(&self.0)
			.map_err(|source| ChallengeError::Parse { source })?;

		Ok(fields.app_id)
	}
}
impl From<JsonValue> for Challenge {
	fn from(payload: JsonValue) -> Self {
		Self(payload)
	}
}

/// Answer submitted to the host once the delegate yields a token.
#[derive(Clone, Debug, Serialize)]
pub struct ChallengeAnswer<'a> {
	/// Provider access token.
	#[serde(rename = "accessToken")]
	pub access_token: &'a TokenSecret,
}
impl<'a> ChallengeAnswer<'a> {
	/// Creates an answer for the provided token.
	pub fn new(access_token: &'a TokenSecret) -> Self {
		Self { access_token }
	}

	/// Serializes the answer into the host's JSON shape.
	pub fn to_json(&self) -> Result<JsonValue> {
		serde_json::to_value(self).map_err(|source| Error::AnswerSerialization { source })
	}
}

/// Opaque failure payload forwarded to the host's submit-failure operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureInfo(JsonMap<String, JsonValue>);
impl FailureInfo {
	/// Wraps an arbitrary JSON object.
	pub fn new(fields: JsonMap<String, JsonValue>) -> Self {
		Self(fields)
	}

	/// Builds `{ "reason": <reason> }`.
	pub fn reason(reason: impl Into<String>) -> Self {
		Self::default().with_field("reason", reason.into())
	}

	/// Builds a bridge-originated failure from an [`Error`].
	pub fn from_error(error: &Error) -> Self {
		Self::reason(error.reason()).with_field("message", error.to_string())
	}

	/// Adds or replaces a field.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
		self.0.insert(key.into(), value.into());

		self
	}

	/// Reads a field.
	pub fn get(&self, key: &str) -> Option<&JsonValue> {
		self.0.get(key)
	}

	/// Converts the payload into a JSON value, untouched.
	pub fn into_json(self) -> JsonValue {
		JsonValue::Object(self.0)
	}
}
impl TryFrom<JsonValue> for FailureInfo {
	type Error = JsonValue;

	fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
		match value {
			JsonValue::Object(fields) => Ok(Self(fields)),
			other => Err(other),
		}
	}
}

/// Result of one login attempt, produced once per challenge cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum LoginOutcome {
	/// Provider issued an access token.
	Token(TokenSecret),
	/// Provider login failed or was cancelled.
	Failure(FailureInfo),
}
impl LoginOutcome {
	/// Stable label suitable for log fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			LoginOutcome::Token(_) => "token",
			LoginOutcome::Failure(_) => "failure",
		}
	}
}
