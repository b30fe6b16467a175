//! Validated identifiers for realms, provider applications, and challenge cycles.

// std
use std::{ops::Deref, str::FromStr};
// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $validate:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				$validate($kind, view)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				$validate($kind, &value)?;

				Ok(Self(value))
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;
const CYCLE_ID_LEN: usize = 16;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (realm, cycle).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (realm, cycle).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed byte count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (realm, cycle).
		kind: &'static str,
		/// Maximum permitted byte count.
		max: usize,
	},
}

def_id! {
	RealmId,
	"Authentication realm the host framework routes challenges by.",
	"Realm",
	validate_view
}
def_id! {
	ProviderAppId,
	"Identity-provider application id carried by a challenge, taken verbatim.",
	"App",
	accept_any
}
def_id! { CycleId, "Correlation id minted for every accepted challenge.", "Cycle", validate_view }
impl RealmId {
	/// Realm the host framework uses for Facebook challenges.
	pub const FACEBOOK: &'static str = "wl_facebookRealm";

	/// Returns the default Facebook realm.
	pub fn facebook() -> Self {
		Self(Self::FACEBOOK.to_owned())
	}
}
impl Default for RealmId {
	fn default() -> Self {
		Self::facebook()
	}
}
impl CycleId {
	/// Mints a random alphanumeric cycle id.
	pub fn generate() -> Self {
		Self(rand::rng().sample_iter(Alphanumeric).take(CYCLE_ID_LEN).map(char::from).collect())
	}
}

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

// The provider SDK owns the app id format; an empty string is passed through too.
fn accept_any(_kind: &'static str, _view: &str) -> Result<(), IdentifierError> {
	Ok(())
}
