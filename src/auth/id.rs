//! Identifiers that namespace store keys.
//!
//! Store keys render as `{platform}_{phase}:{tenant}:{caller}`, so no identifier may contain the
//! `:` separator, and platform identifiers are further limited to lowercase ASCII letters,
//! digits, and `-` to keep the `_` before the phase unambiguous.

// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal, $check:path) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				$check($kind, &value)?;

				Ok(Self(value))
			}

			/// Returns the identifier as a string slice.
			pub fn as_str(&self) -> &str {
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
				Self::new(value)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
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
	};
}

/// Separator used by store keys; identifiers must not contain it.
pub const KEY_SEPARATOR: char = ':';

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (tenant, caller, platform).
		kind: &'static str,
	},
	/// The identifier contains the store key separator.
	#[error("{kind} identifier cannot contain `:`.")]
	ContainsSeparator {
		/// Kind of identifier (tenant, caller, platform).
		kind: &'static str,
	},
	/// A platform identifier used a character outside `[a-z0-9-]`.
	#[error("{kind} identifier contains {found:?}; only `[a-z0-9-]` is allowed.")]
	InvalidCharacter {
		/// Kind of identifier (always platform).
		kind: &'static str,
		/// First offending character.
		found: char,
	},
}

def_id! { TenantId, "Organization that owns an integration flow.", "Tenant", check_owner_part }
def_id! { CallerId, "End user that initiated an integration flow.", "Caller", check_owner_part }
def_id! {
	PlatformId,
	"Identifier for a platform descriptor; prefixes every store key.",
	"Platform",
	check_platform
}

// Owner identifiers are otherwise opaque: a nonsensical value only yields an unusable flow.
fn check_owner_part(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if value.contains(KEY_SEPARATOR) {
		return Err(IdentifierError::ContainsSeparator { kind });
	}

	Ok(())
}

fn check_platform(kind: &'static str, value: &str) -> Result<(), IdentifierError> {
	check_owner_part(kind, value)?;

	match value.chars().find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')) {
		Some(found) => Err(IdentifierError::InvalidCharacter { kind, found }),
		None => Ok(()),
	}
}
