//! Requested-scope lists carried on authorization URLs.

// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain embedded whitespace characters.
	#[error("Scope contains whitespace: {scope}.")]
	ContainsWhitespace {
		/// The offending scope string.
		scope: String,
	},
}

/// Scopes a platform descriptor requests, in the order the platform documents them.
///
/// Duplicates collapse onto their first occurrence, so the rendered scope string is stable
/// for a given declaration.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ScopeSet(Vec<String>);
impl ScopeSet {
	/// Validates and de-duplicates `scopes`, keeping declaration order.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut kept = Vec::<String>::new();

		for scope in scopes {
			let scope = scope.into();

			if scope.is_empty() {
				return Err(ScopeValidationError::Empty);
			}
			if scope.chars().any(char::is_whitespace) {
				return Err(ScopeValidationError::ContainsWhitespace { scope });
			}
			if !kept.contains(&scope) {
				kept.push(scope);
			}
		}

		Ok(Self(kept))
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when the platform requests no scopes.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if `scope` is requested.
	pub fn contains(&self, scope: &str) -> bool {
		self.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Renders the `scope` parameter using the platform's delimiter.
	pub fn joined(&self, delimiter: char) -> String {
		let mut buf = [0; 4];
		let delimiter: &str = delimiter.encode_utf8(&mut buf);

		self.iter().collect::<Vec<_>>().join(delimiter)
	}
}
impl Debug for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_list().entries(self.iter()).finish()
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.joined(' '))
	}
}
impl TryFrom<Vec<String>> for ScopeSet {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<ScopeSet> for Vec<String> {
	fn from(value: ScopeSet) -> Self {
		value.0
	}
}
impl FromStr for ScopeSet {
	type Err = ScopeValidationError;

	/// Parses a whitespace-delimited scope string; the empty string yields an empty set.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if !s.is_empty() && s.trim().is_empty() {
			return Err(ScopeValidationError::Empty);
		}

		Self::new(s.split_whitespace())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn declaration_order_survives_deduplication() {
		let scopes = ScopeSet::new([
			"crm.objects.contacts.read",
			"crm.objects.companies.read",
			"crm.objects.contacts.read",
			"oauth",
		])
		.expect("Scope list should be valid.");

		assert_eq!(scopes.len(), 3);
		assert_eq!(
			scopes.joined(' '),
			"crm.objects.contacts.read crm.objects.companies.read oauth"
		);
		assert_eq!(
			scopes.joined(','),
			"crm.objects.contacts.read,crm.objects.companies.read,oauth"
		);
		assert!(scopes.contains("oauth"));
	}

	#[test]
	fn padded_or_blank_entries_are_rejected() {
		let err = ScopeSet::new([" oauth "]).expect_err("Padded scopes must be rejected.");

		assert!(matches!(err, ScopeValidationError::ContainsWhitespace { .. }));
		assert!(ScopeSet::new([""]).is_err());
		assert!(ScopeSet::from_str("   ").is_err(), "Whitespace-only input must be rejected.");
		assert!(ScopeSet::from_str("").expect("Empty input should parse.").is_empty());
	}

	#[test]
	fn serde_uses_a_plain_list() {
		let scopes = ScopeSet::from_str("schema.bases:read data.records:read")
			.expect("Scope string should parse successfully.");
		let json = serde_json::to_string(&scopes).expect("Scopes should serialize.");

		assert_eq!(json, r#"["schema.bases:read","data.records:read"]"#);
		assert!(serde_json::from_str::<ScopeSet>(r#"["a b"]"#).is_err());
	}
}
