//! Strongly typed resource identifiers used to address API paths.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view)?;

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
				validate_view($kind, &value)?;

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
// Characters that would change the shape of the request path.
const RESERVED: [char; 4] = ['/', '?', '#', '%'];

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was absent or empty.
	#[error("{kind} identifier is required.")]
	Empty {
		/// Kind of identifier (school, user, section, ...).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (school, user, section, ...).
		kind: &'static str,
	},
	/// The identifier contains a character that would alter the request path.
	#[error("{kind} identifier contains the reserved character `{character}`.")]
	ReservedCharacter {
		/// Kind of identifier (school, user, section, ...).
		kind: &'static str,
		/// Offending character.
		character: char,
	},
	/// The identifier is a `.` or `..` style dot segment that would be collapsed out of the path.
	#[error("{kind} identifier must not consist only of dots.")]
	DotSegment {
		/// Kind of identifier (school, user, section, ...).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (school, user, section, ...).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}
impl IdentifierError {
	/// Kind of identifier that failed validation.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Empty { kind }
			| Self::ContainsWhitespace { kind }
			| Self::ReservedCharacter { kind, .. }
			| Self::DotSegment { kind }
			| Self::TooLong { kind, .. } => *kind,
		}
	}
}

def_id! { SchoolId, "Identifier of a school (building) record.", "School" }
def_id! { UserId, "Identifier of a user record.", "User" }
def_id! { CourseId, "Identifier of a course record.", "Course" }
def_id! { SectionId, "Identifier of a course section.", "Section" }
def_id! { EnrollmentId, "Identifier of a section enrollment.", "Enrollment" }

fn validate_view(kind: &'static str, view: &str) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if let Some(character) = view.chars().find(|c| RESERVED.contains(c)) {
		return Err(IdentifierError::ReservedCharacter { kind, character });
	}
	if view.chars().all(|c| c == '.') {
		return Err(IdentifierError::DotSegment { kind });
	}
	if view.len() > IDENTIFIER_MAX_LEN {
		return Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_validate() {
		assert_eq!(SchoolId::new(""), Err(IdentifierError::Empty { kind: "School" }));
		assert!(SchoolId::new(" 42").is_err(), "Leading whitespace must be rejected.");
		assert!(UserId::new("42 ").is_err(), "Trailing whitespace must be rejected.");
		assert_eq!(
			SectionId::new("1/../2"),
			Err(IdentifierError::ReservedCharacter { kind: "Section", character: '/' })
		);
		assert!(CourseId::new("7?x=1").is_err());

		let school = SchoolId::new("42").expect("Numeric school id should be valid.");

		assert_eq!(school.as_ref(), "42");
		assert_eq!(format!("{school:?}"), "School(42)");
		assert_eq!(format!("schools/{school}"), "schools/42");
	}

	#[test]
	fn dot_segments_are_rejected() {
		for raw in [".", "..", "..."] {
			assert_eq!(SchoolId::new(raw), Err(IdentifierError::DotSegment { kind: "School" }));
		}

		UserId::new("a.b").expect("Dots inside an identifier should be valid.");
		UserId::new(".hidden").expect("Leading dot with other characters should be valid.");
	}

	#[test]
	fn error_reports_kind() {
		let err = EnrollmentId::new("").expect_err("Empty enrollment id must be rejected.");

		assert_eq!(err.kind(), "Enrollment");
		assert_eq!(err.to_string(), "Enrollment identifier is required.");
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let user: UserId =
			serde_json::from_str("\"1001\"").expect("User id should deserialize successfully.");

		assert_eq!(user.as_ref(), "1001");
		assert_eq!(serde_json::to_string(&user).expect("User id should serialize."), "\"1001\"");
		assert!(serde_json::from_str::<UserId>("\"with space\"").is_err());
		assert!(serde_json::from_str::<UserId>("\"\"").is_err());
	}

	#[test]
	fn length_limits() {
		let exact = "9".repeat(IDENTIFIER_MAX_LEN);

		SchoolId::new(&exact).expect("Exact length should succeed.");

		let too_long = "9".repeat(IDENTIFIER_MAX_LEN + 1);

		assert!(SchoolId::new(&too_long).is_err());
		assert!("".parse::<SchoolId>().is_err());
	}
}
