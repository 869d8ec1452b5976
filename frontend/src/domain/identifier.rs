//! Opaque backend-issued identifiers.
//!
//! The Codefolio API keys every record with a string identifier (a MongoDB
//! `ObjectId` in practice). The front end never mints identifiers; each type
//! here can only be built from a value that arrived in a response or was typed
//! by the user to address an existing record.

use std::fmt;

/// Validation errors returned by identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierValidationError {
    /// The value was empty.
    Empty {
        /// Identifier kind, such as `user id`.
        kind: &'static str,
    },
    /// The value had surrounding whitespace.
    Padded {
        /// Identifier kind, such as `user id`.
        kind: &'static str,
    },
}

impl fmt::Display for IdentifierValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { kind } => write!(f, "{kind} must not be empty"),
            Self::Padded { kind } => {
                write!(f, "{kind} must not contain leading or trailing whitespace")
            }
        }
    }
}

impl std::error::Error for IdentifierValidationError {}

macro_rules! define_identifier {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierValidationError> {
                Self::from_owned(id.as_ref().to_owned())
            }

            fn from_owned(id: String) -> Result<Self, IdentifierValidationError> {
                if id.is_empty() {
                    return Err(IdentifierValidationError::Empty { kind: $kind });
                }
                if id.trim() != id {
                    return Err(IdentifierValidationError::Padded { kind: $kind });
                }
                Ok(Self(id))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::from_owned(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdentifierValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::new(value)
            }
        }
    };
}

define_identifier! {
    /// Identifier of a platform user.
    UserId => "user id"
}
define_identifier! {
    /// Identifier of a mentor profile.
    MentorId => "mentor id"
}
define_identifier! {
    /// Identifier of a catalogue course.
    CourseId => "course id"
}
define_identifier! {
    /// Identifier of a notification record.
    NotificationId => "notification id"
}
define_identifier! {
    /// Identifier of a mentor application.
    ApplicationId => "application id"
}
define_identifier! {
    /// Identifier of a mentor session booking.
    BookingId => "booking id"
}
