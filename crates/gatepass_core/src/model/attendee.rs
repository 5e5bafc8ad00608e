//! Attendee identity model.
//!
//! # Responsibility
//! - Define the registrant record keyed by email.
//! - Validate registrant profile input before it reaches storage.
//!
//! # Invariants
//! - `id` is generated once and never reused for another attendee.
//! - Profile fields are fixed at creation; later registrations with the same
//!   email never overwrite them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier carried in credentials.
pub type AttendeeId = Uuid;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 50;
const AGE_MAX: u8 = 150;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Persisted attendee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub id: AttendeeId,
    pub fullname: String,
    /// Unique across all attendees.
    pub email: String,
    pub institution: String,
    pub age: u8,
}

impl Attendee {
    /// Builds the record stored for a first-time registrant.
    pub fn create(profile: &NewAttendee) -> Self {
        Self {
            id: Uuid::new_v4(),
            fullname: profile.fullname.trim().to_string(),
            email: profile.email.trim().to_string(),
            institution: profile.institution.trim().to_string(),
            age: profile.age,
        }
    }
}

/// Registrant input submitted with a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendee {
    pub fullname: String,
    pub email: String,
    pub institution: String,
    pub age: u8,
}

impl NewAttendee {
    pub fn new(
        fullname: impl Into<String>,
        email: impl Into<String>,
        institution: impl Into<String>,
        age: u8,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            email: email.into(),
            institution: institution.into(),
            age,
        }
    }

    /// Checks the registration form constraints.
    ///
    /// # Errors
    /// - Name and institution must be 2..=50 characters after trimming.
    /// - Email must look like `local@domain.tld`.
    /// - Age must be at most 150.
    pub fn validate(&self) -> Result<(), AttendeeValidationError> {
        check_length("fullname", &self.fullname)?;
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(AttendeeValidationError::InvalidEmail(self.email.clone()));
        }
        check_length("institution", &self.institution)?;
        if self.age > AGE_MAX {
            return Err(AttendeeValidationError::AgeOutOfRange(self.age));
        }
        Ok(())
    }
}

/// Registrant input rejected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendeeValidationError {
    FieldLength {
        field: &'static str,
        min: usize,
        max: usize,
    },
    InvalidEmail(String),
    AgeOutOfRange(u8),
}

impl Display for AttendeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldLength { field, min, max } => {
                write!(f, "{field} must be between {min} and {max} characters")
            }
            Self::InvalidEmail(value) => write!(f, "email `{value}` is not a valid address"),
            Self::AgeOutOfRange(age) => write!(f, "age {age} must be between 0 and {AGE_MAX}"),
        }
    }
}

impl Error for AttendeeValidationError {}

fn check_length(field: &'static str, value: &str) -> Result<(), AttendeeValidationError> {
    let chars = value.trim().chars().count();
    if (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(AttendeeValidationError::FieldLength {
            field,
            min: NAME_MIN_CHARS,
            max: NAME_MAX_CHARS,
        })
    }
}
