//! Credential codec.
//!
//! # Responsibility
//! - Turn an (attendee, session) pair into the text payload rendered as a QR
//!   code by the ticket layer, and parse scanned text back.
//!
//! # Invariants
//! - `decode(&encode(c)) == Ok(c)` for every credential.
//! - Encoding is deterministic: same pair, same bytes.
//! - No integrity check is performed; any well-formed payload is accepted.

use crate::model::credential::Credential;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Scanned payload could not be read as a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedCredential {
    pub reason: String,
}

impl Display for MalformedCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed credential: {}", self.reason)
    }
}

impl Error for MalformedCredential {}

/// Serializes a credential to compact JSON.
pub fn encode(credential: &Credential) -> String {
    serde_json::to_string(credential)
        .expect("credential is a uuid and a unit-variant enum; serialization cannot fail")
}

/// Parses scanned text into a credential.
///
/// Unknown extra fields are ignored; a missing `id`/`session`, a non-uuid id
/// or an unknown session label is rejected.
pub fn decode(raw: &str) -> Result<Credential, MalformedCredential> {
    serde_json::from_str::<Credential>(raw.trim()).map_err(|err| MalformedCredential {
        reason: err.to_string(),
    })
}
