//! Credential payload presented at gates.

use crate::model::attendee::AttendeeId;
use crate::model::session::Session;
use serde::{Deserialize, Serialize};

/// Re-derivable (attendee, session) pair carried by a scannable ticket.
///
/// Serialized as `{"id": ..., "session": ...}` to stay compatible with tickets
/// already printed by the web layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "id")]
    pub attendee_id: AttendeeId,
    pub session: Session,
}

impl Credential {
    pub fn new(attendee_id: AttendeeId, session: Session) -> Self {
        Self {
            attendee_id,
            session,
        }
    }
}
