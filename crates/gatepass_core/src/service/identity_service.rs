//! Identity resolution: one attendee per email.
//!
//! # Invariants
//! - `resolve_or_create` returns the same id for the same email, forever.
//! - An existing attendee's profile is never overwritten.

use crate::error::{GateError, GateResult};
use crate::model::attendee::{Attendee, AttendeeId, NewAttendee};
use crate::repo::attendee_repo::{AttendeeRepository, RepoError};
use log::{debug, info};

/// Maps emails to stable attendee identities.
pub struct IdentityResolver<R: AttendeeRepository> {
    repo: R,
}

impl<R: AttendeeRepository> IdentityResolver<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the id registered for `profile.email`, creating the attendee
    /// from `profile` when the email is new.
    ///
    /// When a concurrent registration wins the insert race, the winner's id is
    /// returned and this call's profile is discarded.
    pub fn resolve_or_create(&self, profile: &NewAttendee) -> GateResult<AttendeeId> {
        profile.validate()?;
        let email = profile.email.trim();

        if let Some(id) = self.repo.find_id_by_email(email)? {
            debug!("event=identity_resolve module=identity status=ok outcome=existing attendee_id={id}");
            return Ok(id);
        }

        let attendee = Attendee::create(profile);
        match self.repo.insert_attendee(&attendee) {
            Ok(()) => {
                info!(
                    "event=identity_resolve module=identity status=ok outcome=created attendee_id={}",
                    attendee.id
                );
                Ok(attendee.id)
            }
            Err(RepoError::Conflict(table)) => {
                let id = self
                    .repo
                    .find_id_by_email(email)?
                    .ok_or(GateError::Storage(RepoError::Conflict(table)))?;
                info!("event=identity_resolve module=identity status=ok outcome=raced attendee_id={id}");
                Ok(id)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Finds the attendee id registered for `email`.
    pub fn lookup_by_email(&self, email: &str) -> GateResult<AttendeeId> {
        self.repo
            .find_id_by_email(email.trim())?
            .ok_or(GateError::AttendeeNotFound)
    }

    /// Loads the stored attendee record.
    pub fn get(&self, id: AttendeeId) -> GateResult<Attendee> {
        self.repo.get_attendee(id)?.ok_or(GateError::AttendeeNotFound)
    }
}
