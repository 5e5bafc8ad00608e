//! Domain model for registration and attendance.
//!
//! # Responsibility
//! - Define attendee identity, session labels and credential payloads.
//! - Keep validation of registrant input next to the data it guards.
//!
//! # Invariants
//! - Every attendee is identified by a stable `AttendeeId`.
//! - Sessions form a closed set; free-text labels are parsed at the boundary.

pub mod attendee;
pub mod credential;
pub mod session;
