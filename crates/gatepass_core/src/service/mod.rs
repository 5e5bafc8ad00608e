//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the registration and gate flows.
//! - Translate repository conflicts into domain errors.
//! - Keep the CLI and other callers decoupled from storage details.

pub mod attendance_service;
pub mod enrollment_service;
pub mod gate;
pub mod identity_service;
pub mod registration_service;
