//! # Carport Core
//!
//! Domain types shared by the database and API crates: entity models,
//! request/response payloads, the error type, and the appointment admission
//! rules that keep the workshop from being overbooked.

/// Appointment booking workflow over an injected store
pub mod booking;
/// Domain error type
pub mod errors;
/// Entities and request/response payloads
pub mod models;
/// Operating hours, overlap detection and admission
pub mod scheduling;
