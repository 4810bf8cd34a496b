//! # Tutorboard Core
//!
//! Pure domain core for the scheduling board: the closed timezone registry,
//! the DST-correct time conversion engine, and the Teacher / AvailabilitySlot
//! model with its invariants. No I/O lives here; persistence and presentation
//! are collaborators built on top of this crate.

/// Civil-time to UTC conversion and zone-local formatting
pub mod convert;
/// Domain error types
pub mod errors;
/// Teacher, student and availability slot models
pub mod models;
/// Closed registry of supported timezone codes
pub mod timezone;
