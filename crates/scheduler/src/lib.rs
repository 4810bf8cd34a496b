//! # Tutorboard Scheduler
//!
//! The scheduling service the presentation layer talks to. A [`Board`] wires
//! the pure domain operations from `tutorboard-core` to a `RecordStore`:
//! every write goes to the store, and the board's in-memory view catches up
//! through the store's subscription callbacks, so all consumers of the same
//! store see the same state.
//!
//! Operations follow the forgiving semantics of the board model: addressing
//! a teacher or slot id that no longer exists is a logged no-op, and a slot
//! spec that fails civil-time conversion is dropped without failing the
//! batch it arrived in.

/// The board service and its collection names
pub mod board;
/// Stored record shapes for the teacher and slot collections
pub mod records;

pub use board::{Board, SLOTS, TEACHERS};
