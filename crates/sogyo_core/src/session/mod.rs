//! Session state store and snapshot transfer format.
//!
//! # Responsibility
//! - Own the single in-progress plan record for the active session.
//! - Export/import the record as a portable JSON snapshot.
//!
//! # Invariants
//! - Import is atomic: a snapshot either fully applies or the current record
//!   stays untouched.
//! - The projection table travels as a row-oriented intermediate string, not
//!   as a plain nested object.

pub mod snapshot;
pub mod store;
