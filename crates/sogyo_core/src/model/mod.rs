//! Domain model for the founding-plan record.
//!
//! # Responsibility
//! - Define the canonical plan record edited by the interactive host.
//! - Keep field defaults and staffing/projection invariants in one place.
//!
//! # Invariants
//! - Every employee entry has `count >= 1`.
//! - The projection table always holds exactly ten year rows with the fixed
//!   column set.

pub mod plan;
pub mod projection;
