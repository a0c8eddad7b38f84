//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sogyo_core` linkage.
//! - Exercise the session lifecycle once without touching the filesystem.

use sogyo_core::PlanSession;

fn main() {
    println!("sogyo_core version={}", sogyo_core::core_version());

    let session = PlanSession::new();
    let snapshot = session.export();
    println!("session_id={}", session.session_id());
    println!("derived_payroll={}", session.derived_payroll());
    println!("snapshot_bytes={}", snapshot.len());
}
