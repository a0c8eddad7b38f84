//! Session state store for the active plan record.
//!
//! # Responsibility
//! - Own one explicitly constructed [`PlanRecord`] per interactive session.
//! - Provide snapshot export/import and the manual payroll sync action.
//!
//! # Invariants
//! - The projection table is populated before any other operation runs.
//! - Failed imports leave the current record byte-for-byte unchanged.
//! - Derived payroll is advisory; it reaches the table only through
//!   [`PlanSession::sync_payroll_from_staffing`].

use crate::model::plan::PlanRecord;
use crate::session::snapshot::{self, ParseError, Snapshot};
use log::{info, warn};
use uuid::Uuid;

/// Owner of the single in-progress plan record.
///
/// The interactive host holds one of these per session and mutates the
/// record through [`record_mut`](Self::record_mut) as the user types. There
/// is no hidden global; a host that needs multiple isolated sessions simply
/// constructs multiple stores.
#[derive(Debug)]
pub struct PlanSession {
    session_id: Uuid,
    record: PlanRecord,
}

impl PlanSession {
    /// Starts a session with an empty record and all defaults applied,
    /// including the seeded ten-year projection table.
    pub fn new() -> Self {
        let session = Self {
            session_id: Uuid::new_v4(),
            record: PlanRecord::new(),
        };
        info!(
            "event=session_start module=session status=ok session_id={}",
            session.session_id
        );
        session
    }

    /// Stable correlation id for this session's log events.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Read access to the current record.
    pub fn record(&self) -> &PlanRecord {
        &self.record
    }

    /// Mutable access for field-by-field UI binding.
    pub fn record_mut(&mut self) -> &mut PlanRecord {
        &mut self.record
    }

    /// Current advisory payroll figure derived from the staffing plan.
    pub fn derived_payroll(&self) -> i64 {
        self.record.derived_payroll_default()
    }

    /// Writes the derived payroll default into every projection year row.
    ///
    /// One-directional and explicit: invoked by the host when the user
    /// requests synchronization, never on reads or staffing edits.
    pub fn sync_payroll_from_staffing(&mut self) {
        let payroll = self.record.derived_payroll_default();
        self.record.projection.set_payroll_all(payroll);
        info!(
            "event=payroll_sync module=session status=ok session_id={} payroll={}",
            self.session_id, payroll
        );
    }

    /// Serializes the full record into a portable snapshot.
    pub fn export(&self) -> String {
        let text = snapshot::encode(&self.record);
        info!(
            "event=snapshot_export module=session status=ok session_id={} bytes={}",
            self.session_id,
            text.len()
        );
        text
    }

    /// Restores state from snapshot text.
    ///
    /// Parsing and validation complete before any field is touched, so a
    /// rejected snapshot leaves the record unchanged. Present keys overwrite
    /// field-by-field; absent keys (including the projection slot) keep
    /// their current values.
    pub fn import(&mut self, text: &str) -> Result<(), ParseError> {
        let snapshot = match Snapshot::parse(text) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(
                    "event=snapshot_import module=session status=error session_id={} error={err}",
                    self.session_id
                );
                return Err(err);
            }
        };
        let with_projection = snapshot.has_projection();
        snapshot.apply_to(&mut self.record);
        info!(
            "event=snapshot_import module=session status=ok session_id={} projection={}",
            self.session_id, with_projection
        );
        Ok(())
    }
}

impl Default for PlanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::PlanSession;
    use crate::model::plan::Employee;
    use crate::model::projection::ProjectionColumn;

    #[test]
    fn sync_overwrites_every_payroll_row() {
        let mut session = PlanSession::new();
        session
            .record_mut()
            .add_employee(Employee {
                position: "調理".to_string(),
                count: 5,
                monthly_salary: 300_000,
            })
            .unwrap();
        session
            .record_mut()
            .projection
            .set_cell(7, ProjectionColumn::Payroll, 1)
            .unwrap();

        session.sync_payroll_from_staffing();
        for row in session.record().projection.rows() {
            assert_eq!(row.payroll, 18_000_000);
        }
    }

    #[test]
    fn staffing_edits_alone_do_not_touch_the_table() {
        let mut session = PlanSession::new();
        session
            .record_mut()
            .add_employee(Employee {
                position: "営業".to_string(),
                count: 10,
                monthly_salary: 400_000,
            })
            .unwrap();
        // Derived value changed, table did not.
        assert_eq!(session.derived_payroll(), 48_000_000);
        for row in session.record().projection.rows() {
            assert_eq!(row.payroll, 6_000_000);
        }
    }
}
