//! Founding-plan record and staffing model.
//!
//! # Responsibility
//! - Define the single mutable record collected over one session.
//! - Derive the advisory payroll default from the staffing plan.
//!
//! # Invariants
//! - `Employee::count` is at least 1 on every validated record.
//! - The derived payroll default never drops below [`PAYROLL_FLOOR_YEN`].
//! - The projection table is populated at construction, never absent.

use crate::model::projection::ProjectionTable;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lower bound for the derived annual payroll default, in yen.
pub const PAYROLL_FLOOR_YEN: i64 = 6_000_000;

/// Default loan repayment term in months.
pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 84;
/// Default annual loan interest rate in percent.
pub const DEFAULT_LOAN_RATE_PERCENT: f64 = 2.0;

/// Position label given to a freshly appended employee entry.
pub const DEFAULT_EMPLOYEE_POSITION: &str = "スタッフ";
/// Monthly salary given to a freshly appended employee entry, in yen.
pub const DEFAULT_EMPLOYEE_SALARY_YEN: i64 = 250_000;

/// One line of the staffing plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Free-text position label, e.g. `店長`.
    pub position: String,
    /// Headcount for this position. Must be at least 1.
    pub count: u32,
    /// Monthly salary per head, in yen.
    pub monthly_salary: i64,
}

impl Employee {
    /// Creates a staffing line with the interactive-host defaults.
    pub fn with_defaults() -> Self {
        Self {
            position: DEFAULT_EMPLOYEE_POSITION.to_string(),
            count: 1,
            monthly_salary: DEFAULT_EMPLOYEE_SALARY_YEN,
        }
    }

    /// Annual cost of this line: `count * monthly_salary * 12`.
    pub fn annual_cost(&self) -> i64 {
        i64::from(self.count) * self.monthly_salary * 12
    }
}

/// Validation errors for plan record mutations and imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanValidationError {
    /// Employee entry with a zero headcount.
    EmployeeCountZero { index: usize, position: String },
    /// Employee index outside the current staffing list.
    EmployeeIndexOutOfRange { index: usize, len: usize },
}

impl Display for PlanValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeCountZero { index, position } => write!(
                f,
                "employee #{index} (`{position}`) has count 0; at least 1 is required"
            ),
            Self::EmployeeIndexOutOfRange { index, len } => {
                write!(f, "employee index {index} out of range (len {len})")
            }
        }
    }
}

impl Error for PlanValidationError {}

/// The single business-plan record collected over one session.
///
/// Narrative and funding fields are bound one-to-one to host input widgets;
/// the projection table is edited cell-by-cell. No field is ever persisted
/// server-side; the record lives in the session and in exported snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    /// Founding motive (創業の動機).
    pub motive: String,
    /// Founder career summary (略歴).
    pub career: String,
    /// Product or service description.
    pub product_service: String,
    /// Target customer segment.
    pub target_customer: String,
    /// Key partners.
    pub key_partners: String,
    /// Key resources.
    pub key_resources: String,
    /// Sales channels.
    pub channels: String,

    /// Own equity contribution, yen.
    pub equity: i64,
    /// Requested loan amount, yen.
    pub loan_request: i64,
    /// Loan repayment term, months.
    pub loan_term: u32,
    /// Annual loan interest rate, percent.
    pub loan_rate: f64,
    /// Equipment cost, yen.
    pub equip_cost: i64,
    /// Operating cost, yen.
    pub operate_cost: i64,

    /// Staffing plan lines in display order.
    pub employees: Vec<Employee>,
    /// Ten-year projection grid. Always populated.
    pub projection: ProjectionTable,
}

impl PlanRecord {
    /// Creates an empty record with all session-start defaults applied.
    ///
    /// The projection table is seeded immediately so every later operation
    /// can rely on it being present; with no staffing lines yet, its payroll
    /// column starts at the floor value.
    pub fn new() -> Self {
        Self {
            motive: String::new(),
            career: String::new(),
            product_service: String::new(),
            target_customer: String::new(),
            key_partners: String::new(),
            key_resources: String::new(),
            channels: String::new(),
            equity: 0,
            loan_request: 0,
            loan_term: DEFAULT_LOAN_TERM_MONTHS,
            loan_rate: DEFAULT_LOAN_RATE_PERCENT,
            equip_cost: 0,
            operate_cost: 0,
            employees: Vec::new(),
            projection: ProjectionTable::with_defaults(PAYROLL_FLOOR_YEN),
        }
    }

    /// Appends a staffing line after validating its headcount.
    pub fn add_employee(&mut self, employee: Employee) -> Result<(), PlanValidationError> {
        if employee.count == 0 {
            return Err(PlanValidationError::EmployeeCountZero {
                index: self.employees.len(),
                position: employee.position,
            });
        }
        self.employees.push(employee);
        Ok(())
    }

    /// Removes and returns the staffing line at `index`.
    pub fn remove_employee(&mut self, index: usize) -> Result<Employee, PlanValidationError> {
        if index >= self.employees.len() {
            return Err(PlanValidationError::EmployeeIndexOutOfRange {
                index,
                len: self.employees.len(),
            });
        }
        Ok(self.employees.remove(index))
    }

    /// Advisory annual payroll figure: the larger of the floor and the
    /// summed annual cost of all staffing lines.
    ///
    /// Never written into the projection table implicitly; see
    /// `PlanSession::sync_payroll_from_staffing`.
    pub fn derived_payroll_default(&self) -> i64 {
        let staffed: i64 = self.employees.iter().map(Employee::annual_cost).sum();
        staffed.max(PAYROLL_FLOOR_YEN)
    }

    /// Validates record-level invariants, currently staffing headcounts.
    pub fn validate(&self) -> Result<(), PlanValidationError> {
        for (index, employee) in self.employees.iter().enumerate() {
            if employee.count == 0 {
                return Err(PlanValidationError::EmployeeCountZero {
                    index,
                    position: employee.position.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for PlanRecord {
    fn default() -> Self {
        Self::new()
    }
}
