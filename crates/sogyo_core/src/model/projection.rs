//! Ten-year financial projection table.
//!
//! # Responsibility
//! - Hold the editable ten-year grid of financial figures.
//! - Enforce the fixed row/column shape regardless of edit history.
//!
//! # Invariants
//! - Exactly [`YEAR_COUNT`] rows, labeled `1年目`..`10年目`, always present.
//! - The column set is fixed; cells are raw yen amounts without formatting.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of projected fiscal years. The table never grows or shrinks.
pub const YEAR_COUNT: usize = 10;

/// Default annual revenue placed in every fresh row, in yen.
pub const DEFAULT_REVENUE_YEN: i64 = 30_000_000;
/// Default annual cost of goods placed in every fresh row, in yen.
pub const DEFAULT_COST_OF_GOODS_YEN: i64 = 10_000_000;
/// Default annual rent placed in every fresh row, in yen.
pub const DEFAULT_RENT_YEN: i64 = 1_200_000;
/// Default annual other-expenses figure placed in every fresh row, in yen.
pub const DEFAULT_OTHER_EXPENSES_YEN: i64 = 3_000_000;

/// Fixed editable columns of the projection table.
///
/// The derived gross-profit column is not part of this set; it is computed
/// during document generation and never stored back into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionColumn {
    Revenue,
    CostOfGoods,
    Payroll,
    Rent,
    OtherExpenses,
}

impl ProjectionColumn {
    /// All editable columns in display order.
    pub const ALL: [Self; 5] = [
        Self::Revenue,
        Self::CostOfGoods,
        Self::Payroll,
        Self::Rent,
        Self::OtherExpenses,
    ];

    /// Japanese display label, also used as the snapshot wire label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Revenue => "売上高",
            Self::CostOfGoods => "売上原価",
            Self::Payroll => "人件費",
            Self::Rent => "家賃",
            Self::OtherExpenses => "その他経費",
        }
    }
}

/// One fiscal-year row of the projection table. All values are yen per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionRow {
    pub revenue: i64,
    pub cost_of_goods: i64,
    pub payroll: i64,
    pub rent: i64,
    pub other_expenses: i64,
}

impl ProjectionRow {
    /// Reads one cell by column.
    pub fn cell(&self, column: ProjectionColumn) -> i64 {
        match column {
            ProjectionColumn::Revenue => self.revenue,
            ProjectionColumn::CostOfGoods => self.cost_of_goods,
            ProjectionColumn::Payroll => self.payroll,
            ProjectionColumn::Rent => self.rent,
            ProjectionColumn::OtherExpenses => self.other_expenses,
        }
    }

    /// Writes one cell by column.
    pub fn set_cell(&mut self, column: ProjectionColumn, value: i64) {
        match column {
            ProjectionColumn::Revenue => self.revenue = value,
            ProjectionColumn::CostOfGoods => self.cost_of_goods = value,
            ProjectionColumn::Payroll => self.payroll = value,
            ProjectionColumn::Rent => self.rent = value,
            ProjectionColumn::OtherExpenses => self.other_expenses = value,
        }
    }
}

/// Addressing error for projection cell access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// Year index outside `0..YEAR_COUNT`.
    YearOutOfRange(usize),
}

impl Display for ProjectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange(index) => write!(
                f,
                "year index {index} out of range (expected 0..{YEAR_COUNT})"
            ),
        }
    }
}

impl Error for ProjectionError {}

/// The ten-year financial grid edited interactively.
///
/// Rows are addressed by zero-based year index; the display label for index
/// `i` is [`year_label(i)`](year_label).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionTable {
    rows: Vec<ProjectionRow>,
}

impl ProjectionTable {
    /// Builds the default table with the given payroll figure in every row.
    ///
    /// Callers pass the derived payroll default so a fresh table already
    /// reflects the staffing plan present at construction time.
    pub fn with_defaults(payroll: i64) -> Self {
        let row = ProjectionRow {
            revenue: DEFAULT_REVENUE_YEN,
            cost_of_goods: DEFAULT_COST_OF_GOODS_YEN,
            payroll,
            rent: DEFAULT_RENT_YEN,
            other_expenses: DEFAULT_OTHER_EXPENSES_YEN,
        };
        Self {
            rows: vec![row; YEAR_COUNT],
        }
    }

    /// Returns all rows in year order. The slice always has `YEAR_COUNT`
    /// entries.
    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    /// Reads one cell.
    pub fn cell(&self, year_index: usize, column: ProjectionColumn) -> Result<i64, ProjectionError> {
        self.rows
            .get(year_index)
            .map(|row| row.cell(column))
            .ok_or(ProjectionError::YearOutOfRange(year_index))
    }

    /// Writes one cell.
    pub fn set_cell(
        &mut self,
        year_index: usize,
        column: ProjectionColumn,
        value: i64,
    ) -> Result<(), ProjectionError> {
        let row = self
            .rows
            .get_mut(year_index)
            .ok_or(ProjectionError::YearOutOfRange(year_index))?;
        row.set_cell(column, value);
        Ok(())
    }

    /// Overwrites the payroll column of every year row.
    ///
    /// This is the manual one-directional sync target; it is never called
    /// implicitly on reads or edits.
    pub fn set_payroll_all(&mut self, payroll: i64) {
        for row in &mut self.rows {
            row.payroll = payroll;
        }
    }
}

/// Display label for a zero-based year index (`0` -> `1年目`).
pub fn year_label(year_index: usize) -> String {
    format!("{}年目", year_index + 1)
}

#[cfg(test)]
mod tests {
    use super::{year_label, ProjectionColumn, ProjectionError, ProjectionTable, YEAR_COUNT};

    #[test]
    fn default_table_has_ten_rows_with_seed_values() {
        let table = ProjectionTable::with_defaults(6_000_000);
        assert_eq!(table.rows().len(), YEAR_COUNT);
        for row in table.rows() {
            assert_eq!(row.revenue, 30_000_000);
            assert_eq!(row.cost_of_goods, 10_000_000);
            assert_eq!(row.payroll, 6_000_000);
            assert_eq!(row.rent, 1_200_000);
            assert_eq!(row.other_expenses, 3_000_000);
        }
    }

    #[test]
    fn cell_edit_is_local_to_one_row() {
        let mut table = ProjectionTable::with_defaults(6_000_000);
        table
            .set_cell(3, ProjectionColumn::Revenue, 42_000_000)
            .expect("index 3 is in range");
        assert_eq!(table.cell(3, ProjectionColumn::Revenue).unwrap(), 42_000_000);
        assert_eq!(table.cell(2, ProjectionColumn::Revenue).unwrap(), 30_000_000);
        assert_eq!(table.rows().len(), YEAR_COUNT);
    }

    #[test]
    fn out_of_range_year_is_rejected() {
        let mut table = ProjectionTable::with_defaults(6_000_000);
        let err = table
            .set_cell(YEAR_COUNT, ProjectionColumn::Rent, 1)
            .unwrap_err();
        assert_eq!(err, ProjectionError::YearOutOfRange(YEAR_COUNT));
    }

    #[test]
    fn year_labels_are_one_based() {
        assert_eq!(year_label(0), "1年目");
        assert_eq!(year_label(9), "10年目");
    }
}
