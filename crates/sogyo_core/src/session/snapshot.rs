//! Snapshot wire format for save/restore across sessions.
//!
//! # Responsibility
//! - Encode a plan record as a UTF-8 JSON document keyed by field name.
//! - Decode and fully validate a snapshot before anything is applied.
//!
//! # Invariants
//! - The projection table is embedded as a row-oriented JSON string under
//!   [`PROJECTION_KEY`]; the plain `projection` key never appears.
//! - Decoding never mutates session state; merge application happens only
//!   after the whole snapshot validated.

use crate::model::plan::{Employee, PlanRecord, PlanValidationError};
use crate::model::projection::{year_label, ProjectionColumn, ProjectionTable, YEAR_COUNT};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot key carrying the table-preserving projection intermediate.
pub const PROJECTION_KEY: &str = "projection_data_json";

/// Import failure. The current record is guaranteed untouched.
#[derive(Debug)]
pub enum ParseError {
    /// The snapshot is not parseable as the expected JSON document.
    Json(serde_json::Error),
    /// The projection intermediate is present but malformed.
    Projection(String),
    /// Decoded fields violate record invariants.
    Validation(PlanValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "snapshot is not valid JSON: {err}"),
            Self::Projection(message) => {
                write!(f, "snapshot projection table is malformed: {message}")
            }
            Self::Validation(err) => write!(f, "snapshot violates plan invariants: {err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Projection(_) => None,
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<PlanValidationError> for ParseError {
    fn from(value: PlanValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Raw snapshot document. Every key is optional so partial snapshots merge
/// field-by-field into the current record.
#[derive(Debug, Deserialize)]
struct SnapshotDoc {
    motive: Option<String>,
    career: Option<String>,
    product_service: Option<String>,
    target_customer: Option<String>,
    key_partners: Option<String>,
    key_resources: Option<String>,
    channels: Option<String>,
    equity: Option<i64>,
    loan_request: Option<i64>,
    loan_term: Option<u32>,
    loan_rate: Option<f64>,
    equip_cost: Option<i64>,
    operate_cost: Option<i64>,
    employees: Option<Vec<Employee>>,
    projection_data_json: Option<String>,
}

/// Fully decoded and validated snapshot, ready to apply.
#[derive(Debug)]
pub struct Snapshot {
    doc: SnapshotDoc,
    projection: Option<ProjectionTable>,
}

impl Snapshot {
    /// Parses and validates snapshot text without touching any record.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let doc: SnapshotDoc = serde_json::from_str(text)?;

        if let Some(employees) = &doc.employees {
            for (index, employee) in employees.iter().enumerate() {
                if employee.count == 0 {
                    return Err(PlanValidationError::EmployeeCountZero {
                        index,
                        position: employee.position.clone(),
                    }
                    .into());
                }
            }
        }

        let projection = doc
            .projection_data_json
            .as_deref()
            .map(decode_projection)
            .transpose()?;

        Ok(Self { doc, projection })
    }

    /// Returns whether the snapshot carries a projection table.
    pub fn has_projection(&self) -> bool {
        self.projection.is_some()
    }

    /// Merges the snapshot into `record`, overwriting only present fields.
    ///
    /// A snapshot lacking [`PROJECTION_KEY`] leaves the current projection
    /// table unchanged.
    pub fn apply_to(self, record: &mut PlanRecord) {
        let doc = self.doc;
        merge(&mut record.motive, doc.motive);
        merge(&mut record.career, doc.career);
        merge(&mut record.product_service, doc.product_service);
        merge(&mut record.target_customer, doc.target_customer);
        merge(&mut record.key_partners, doc.key_partners);
        merge(&mut record.key_resources, doc.key_resources);
        merge(&mut record.channels, doc.channels);
        merge(&mut record.equity, doc.equity);
        merge(&mut record.loan_request, doc.loan_request);
        merge(&mut record.loan_term, doc.loan_term);
        merge(&mut record.loan_rate, doc.loan_rate);
        merge(&mut record.equip_cost, doc.equip_cost);
        merge(&mut record.operate_cost, doc.operate_cost);
        merge(&mut record.employees, doc.employees);
        merge(&mut record.projection, self.projection);
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Encodes a full record as snapshot JSON.
///
/// Every field is written; the projection table goes into its intermediate
/// string slot. Field values of this shape cannot fail to serialize, so the
/// result is plain `String`.
pub fn encode(record: &PlanRecord) -> String {
    let value = json!({
        "motive": record.motive,
        "career": record.career,
        "product_service": record.product_service,
        "target_customer": record.target_customer,
        "key_partners": record.key_partners,
        "key_resources": record.key_resources,
        "channels": record.channels,
        "equity": record.equity,
        "loan_request": record.loan_request,
        "loan_term": record.loan_term,
        "loan_rate": record.loan_rate,
        "equip_cost": record.equip_cost,
        "operate_cost": record.operate_cost,
        "employees": record.employees,
        PROJECTION_KEY: encode_projection(&record.projection),
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

/// Encodes the projection table as its row-oriented intermediate string:
/// one entry per year label mapping column label to cell value.
pub fn encode_projection(table: &ProjectionTable) -> String {
    let mut years = Map::new();
    for (index, row) in table.rows().iter().enumerate() {
        let mut columns = Map::new();
        for column in ProjectionColumn::ALL {
            columns.insert(column.label().to_string(), Value::from(row.cell(column)));
        }
        years.insert(year_label(index), Value::Object(columns));
    }
    Value::Object(years).to_string()
}

/// Decodes the row-oriented projection intermediate back into a table.
///
/// Every year label and every column label must be present; unknown extra
/// keys (e.g. derived columns written by other tools) are ignored. Cell
/// values may arrive as floats and are truncated to whole yen.
pub fn decode_projection(text: &str) -> Result<ProjectionTable, ParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ParseError::Projection(err.to_string()))?;
    let years = value
        .as_object()
        .ok_or_else(|| ParseError::Projection("expected a JSON object of year rows".to_string()))?;

    let mut table = ProjectionTable::with_defaults(0);
    for index in 0..YEAR_COUNT {
        let label = year_label(index);
        let row = years
            .get(&label)
            .and_then(Value::as_object)
            .ok_or_else(|| ParseError::Projection(format!("missing year row `{label}`")))?;
        for column in ProjectionColumn::ALL {
            let cell = row.get(column.label()).ok_or_else(|| {
                ParseError::Projection(format!(
                    "year row `{label}` is missing column `{}`",
                    column.label()
                ))
            })?;
            let amount = cell
                .as_i64()
                .or_else(|| cell.as_f64().map(|v| v as i64))
                .ok_or_else(|| {
                    ParseError::Projection(format!(
                        "cell `{label}`/`{}` is not numeric: {cell}",
                        column.label()
                    ))
                })?;
            table
                .set_cell(index, column, amount)
                .map_err(|err| ParseError::Projection(err.to_string()))?;
        }
    }
    Ok(table)
}
