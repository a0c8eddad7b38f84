use sogyo_core::{Employee, PlanRecord, PlanValidationError, ProjectionColumn, YEAR_COUNT};

#[test]
fn new_record_applies_all_defaults() {
    let record = PlanRecord::new();

    assert_eq!(record.motive, "");
    assert_eq!(record.career, "");
    assert_eq!(record.product_service, "");
    assert_eq!(record.target_customer, "");
    assert_eq!(record.key_partners, "");
    assert_eq!(record.key_resources, "");
    assert_eq!(record.channels, "");
    assert_eq!(record.equity, 0);
    assert_eq!(record.loan_request, 0);
    assert_eq!(record.loan_term, 84);
    assert!((record.loan_rate - 2.0).abs() < f64::EPSILON);
    assert_eq!(record.equip_cost, 0);
    assert_eq!(record.operate_cost, 0);
    assert!(record.employees.is_empty());
    assert_eq!(record.projection.rows().len(), YEAR_COUNT);
}

#[test]
fn projection_shape_is_stable_across_edits() {
    let mut record = PlanRecord::new();
    for year in 0..YEAR_COUNT {
        record
            .projection
            .set_cell(year, ProjectionColumn::OtherExpenses, 999)
            .unwrap();
    }
    assert_eq!(record.projection.rows().len(), YEAR_COUNT);
    assert_eq!(ProjectionColumn::ALL.len(), 5);
    assert_eq!(sogyo_core::year_label(0), "1年目");
    assert_eq!(sogyo_core::year_label(YEAR_COUNT - 1), "10年目");
}

#[test]
fn derived_payroll_matches_reference_cases() {
    let mut record = PlanRecord::new();
    record
        .add_employee(Employee {
            position: "事務".to_string(),
            count: 2,
            monthly_salary: 200_000,
        })
        .unwrap();
    // 4_800_000 annual cost stays below the 6_000_000 floor.
    assert_eq!(record.derived_payroll_default(), 6_000_000);

    record.remove_employee(0).unwrap();
    record
        .add_employee(Employee {
            position: "技術".to_string(),
            count: 5,
            monthly_salary: 300_000,
        })
        .unwrap();
    assert_eq!(record.derived_payroll_default(), 18_000_000);
}

#[test]
fn validate_flags_zero_count_entries() {
    let mut record = PlanRecord::new();
    record.employees.push(Employee {
        position: "パート".to_string(),
        count: 0,
        monthly_salary: 120_000,
    });
    let err = record.validate().unwrap_err();
    assert_eq!(
        err,
        PlanValidationError::EmployeeCountZero {
            index: 0,
            position: "パート".to_string(),
        }
    );
}

#[test]
fn employee_serialization_uses_expected_wire_fields() {
    let employee = Employee {
        position: "店長".to_string(),
        count: 1,
        monthly_salary: 350_000,
    };

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["position"], "店長");
    assert_eq!(json["count"], 1);
    assert_eq!(json["monthly_salary"], 350_000);

    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, employee);
}
