use sogyo_core::{
    compute_projection, DocumentContent, DocumentGenerator, Employee, GenerateError,
    NarrativeTemplates, PdfEngine, PlanSession, ProjectionColumn, RenderError,
    NARRATIVE_PDF_FILE, PROJECTION_PDF_FILE, SPREADSHEET_FILE,
};
use std::fs;

/// Emits the document title as stub bytes instead of rasterizing, so the
/// pipeline can be exercised without font assets.
struct StubEngine;

impl PdfEngine for StubEngine {
    fn render(&self, content: &DocumentContent) -> Result<Vec<u8>, RenderError> {
        Ok(format!("%PDF-stub {}", content.title).into_bytes())
    }
}

fn populated_session() -> PlanSession {
    let mut session = PlanSession::new();
    let record = session.record_mut();
    record.motive = "移動販売から実店舗へ".to_string();
    record.career = "キッチンカー運営3年".to_string();
    record.product_service = "クレープ専門店".to_string();
    record.target_customer = "学生と家族連れ".to_string();
    record.key_partners = "地元酪農家".to_string();
    record.key_resources = "オリジナル生地レシピ".to_string();
    record.channels = "駅前店舗".to_string();
    record
        .add_employee(Employee {
            position: "販売".to_string(),
            count: 2,
            monthly_salary: 210_000,
        })
        .unwrap();
    record
        .projection
        .set_cell(1, ProjectionColumn::Revenue, 36_000_000)
        .unwrap();
    session
}

#[test]
fn generate_writes_all_three_artifacts() {
    let session = populated_session();
    let out = tempfile::tempdir().unwrap();
    let generator = DocumentGenerator::new(StubEngine);

    let artifacts = generator
        .generate(session.record(), out.path())
        .unwrap();

    assert_eq!(artifacts.narrative_pdf, out.path().join(NARRATIVE_PDF_FILE));
    assert_eq!(
        artifacts.projection_pdf,
        out.path().join(PROJECTION_PDF_FILE)
    );
    assert_eq!(artifacts.spreadsheet, out.path().join(SPREADSHEET_FILE));
    assert!(artifacts.narrative_pdf.is_file());
    assert!(artifacts.projection_pdf.is_file());
    assert!(artifacts.spreadsheet.is_file());

    // xlsx is a zip container
    let spreadsheet = fs::read(&artifacts.spreadsheet).unwrap();
    assert_eq!(&spreadsheet[..2], b"PK");
}

#[test]
fn generate_into_existing_directory_is_not_an_error() {
    let session = populated_session();
    let out = tempfile::tempdir().unwrap();
    let nested = out.path().join("already").join("there");
    fs::create_dir_all(&nested).unwrap();

    let generator = DocumentGenerator::new(StubEngine);
    generator.generate(session.record(), &nested).unwrap();
    generator.generate(session.record(), &nested).unwrap();
}

#[test]
fn narrative_document_carries_fields_and_table() {
    let session = populated_session();
    let out = tempfile::tempdir().unwrap();
    let generator = DocumentGenerator::new(StubEngine);
    generator.generate(session.record(), out.path()).unwrap();

    let narrative = fs::read_to_string(out.path().join(NARRATIVE_PDF_FILE)).unwrap();
    assert!(narrative.contains("創業計画書"));
    let projection = fs::read_to_string(out.path().join(PROJECTION_PDF_FILE)).unwrap();
    assert!(projection.contains("10年間の収支計画"));
}

#[test]
fn generation_is_deterministic_for_equal_records() {
    let session = populated_session();
    let first = compute_projection(&session.record().projection);
    let second = compute_projection(&session.record().projection);
    assert_eq!(first, second);

    // gross profit recomputed row-wise: year 2 uses the edited revenue
    assert_eq!(*first.rows[1].values.last().unwrap(), 26_000_000);
    assert_eq!(*first.rows[0].values.last().unwrap(), 20_000_000);
}

#[test]
fn generate_does_not_mutate_the_source_record() {
    let session = populated_session();
    let before = session.record().clone();
    let out = tempfile::tempdir().unwrap();

    DocumentGenerator::new(StubEngine)
        .generate(session.record(), out.path())
        .unwrap();

    assert_eq!(session.record(), &before);
    // the derived column never lands in the editable table
    assert_eq!(
        session.record().projection.rows().len(),
        before.projection.rows().len()
    );
}

#[test]
fn missing_custom_template_surfaces_as_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = NarrativeTemplates::from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, RenderError::TemplateNotFound(_)));

    // and a generator built from a template referencing unknown fields
    // fails the whole generation with no artifacts written
    fs::write(
        dir.path().join("main_plan_template.txt"),
        "{{ unknown_field }}",
    )
    .unwrap();
    let templates = NarrativeTemplates::from_dir(dir.path()).unwrap();
    let generator = DocumentGenerator::with_templates(StubEngine, templates);

    let session = populated_session();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("docs");
    let err = generator.generate(session.record(), &target).unwrap_err();
    assert!(matches!(err, GenerateError::Render(_)));
    assert!(!target.exists());
}
