//! Narrative plan templating.
//!
//! # Responsibility
//! - Render the record's narrative, funding and staffing fields through a
//!   fixed text template.
//! - Resolve templates from the built-in default or a caller directory.
//!
//! # Invariants
//! - Rendering runs with strict undefined handling: a template referencing
//!   a field the context does not provide fails instead of emitting blanks.

use crate::docgen::RenderError;
use crate::model::plan::{Employee, PlanRecord};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// File name looked up by [`NarrativeTemplates::from_dir`].
pub const TEMPLATE_FILE_NAME: &str = "main_plan_template.txt";

const TEMPLATE_NAME: &str = "main_plan";

/// Default narrative layout. Section markers (`■`) become headings in the
/// rasterized document.
const BUILTIN_TEMPLATE: &str = "\
■ 創業の動機
{{ motive }}

■ 経営者の略歴
{{ career }}

■ 事業内容（商品・サービス）
{{ product_service }}

■ ターゲット顧客
{{ target_customer }}

■ 主要パートナー
{{ key_partners }}

■ 主要リソース
{{ key_resources }}

■ 販売チャネル
{{ channels }}

■ 資金計画
自己資金 {{ equity }}円 / 借入希望額 {{ loan_request }}円
返済期間 {{ loan_term }}ヶ月 / 年利 {{ loan_rate }}%
設備資金 {{ equip_cost }}円 / 運転資金 {{ operate_cost }}円

■ 従業員計画
{% for emp in employees -%}
{{ emp.position }} {{ emp.count }}名 × 月給 {{ emp.monthly_salary }}円
{% endfor -%}
想定年間人件費 {{ derived_payroll }}円
";

/// Flat template context. Field names are the placeholder names templates
/// may reference.
#[derive(Serialize)]
struct NarrativeContext<'a> {
    motive: &'a str,
    career: &'a str,
    product_service: &'a str,
    target_customer: &'a str,
    key_partners: &'a str,
    key_resources: &'a str,
    channels: &'a str,
    equity: i64,
    loan_request: i64,
    loan_term: u32,
    loan_rate: f64,
    equip_cost: i64,
    operate_cost: i64,
    employees: &'a [Employee],
    derived_payroll: i64,
}

/// Narrative template store backing the document generator.
#[derive(Debug)]
pub struct NarrativeTemplates {
    env: Environment<'static>,
}

impl NarrativeTemplates {
    /// Uses the built-in narrative layout.
    pub fn builtin() -> Self {
        let mut env = strict_env();
        env.add_template(TEMPLATE_NAME, BUILTIN_TEMPLATE)
            .expect("builtin narrative template parses");
        Self { env }
    }

    /// Loads `main_plan_template.txt` from a caller-provided directory.
    ///
    /// An unreadable file is a [`RenderError::TemplateNotFound`]; a file
    /// with invalid template syntax is a [`RenderError::Template`].
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let path = dir.join(TEMPLATE_FILE_NAME);
        let source =
            fs::read_to_string(&path).map_err(|_| RenderError::TemplateNotFound(path.clone()))?;
        let mut env = strict_env();
        env.add_template_owned(TEMPLATE_NAME.to_string(), source)?;
        Ok(Self { env })
    }

    /// Renders the narrative text for one record.
    pub fn render_narrative(&self, record: &PlanRecord) -> Result<String, RenderError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        let context = NarrativeContext {
            motive: &record.motive,
            career: &record.career,
            product_service: &record.product_service,
            target_customer: &record.target_customer,
            key_partners: &record.key_partners,
            key_resources: &record.key_resources,
            channels: &record.channels,
            equity: record.equity,
            loan_request: record.loan_request,
            loan_term: record.loan_term,
            loan_rate: record.loan_rate,
            equip_cost: record.equip_cost,
            operate_cost: record.operate_cost,
            employees: &record.employees,
            derived_payroll: record.derived_payroll_default(),
        };
        Ok(template.render(&context)?)
    }
}

fn strict_env() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}

#[cfg(test)]
mod tests {
    use super::NarrativeTemplates;
    use crate::model::plan::{Employee, PlanRecord};

    fn sample_record() -> PlanRecord {
        let mut record = PlanRecord::new();
        record.motive = "地域に愛される店を作りたい".to_string();
        record.career = "飲食店勤務10年".to_string();
        record.product_service = "自家焙煎コーヒー".to_string();
        record.target_customer = "近隣のオフィスワーカー".to_string();
        record.key_partners = "地元の焙煎所".to_string();
        record.key_resources = "焙煎機".to_string();
        record.channels = "店舗とEC".to_string();
        record.equity = 3_000_000;
        record.loan_request = 7_000_000;
        record
            .add_employee(Employee {
                position: "バリスタ".to_string(),
                count: 2,
                monthly_salary: 230_000,
            })
            .unwrap();
        record
    }

    #[test]
    fn builtin_template_covers_every_field() {
        let rendered = NarrativeTemplates::builtin()
            .render_narrative(&sample_record())
            .unwrap();
        assert!(rendered.contains("地域に愛される店を作りたい"));
        assert!(rendered.contains("飲食店勤務10年"));
        assert!(rendered.contains("自家焙煎コーヒー"));
        assert!(rendered.contains("近隣のオフィスワーカー"));
        assert!(rendered.contains("地元の焙煎所"));
        assert!(rendered.contains("焙煎機"));
        assert!(rendered.contains("店舗とEC"));
        assert!(rendered.contains("3000000円"));
        assert!(rendered.contains("84ヶ月"));
        assert!(rendered.contains("バリスタ 2名 × 月給 230000円"));
        // floor applies: 2 * 230_000 * 12 = 5_520_000 < 6_000_000
        assert!(rendered.contains("想定年間人件費 6000000円"));
    }

    #[test]
    fn missing_template_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = NarrativeTemplates::from_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn unknown_placeholder_fails_at_render_time() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(super::TEMPLATE_FILE_NAME),
            "{{ no_such_field }}",
        )
        .unwrap();
        let templates = NarrativeTemplates::from_dir(dir.path()).unwrap();
        let err = templates.render_narrative(&sample_record()).unwrap_err();
        assert!(err.to_string().contains("template failed"));
    }
}
