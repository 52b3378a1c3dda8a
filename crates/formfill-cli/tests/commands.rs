//! End-to-end command tests over a real template on disk.

use std::fs;
use std::path::PathBuf;

use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use formfill_cli::cli::{CheckArgs, FillArgs, FormsArgs, InspectArgs};
use formfill_cli::commands::{
    FillCommandResult, TemplateStatus, run_check, run_fill, run_forms, run_inspect,
};
use formfill_model::Fillability;
use formfill_pdf::PdfForm;

fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("formfill_cli_{label}_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn cleanup_dir(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

/// A one-page template exposing the given text fields.
fn text_template(field_names: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content_id = doc.add_object(Object::Stream(Stream::new(Dictionary::new(), Vec::new())));

    let mut annots = Vec::new();
    let mut fields = Vec::new();
    for (idx, name) in field_names.iter().enumerate() {
        let top = 700 - (idx as i64) * 20;
        let field_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "FT" => "Tx",
            "T" => Object::String(name.as_bytes().to_vec(), StringFormat::Literal),
            "Rect" => vec![
                Object::Integer(50),
                Object::Integer(top),
                Object::Integer(250),
                Object::Integer(top + 15),
            ],
            "V" => Object::String(Vec::new(), StringFormat::Literal),
        });
        annots.push(Object::Reference(field_id));
        fields.push(Object::Reference(field_id));
    }

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
        "Contents" => content_id,
        "Annots" => annots,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => Object::Integer(1),
        }),
    );
    let acroform_id = doc.add_object(dictionary! { "Fields" => fields });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize template");
    buffer
}

const ANSWERS: &str = r#"{
  "firstName": "Ada",
  "lastName": "Lovelace",
  "city": "mADISON",
  "ssn": "123-45-6789",
  "wages": 1234.99
}"#;

fn field_value(form: &PdfForm, name: &str) -> Option<String> {
    form.fields()
        .into_iter()
        .find(|f| f.name == name)
        .and_then(|f| f.current_value)
}

#[test]
fn fill_writes_resolved_values_into_the_template() {
    let dir = temp_dir("fill");
    let template = text_template(&["fname", "lname", "city", "ss3", "ss2", "ss4", "3wages"]);
    fs::write(dir.join("2024-wi-1.pdf"), template).expect("write template");
    let data = dir.join("answers.json");
    fs::write(&data, ANSWERS).expect("write answers");

    let args = FillArgs {
        form_id: "wi_form_1".to_string(),
        data,
        templates: dir.clone(),
        mappings: None,
        output: Some(dir.join("out.pdf")),
        flatten: false,
        dry_run: false,
    };
    let result = run_fill(&args).expect("fill succeeds");

    let FillCommandResult::Filled { output, summary } = result else {
        panic!("expected filled result");
    };
    assert_eq!(summary.errors, 0);
    assert!(summary.filled >= 7);

    let bytes = fs::read(&output).expect("read output");
    let form = PdfForm::load(&bytes).expect("parse output");
    assert_eq!(field_value(&form, "fname").as_deref(), Some("Ada"));
    assert_eq!(field_value(&form, "lname").as_deref(), Some("Lovelace"));
    assert_eq!(field_value(&form, "city").as_deref(), Some("Madison"));
    assert_eq!(field_value(&form, "ss3").as_deref(), Some("123"));
    assert_eq!(field_value(&form, "ss2").as_deref(), Some("45"));
    assert_eq!(field_value(&form, "ss4").as_deref(), Some("6789"));
    assert_eq!(field_value(&form, "3wages").as_deref(), Some("1234"));

    cleanup_dir(&dir);
}

#[test]
fn dry_run_resolves_without_a_template() {
    let dir = temp_dir("dry_run");
    let data = dir.join("answers.json");
    fs::write(&data, ANSWERS).expect("write answers");

    let args = FillArgs {
        form_id: "wi_form_1".to_string(),
        data,
        // No template anywhere near this directory.
        templates: dir.join("missing"),
        mappings: None,
        output: None,
        flatten: false,
        dry_run: true,
    };
    let result = run_fill(&args).expect("dry run succeeds");

    let FillCommandResult::Preview(values) = result else {
        panic!("expected preview result");
    };
    assert_eq!(
        values.get("ss3").map(|v| v.display_string()),
        Some("123".to_string())
    );
    assert_eq!(
        values.get("3wages").map(|v| v.display_string()),
        Some("1234".to_string())
    );
    assert!(!values.contains("ssn"));

    cleanup_dir(&dir);
}

#[test]
fn fill_fails_cleanly_when_the_template_is_missing() {
    let dir = temp_dir("missing_template");
    let data = dir.join("answers.json");
    fs::write(&data, ANSWERS).expect("write answers");

    let args = FillArgs {
        form_id: "wi_form_1".to_string(),
        data,
        templates: dir.join("nowhere"),
        mappings: None,
        output: None,
        flatten: false,
        dry_run: false,
    };
    let err = run_fill(&args).unwrap_err();
    assert!(err.to_string().contains("2024-wi-1.pdf"));

    cleanup_dir(&dir);
}

#[test]
fn check_reports_template_status_per_form() {
    let dir = temp_dir("check");
    fs::write(dir.join("2024-wi-1.pdf"), text_template(&["fname"])).expect("write template");

    let rows = run_check(&CheckArgs {
        templates: dir.clone(),
        mappings: None,
    })
    .expect("check succeeds");

    assert_eq!(rows.len(), 3);
    let wi = rows
        .iter()
        .find(|row| row.form_id == "wi_form_1")
        .expect("wi row");
    assert!(matches!(wi.status, TemplateStatus::Fillable));
    assert_eq!(wi.field_count, 1);
    assert_eq!(wi.mapping_issues, 0);
    let fed = rows
        .iter()
        .find(|row| row.form_id == "form_1040")
        .expect("1040 row");
    assert!(matches!(fed.status, TemplateStatus::Missing));

    cleanup_dir(&dir);
}

#[test]
fn inspect_lists_fields_and_fillability() {
    let dir = temp_dir("inspect");
    let path = dir.join("sample.pdf");
    fs::write(&path, text_template(&["fname", "lname"])).expect("write template");

    let report = run_inspect(&InspectArgs {
        template: path.clone(),
    })
    .expect("inspect succeeds");

    assert_eq!(report.fillability, Fillability::Fillable);
    assert_eq!(report.fields.len(), 2);
    assert!(report.fields.iter().any(|f| f.name == "fname"));

    cleanup_dir(&dir);
}

#[test]
fn forms_lists_bundled_mappings() {
    let rows = run_forms(&FormsArgs { mappings: None }).expect("forms succeeds");
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().any(|row| row.form_id == "wi_form_1" && row.entries > 20));
}
