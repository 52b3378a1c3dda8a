//! Command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use formfill_core::{FillOptions, FillOutput, FormFiller, FsTemplateSource};
use formfill_map::{MappingRegistry, bundled, validate};
use formfill_model::{
    AppRecord, Fillability, FillSummary, TargetValues, TemplateField, classify,
};
use formfill_pdf::{DocumentMetadata, PdfEngine, PdfForm};
use formfill_transform::TransformerRegistry;

use crate::cli::{CheckArgs, FillArgs, FormsArgs, InspectArgs};

/// Outcome of the `fill` subcommand.
pub enum FillCommandResult {
    /// Dry run: the resolved target record.
    Preview(TargetValues),
    /// Template filled and written.
    Filled { output: PathBuf, summary: FillSummary },
    /// Template has no interactive fields; nothing written.
    NotFillable { form_id: String },
}

/// One row of the `check` report.
pub struct CheckRow {
    pub form_id: String,
    pub form_name: String,
    pub template_file: String,
    pub status: TemplateStatus,
    pub field_count: usize,
    pub mapping_issues: usize,
}

/// Fillability status of a form's template.
pub enum TemplateStatus {
    Fillable,
    NotFillable,
    Missing,
    Unreadable,
}

/// Result of the `inspect` subcommand.
pub struct InspectReport {
    pub path: PathBuf,
    pub metadata: DocumentMetadata,
    pub fields: Vec<TemplateField>,
    pub fillability: Fillability,
}

/// One row of the `forms` listing.
pub struct FormRow {
    pub form_id: String,
    pub form_name: String,
    pub template_file: String,
    pub entries: usize,
}

fn load_registry(dir: Option<&Path>) -> Result<MappingRegistry> {
    match dir {
        Some(dir) => MappingRegistry::from_dir(dir)
            .with_context(|| format!("load mapping tables from {}", dir.display())),
        None => bundled::registry().context("load bundled mapping tables"),
    }
}

fn load_record(path: &Path) -> Result<AppRecord> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read answer record {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("parse answer record {}", path.display()))
}

pub fn run_fill(args: &FillArgs) -> Result<FillCommandResult> {
    let registry = load_registry(args.mappings.as_deref())?;
    let transformers = TransformerRegistry::builtin();

    if let Ok(mapping) = registry.get(&args.form_id) {
        for issue in validate(mapping, &transformers) {
            warn!(form_id = %args.form_id, issue = %issue, "mapping table issue");
        }
    }

    let record = load_record(&args.data)?;
    let source = FsTemplateSource::new(&args.templates);
    let filler = FormFiller::new(registry, transformers, source, PdfEngine::new());

    if args.dry_run {
        let values = filler.preview(&args.form_id, &record)?;
        return Ok(FillCommandResult::Preview(values));
    }

    let options = FillOptions {
        flatten: args.flatten,
    };
    match filler.fill(&args.form_id, &record, options)? {
        FillOutput::NotFillable => Ok(FillCommandResult::NotFillable {
            form_id: args.form_id.clone(),
        }),
        FillOutput::Filled { bytes, summary } => {
            let output = args
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{}.filled.pdf", args.form_id)));
            fs::write(&output, &bytes)
                .with_context(|| format!("write filled form to {}", output.display()))?;
            info!(output = %output.display(), filled = summary.filled, "filled form written");
            Ok(FillCommandResult::Filled { output, summary })
        }
    }
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let bytes = fs::read(&args.template)
        .with_context(|| format!("read template {}", args.template.display()))?;
    let form = PdfForm::load(&bytes)
        .with_context(|| format!("parse template {}", args.template.display()))?;
    let fields = form.fields();
    let fillability = classify(&fields);
    Ok(InspectReport {
        path: args.template.clone(),
        metadata: form.metadata(),
        fields,
        fillability,
    })
}

pub fn run_check(args: &CheckArgs) -> Result<Vec<CheckRow>> {
    let registry = load_registry(args.mappings.as_deref())?;
    let transformers = TransformerRegistry::builtin();
    let mut rows = Vec::new();

    for mapping in registry.mappings() {
        let mapping_issues = validate(mapping, &transformers).len();
        let path = args.templates.join(&mapping.template_file);
        let (status, field_count) = if !path.is_file() {
            (TemplateStatus::Missing, 0)
        } else {
            match fs::read(&path).ok().and_then(|bytes| PdfForm::load(&bytes).ok()) {
                Some(form) => {
                    let fields = form.fields();
                    match classify(&fields) {
                        Fillability::Fillable => (TemplateStatus::Fillable, fields.len()),
                        Fillability::NotFillable => (TemplateStatus::NotFillable, 0),
                    }
                }
                None => (TemplateStatus::Unreadable, 0),
            }
        };
        rows.push(CheckRow {
            form_id: mapping.form_id.clone(),
            form_name: mapping.form_name.clone(),
            template_file: mapping.template_file.clone(),
            status,
            field_count,
            mapping_issues,
        });
    }
    Ok(rows)
}

pub fn run_forms(args: &FormsArgs) -> Result<Vec<FormRow>> {
    let registry = load_registry(args.mappings.as_deref())?;
    Ok(registry
        .mappings()
        .map(|mapping| FormRow {
            form_id: mapping.form_id.clone(),
            form_name: mapping.form_name.clone(),
            template_file: mapping.template_file.clone(),
            entries: mapping.len(),
        })
        .collect())
}
