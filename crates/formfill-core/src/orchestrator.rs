//! Fill orchestration: resolve -> load -> classify -> fill -> save.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use formfill_map::{MappingRegistry, resolve};
use formfill_model::{AppRecord, Fillability, FillSummary, TargetValues, classify};
use formfill_transform::TransformerRegistry;

use crate::document::{DocumentEngine, FormDocument};
use crate::error::{FillError, Result};
use crate::executor::fill_fields;
use crate::source::TemplateSource;

/// Options for one fill call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FillOptions {
    /// Convert interactive fields to static page content after filling.
    pub flatten: bool,
}

/// Outcome of a fill call that did not fail fatally.
#[derive(Debug)]
pub enum FillOutput {
    /// The template was filled (and optionally flattened).
    Filled {
        /// Serialized document bytes.
        bytes: Vec<u8>,
        /// Per-field outcomes.
        summary: FillSummary,
    },
    /// The template has no interactive fields. Nothing was mutated; the
    /// caller routes to a manual or overlay path.
    NotFillable,
}

/// Public entry point composing registry, transformers, byte source, and
/// document engine.
///
/// All collaborators are injected at construction. `fill` borrows `self`
/// immutably and builds a fresh document per call, so one `FormFiller` can
/// serve concurrent calls without locking.
pub struct FormFiller<S, E> {
    registry: MappingRegistry,
    transformers: TransformerRegistry,
    source: S,
    engine: E,
}

impl<S, E> FormFiller<S, E>
where
    S: TemplateSource,
    E: DocumentEngine,
{
    pub fn new(
        registry: MappingRegistry,
        transformers: TransformerRegistry,
        source: S,
        engine: E,
    ) -> Self {
        Self {
            registry,
            transformers,
            source,
            engine,
        }
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn transformers(&self) -> &TransformerRegistry {
        &self.transformers
    }

    /// Resolve the target record without loading the template.
    pub fn preview(&self, form_id: &str, record: &AppRecord) -> Result<TargetValues> {
        let mapping = self
            .registry
            .get(form_id)
            .map_err(|_| FillError::mapping_not_found(form_id))?;
        Ok(resolve(mapping, record, &self.transformers))
    }

    /// Fill the form's template from an answer record.
    ///
    /// Fails fast with [`FillError::MappingNotFound`] before any template
    /// load is attempted. A template without interactive fields returns
    /// [`FillOutput::NotFillable`] with the input bytes untouched.
    pub fn fill(
        &self,
        form_id: &str,
        record: &AppRecord,
        options: FillOptions,
    ) -> Result<FillOutput> {
        let span = info_span!("fill_form", form_id = %form_id);
        let _guard = span.enter();

        let mapping = self
            .registry
            .get(form_id)
            .map_err(|_| FillError::mapping_not_found(form_id))?;
        let targets = resolve(mapping, record, &self.transformers);
        debug!(targets = targets.len(), "resolved target record");

        let locator = mapping.template_file.as_str();
        let bytes = self
            .source
            .load(locator)
            .map_err(|source| FillError::TemplateLoad {
                locator: locator.to_string(),
                source,
            })?;

        let mut doc = self
            .engine
            .open(&bytes)
            .map_err(|source| FillError::TemplateParse {
                locator: locator.to_string(),
                source,
            })?;

        let fields = doc.list_fields();
        if classify(&fields) == Fillability::NotFillable {
            info!(locator = %locator, "template has no interactive fields");
            return Ok(FillOutput::NotFillable);
        }

        let summary = fill_fields(&mut doc, &targets);
        if options.flatten {
            doc.flatten()
                .map_err(|source| FillError::Document { source })?;
        }
        let bytes = doc
            .save()
            .map_err(|source| FillError::Document { source })?;

        info!(
            filled = summary.filled,
            errors = summary.errors,
            flattened = options.flatten,
            "form filled"
        );
        Ok(FillOutput::Filled { bytes, summary })
    }
}
