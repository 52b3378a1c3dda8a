//! Loaded PDF form wrapper.
//!
//! [`PdfForm`] owns a parsed `lopdf::Document` plus the field index built at
//! load time. Typed setters write `/V` (and `/AS` on widgets), regenerate a
//! plain text appearance so the value survives flattening, and raise
//! `/NeedAppearances` so viewers re-render everything else.
//!
//! `list_fields` reports the state captured at load time; it is read once
//! per fill call, before any write.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::debug;

use formfill_core::{DocumentEngine, DocumentError, FormDocument};
use formfill_model::{FieldType, TemplateField};

use crate::error::{PdfError, Result};
use crate::fields::{
    FLAG_READ_ONLY, FLAG_REQUIRED, FieldNode, WidgetNode, catalog_id, collect_fields, resolve,
};
use crate::text::{decode_pdf_string, encode_pdf_string, escape_content_string};

/// Document information entries from the trailer `/Info` dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
}

/// A loaded PDF with its interactive field layer indexed by qualified name.
pub struct PdfForm {
    doc: Document,
    nodes: Vec<FieldNode>,
    index: BTreeMap<String, usize>,
    helvetica: Option<ObjectId>,
}

impl PdfForm {
    /// Parse template bytes and index the interactive field layer.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(bytes)?;
        let nodes = collect_fields(&doc);
        let index = nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.name.clone(), idx))
            .collect();
        debug!(fields = nodes.len(), "indexed interactive field layer");
        Ok(Self {
            doc,
            nodes,
            index,
            helvetica: None,
        })
    }

    /// Enumerate the fields captured at load time.
    pub fn fields(&self) -> Vec<TemplateField> {
        self.nodes.iter().map(template_field).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn kind(&self, name: &str) -> Option<FieldType> {
        self.node(name).map(|node| node.field_type).ok()
    }

    /// Selectable values: on-states for buttons, `/Opt` exports for choices.
    pub fn options(&self, name: &str) -> Vec<String> {
        let Ok(node) = self.node(name) else {
            return Vec::new();
        };
        match node.field_type {
            FieldType::CheckBox | FieldType::Radio => node.on_states.clone(),
            FieldType::Dropdown => node.options.clone(),
            _ => Vec::new(),
        }
    }

    /// Write a text field's value and regenerate its appearance.
    pub fn set_text(&mut self, name: &str, value: &str) -> Result<()> {
        let node = self.node(name)?;
        let field_id = node.id;
        let widget_ids: Vec<ObjectId> = node.widgets.iter().map(|w| w.id).collect();

        self.set_dict_entry(field_id, "V", encode_pdf_string(value))?;
        for widget_id in widget_ids {
            self.write_text_appearance(widget_id, value)?;
        }
        self.set_need_appearances()
    }

    /// Check or uncheck a checkbox using its first on-state.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> Result<()> {
        let node = self.node(name)?;
        let field_id = node.id;
        let widgets = node.widgets.clone();
        let on_state = node
            .on_states
            .first()
            .cloned()
            .unwrap_or_else(|| "Yes".to_string());
        let state = if checked { on_state } else { "Off".to_string() };
        self.apply_button_state(field_id, &widgets, &state)
    }

    /// Select a named checkbox export state.
    pub fn check_export(&mut self, name: &str, state: &str) -> Result<()> {
        let node = self.node(name)?;
        if !node.on_states.iter().any(|s| s == state) {
            return Err(PdfError::unknown_on_state(name, state));
        }
        let field_id = node.id;
        let widgets = node.widgets.clone();
        self.apply_button_state(field_id, &widgets, state)
    }

    /// Select the active option of a radio group or dropdown.
    pub fn select_option(&mut self, name: &str, option: &str) -> Result<()> {
        let node = self.node(name)?;
        match node.field_type {
            FieldType::Radio | FieldType::CheckBox => {
                if !node.on_states.iter().any(|s| s == option) {
                    return Err(PdfError::unsupported_option(name, option));
                }
                let field_id = node.id;
                let widgets = node.widgets.clone();
                self.apply_button_state(field_id, &widgets, option)
            }
            FieldType::Dropdown => {
                if !node.options.is_empty() && !node.options.iter().any(|o| o == option) {
                    return Err(PdfError::unsupported_option(name, option));
                }
                let field_id = node.id;
                self.set_dict_entry(field_id, "V", encode_pdf_string(option))?;
                self.set_need_appearances()
            }
            FieldType::Text => self.set_text(name, option),
            FieldType::Button | FieldType::Unknown => {
                Err(PdfError::unsupported_option(name, option))
            }
        }
    }

    /// Serialize the document.
    pub fn save(&mut self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|source| PdfError::Save { source })?;
        Ok(buffer)
    }

    /// Document information entries, where present.
    pub fn metadata(&self) -> DocumentMetadata {
        let info = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .map(|obj| resolve(&self.doc, obj));
        let Some(Object::Dictionary(info)) = info else {
            return DocumentMetadata::default();
        };
        let get = |key: &[u8]| -> Option<String> {
            match info.get(key).ok().map(|obj| resolve(&self.doc, obj)) {
                Some(Object::String(bytes, _)) => Some(decode_pdf_string(bytes)),
                _ => None,
            }
        };
        DocumentMetadata {
            title: get(b"Title"),
            author: get(b"Author"),
            subject: get(b"Subject"),
            creator: get(b"Creator"),
            producer: get(b"Producer"),
        }
    }

    /// Convert interactive fields to static page content.
    ///
    /// Each widget's selected appearance stream is stamped into its page as
    /// a form XObject, then the widget annotations and the `/AcroForm`
    /// entry are removed. Irreversible.
    pub fn flatten(&mut self) -> Result<()> {
        let pages: Vec<ObjectId> = self.doc.get_pages().values().copied().collect();
        for (page_index, page_id) in pages.into_iter().enumerate() {
            self.flatten_page(page_id, page_index)?;
        }
        if let Some(id) = catalog_id(&self.doc)
            && let Ok(object) = self.doc.get_object_mut(id)
            && let Ok(catalog) = object.as_dict_mut()
        {
            catalog.remove(b"AcroForm");
        }
        self.nodes.clear();
        self.index.clear();
        Ok(())
    }

    fn node(&self, name: &str) -> Result<&FieldNode> {
        self.index
            .get(name)
            .map(|idx| &self.nodes[*idx])
            .ok_or_else(|| PdfError::field_not_found(name))
    }

    fn set_dict_entry(&mut self, id: ObjectId, key: &str, value: Object) -> Result<()> {
        let dict = self
            .doc
            .get_object_mut(id)
            .map_err(PdfError::Parse)?
            .as_dict_mut()
            .map_err(PdfError::Parse)?;
        dict.set(key, value);
        Ok(())
    }

    /// Set `/V` on the field and `/AS` on each widget for a button state.
    fn apply_button_state(
        &mut self,
        field_id: ObjectId,
        widgets: &[WidgetNode],
        state: &str,
    ) -> Result<()> {
        self.set_dict_entry(field_id, "V", Object::Name(state.as_bytes().to_vec()))?;
        for widget in widgets {
            let widget_state = if state != "Off" && widget.on_states.iter().any(|s| s == state) {
                state
            } else {
                "Off"
            };
            self.set_dict_entry(widget.id, "AS", Object::Name(widget_state.as_bytes().to_vec()))?;
        }
        self.set_need_appearances()
    }

    fn set_need_appearances(&mut self) -> Result<()> {
        // AcroForm may be an indirect object or inline in the catalog.
        if let Some(acroform_id) = crate::fields::acroform_id(&self.doc) {
            let dict = self
                .doc
                .get_object_mut(acroform_id)
                .map_err(PdfError::Parse)?
                .as_dict_mut()
                .map_err(PdfError::Parse)?;
            dict.set("NeedAppearances", Object::Boolean(true));
            return Ok(());
        }
        let catalog_id = catalog_id(&self.doc).ok_or(PdfError::MissingCatalog)?;
        let catalog = self
            .doc
            .get_object_mut(catalog_id)
            .map_err(PdfError::Parse)?
            .as_dict_mut()
            .map_err(PdfError::Parse)?;
        if let Ok(Object::Dictionary(acroform)) = catalog.get_mut(b"AcroForm") {
            acroform.set("NeedAppearances", Object::Boolean(true));
        }
        Ok(())
    }

    fn helvetica_id(&mut self) -> ObjectId {
        if let Some(id) = self.helvetica {
            return id;
        }
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let id = self.doc.add_object(Object::Dictionary(font));
        self.helvetica = Some(id);
        id
    }

    /// Build a minimal normal appearance showing the value, so the field
    /// still reads correctly after flattening.
    fn write_text_appearance(&mut self, widget_id: ObjectId, value: &str) -> Result<()> {
        let rect = {
            let Ok(widget) = self
                .doc
                .get_object(widget_id)
                .and_then(|obj| obj.as_dict())
            else {
                return Ok(());
            };
            read_rect(&self.doc, widget)
        };
        let width = (rect[2] - rect[0]).abs();
        let height = (rect[3] - rect[1]).abs();
        let font_size = if height > 6.0 {
            (height - 4.0).min(10.0)
        } else {
            10.0
        };
        let baseline = ((height - font_size) / 2.0).max(2.0);
        let font_id = self.helvetica_id();

        let ops = format!(
            "/Tx BMC\nq\nBT\n/Helv {font_size:.1} Tf\n0 g\n2 {baseline:.1} Td\n({}) Tj\nET\nQ\nEMC\n",
            escape_content_string(value)
        );
        let mut ap_dict = Dictionary::new();
        ap_dict.set("Type", Object::Name(b"XObject".to_vec()));
        ap_dict.set("Subtype", Object::Name(b"Form".to_vec()));
        ap_dict.set(
            "BBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(width.round() as i64),
                Object::Integer(height.round() as i64),
            ]),
        );
        let mut fonts = Dictionary::new();
        fonts.set("Helv", Object::Reference(font_id));
        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(fonts));
        ap_dict.set("Resources", Object::Dictionary(resources));

        let stream_id = self
            .doc
            .add_object(Object::Stream(Stream::new(ap_dict, ops.into_bytes())));
        let mut appearance = Dictionary::new();
        appearance.set("N", Object::Reference(stream_id));
        self.set_dict_entry(widget_id, "AP", Object::Dictionary(appearance))
    }

    fn flatten_page(&mut self, page_id: ObjectId, page_index: usize) -> Result<()> {
        let (stamps, kept, had_annots) = self.collect_page_stamps(page_id);
        if !had_annots {
            return Ok(());
        }

        // Materialize stamped streams and build the overlay content.
        let mut ops = String::new();
        let mut xobjects: Vec<(String, ObjectId)> = Vec::new();
        for (idx, stamp) in stamps.into_iter().enumerate() {
            let stream_id = match stamp.stream {
                StampStream::Indirect(id) => id,
                StampStream::Inline(stream) => self.doc.add_object(Object::Stream(stream)),
            };
            let bbox = self.normalize_xobject(stream_id, &stamp.rect);
            let name = format!("FFlat{page_index}x{idx}");
            let rect_w = (stamp.rect[2] - stamp.rect[0]).abs();
            let rect_h = (stamp.rect[3] - stamp.rect[1]).abs();
            let bbox_w = (bbox[2] - bbox[0]).abs();
            let bbox_h = (bbox[3] - bbox[1]).abs();
            let sx = if bbox_w > 0.0 { rect_w / bbox_w } else { 1.0 };
            let sy = if bbox_h > 0.0 { rect_h / bbox_h } else { 1.0 };
            let tx = stamp.rect[0].min(stamp.rect[2]) - bbox[0] * sx;
            let ty = stamp.rect[1].min(stamp.rect[3]) - bbox[1] * sy;
            ops.push_str(&format!(
                "q\n{sx:.4} 0 0 {sy:.4} {tx:.2} {ty:.2} cm\n/{name} Do\nQ\n"
            ));
            xobjects.push((name, stream_id));
        }

        let overlay_id = if ops.is_empty() {
            None
        } else {
            Some(
                self.doc
                    .add_object(Object::Stream(Stream::new(Dictionary::new(), ops.into_bytes()))),
            )
        };

        let resources = if xobjects.is_empty() {
            None
        } else {
            let mut resources = self.materialized_resources(page_id);
            let mut xobject_dict = match resources.get(b"XObject") {
                Ok(Object::Dictionary(existing)) => existing.clone(),
                _ => Dictionary::new(),
            };
            for (name, id) in &xobjects {
                xobject_dict.set(name.clone(), Object::Reference(*id));
            }
            resources.set("XObject", Object::Dictionary(xobject_dict));
            Some(resources)
        };

        let old_contents = {
            let Ok(page) = self.doc.get_object(page_id).and_then(|obj| obj.as_dict()) else {
                return Ok(());
            };
            page.get(b"Contents").ok().cloned()
        };
        let new_contents = overlay_id.map(|overlay| match old_contents {
            Some(Object::Reference(existing)) => Object::Array(vec![
                Object::Reference(existing),
                Object::Reference(overlay),
            ]),
            Some(Object::Array(mut items)) => {
                items.push(Object::Reference(overlay));
                Object::Array(items)
            }
            Some(other) => {
                // Inline content stream: hoist it so both can be referenced.
                Object::Array(vec![other, Object::Reference(overlay)])
            }
            None => Object::Reference(overlay),
        });
        // Inline objects inside a Contents array are not addressable; hoist.
        let new_contents = match new_contents {
            Some(Object::Array(items)) => {
                let mut hoisted = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Object::Reference(_) => hoisted.push(item),
                        other => {
                            let id = self.doc.add_object(other);
                            hoisted.push(Object::Reference(id));
                        }
                    }
                }
                Some(Object::Array(hoisted))
            }
            other => other,
        };

        let page = self
            .doc
            .get_object_mut(page_id)
            .map_err(PdfError::Parse)?
            .as_dict_mut()
            .map_err(PdfError::Parse)?;
        if let Some(contents) = new_contents {
            page.set("Contents", contents);
        }
        if let Some(resources) = resources {
            page.set("Resources", Object::Dictionary(resources));
        }
        if kept.is_empty() {
            page.remove(b"Annots");
        } else {
            page.set("Annots", Object::Array(kept));
        }
        Ok(())
    }

    /// First pass over a page's annotations: which widgets to stamp, which
    /// annotations to keep. Returns `(stamps, kept, page_had_annots)`.
    fn collect_page_stamps(&self, page_id: ObjectId) -> (Vec<Stamp>, Vec<Object>, bool) {
        let mut stamps = Vec::new();
        let mut kept = Vec::new();

        let Ok(page) = self.doc.get_object(page_id).and_then(|obj| obj.as_dict()) else {
            return (stamps, kept, false);
        };
        let annots: Vec<Object> = match page.get(b"Annots").ok().map(|o| resolve(&self.doc, o)) {
            Some(Object::Array(items)) => items.clone(),
            _ => return (stamps, kept, false),
        };

        for annot in annots {
            let Some(dict) = annot_dict(&self.doc, &annot) else {
                kept.push(annot);
                continue;
            };
            let is_widget = matches!(
                dict.get(b"Subtype").map(|o| resolve(&self.doc, o)),
                Ok(Object::Name(name)) if name.as_slice() == b"Widget"
            );
            if !is_widget {
                kept.push(annot);
                continue;
            }
            // Hidden widgets are dropped without stamping.
            let hidden = matches!(
                dict.get(b"F").map(|o| resolve(&self.doc, o)),
                Ok(Object::Integer(flags)) if flags & 2 != 0
            );
            if hidden {
                continue;
            }
            if let Some(stream) = selected_appearance(&self.doc, dict) {
                stamps.push(Stamp {
                    stream,
                    rect: read_rect(&self.doc, dict),
                });
            }
        }
        (stamps, kept, true)
    }

    /// Ensure the stamped stream is a form XObject with a bounding box;
    /// returns the effective bbox.
    fn normalize_xobject(&mut self, stream_id: ObjectId, rect: &[f64; 4]) -> [f64; 4] {
        let fallback = [
            0.0,
            0.0,
            (rect[2] - rect[0]).abs(),
            (rect[3] - rect[1]).abs(),
        ];
        let Ok(Object::Stream(stream)) = self.doc.get_object_mut(stream_id) else {
            return fallback;
        };
        let dict = &mut stream.dict;
        if !dict.has(b"Subtype") {
            dict.set("Subtype", Object::Name(b"Form".to_vec()));
        }
        if !dict.has(b"Type") {
            dict.set("Type", Object::Name(b"XObject".to_vec()));
        }
        if let Some(bbox) = direct_bbox(dict) {
            return bbox;
        }
        dict.set(
            "BBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(fallback[2].round() as i64),
                Object::Integer(fallback[3].round() as i64),
            ]),
        );
        fallback
    }

    /// Resolved resources for a page, following the parent chain, with any
    /// indirect `XObject` subdictionary inlined so it can be extended.
    fn materialized_resources(&self, page_id: ObjectId) -> Dictionary {
        let mut current = page_id;
        for _ in 0..32 {
            let Ok(dict) = self.doc.get_object(current).and_then(|obj| obj.as_dict()) else {
                break;
            };
            if let Ok(res) = dict.get(b"Resources")
                && let Object::Dictionary(res_dict) = resolve(&self.doc, res)
            {
                let mut out = res_dict.clone();
                if let Ok(xobj) = res_dict.get(b"XObject")
                    && let Object::Dictionary(xobj_dict) = resolve(&self.doc, xobj)
                {
                    out.set("XObject", Object::Dictionary(xobj_dict.clone()));
                }
                return out;
            }
            match dict.get(b"Parent").and_then(|p| p.as_reference()) {
                Ok(parent) => current = parent,
                Err(_) => break,
            }
        }
        Dictionary::new()
    }
}

/// An appearance stream selected for stamping.
enum StampStream {
    Indirect(ObjectId),
    Inline(Stream),
}

struct Stamp {
    stream: StampStream,
    rect: [f64; 4],
}

fn annot_dict<'a>(doc: &'a Document, annot: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, annot) {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// Pick a widget's normal appearance stream: direct stream, or the entry of
/// the appearance dictionary selected by `/AS`.
fn selected_appearance(doc: &Document, widget: &Dictionary) -> Option<StampStream> {
    let normal = {
        let ap = widget.get(b"AP").ok()?;
        let Object::Dictionary(ap_dict) = resolve(doc, ap) else {
            return None;
        };
        ap_dict.get(b"N").ok()?
    };
    match normal {
        Object::Reference(id) => match doc.get_object(*id) {
            Ok(Object::Stream(_)) => Some(StampStream::Indirect(*id)),
            Ok(Object::Dictionary(states)) => select_state(doc, widget, states),
            _ => None,
        },
        Object::Stream(stream) => Some(StampStream::Inline(stream.clone())),
        Object::Dictionary(states) => select_state(doc, widget, states),
        _ => None,
    }
}

fn select_state(doc: &Document, widget: &Dictionary, states: &Dictionary) -> Option<StampStream> {
    let selected: Vec<u8> = match widget.get(b"AS").ok().map(|o| resolve(doc, o)) {
        Some(Object::Name(name)) => name.clone(),
        _ => b"Off".to_vec(),
    };
    match states.get(&selected).ok()? {
        Object::Reference(id) => Some(StampStream::Indirect(*id)),
        Object::Stream(stream) => Some(StampStream::Inline(stream.clone())),
        _ => None,
    }
}

fn read_rect(doc: &Document, dict: &Dictionary) -> [f64; 4] {
    let mut rect = [0.0f64; 4];
    if let Ok(Object::Array(values)) = dict.get(b"Rect").map(|o| resolve(doc, o)) {
        for (slot, value) in rect.iter_mut().zip(values.iter()) {
            if let Some(number) = crate::fields::object_number(doc, value) {
                *slot = number;
            }
        }
    }
    rect
}

/// Bounding box read without reference resolution (pathological refs are
/// treated as absent).
fn direct_bbox(dict: &Dictionary) -> Option<[f64; 4]> {
    let Ok(Object::Array(values)) = dict.get(b"BBox") else {
        return None;
    };
    if values.len() != 4 {
        return None;
    }
    let mut bbox = [0.0f64; 4];
    for (slot, value) in bbox.iter_mut().zip(values.iter()) {
        *slot = match value {
            Object::Integer(i) => *i as f64,
            Object::Real(r) => f64::from(*r),
            _ => return None,
        };
    }
    Some(bbox)
}

fn template_field(node: &FieldNode) -> TemplateField {
    let options = match node.field_type {
        FieldType::CheckBox | FieldType::Radio => {
            if node.on_states.is_empty() {
                None
            } else {
                Some(node.on_states.clone())
            }
        }
        FieldType::Dropdown => Some(node.options.clone()),
        _ => None,
    };
    TemplateField {
        name: node.name.clone(),
        field_type: node.field_type,
        current_value: node.current.clone(),
        read_only: node.flags & FLAG_READ_ONLY != 0,
        required: node.flags & FLAG_REQUIRED != 0,
        max_length: node.max_len.and_then(|len| u32::try_from(len).ok()),
        options,
    }
}

fn to_document_error(error: PdfError) -> DocumentError {
    match error {
        PdfError::FieldNotFound { name } => DocumentError::FieldNotFound { name },
        PdfError::UnsupportedOption { name, option } => {
            DocumentError::UnsupportedOption { name, option }
        }
        PdfError::UnknownOnState { name, state } => DocumentError::UnknownOnState { name, state },
        other => DocumentError::engine(other.to_string()),
    }
}

impl FormDocument for PdfForm {
    fn list_fields(&self) -> Vec<TemplateField> {
        self.fields()
    }

    fn contains_field(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn field_type(&self, name: &str) -> Option<FieldType> {
        self.kind(name)
    }

    fn allowed_options(&self, name: &str) -> Vec<String> {
        self.options(name)
    }

    fn set_text(&mut self, name: &str, value: &str) -> std::result::Result<(), DocumentError> {
        PdfForm::set_text(self, name, value).map_err(to_document_error)
    }

    fn set_checked(&mut self, name: &str, checked: bool) -> std::result::Result<(), DocumentError> {
        PdfForm::set_checked(self, name, checked).map_err(to_document_error)
    }

    fn check_export(&mut self, name: &str, state: &str) -> std::result::Result<(), DocumentError> {
        PdfForm::check_export(self, name, state).map_err(to_document_error)
    }

    fn select_option(&mut self, name: &str, option: &str) -> std::result::Result<(), DocumentError> {
        PdfForm::select_option(self, name, option).map_err(to_document_error)
    }

    fn save(&mut self) -> std::result::Result<Vec<u8>, DocumentError> {
        PdfForm::save(self).map_err(to_document_error)
    }

    fn flatten(&mut self) -> std::result::Result<(), DocumentError> {
        PdfForm::flatten(self).map_err(to_document_error)
    }
}

/// Factory for [`PdfForm`] documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfEngine;

impl PdfEngine {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentEngine for PdfEngine {
    type Document = PdfForm;

    fn open(&self, bytes: &[u8]) -> std::result::Result<PdfForm, DocumentError> {
        PdfForm::load(bytes).map_err(|error| DocumentError::engine(error.to_string()))
    }
}
