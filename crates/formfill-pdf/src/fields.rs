//! AcroForm field tree traversal.
//!
//! Walks catalog -> `/AcroForm` -> `/Fields`, producing one node per
//! terminal field with its fully-qualified name (parent names joined with
//! `.`), normalized type, inheritable flags, options, and per-widget
//! checkbox on-states. Unrecognized field kinds normalize to
//! [`FieldType::Unknown`]; the walk itself never fails on field content.

use lopdf::{Dictionary, Document, Object, ObjectId};

use formfill_model::FieldType;

use crate::text::decode_pdf_string;

// Field flag bits (PDF 32000-1, table 221 ff).
pub(crate) const FLAG_READ_ONLY: i64 = 1;
pub(crate) const FLAG_REQUIRED: i64 = 1 << 1;
pub(crate) const FLAG_BTN_RADIO: i64 = 1 << 15;
pub(crate) const FLAG_BTN_PUSHBUTTON: i64 = 1 << 16;

const MAX_DEPTH: usize = 32;

/// One widget annotation of a field.
#[derive(Debug, Clone)]
pub(crate) struct WidgetNode {
    pub id: ObjectId,
    /// Appearance states other than `Off`, in appearance-dictionary order.
    pub on_states: Vec<String>,
}

/// One terminal field of the interactive layer.
#[derive(Debug, Clone)]
pub(crate) struct FieldNode {
    pub name: String,
    /// The field dictionary (also the widget for merged fields).
    pub id: ObjectId,
    pub widgets: Vec<WidgetNode>,
    pub field_type: FieldType,
    pub flags: i64,
    pub max_len: Option<i64>,
    /// Choice options (`/Opt`), export values.
    pub options: Vec<String>,
    /// Union of widget on-states, in first-seen order.
    pub on_states: Vec<String>,
    pub current: Option<String>,
}

/// Follow references until a direct object is reached.
pub(crate) fn resolve<'a>(doc: &'a Document, mut object: &'a Object) -> &'a Object {
    let mut hops = 0;
    while let Object::Reference(id) = object {
        if hops > 16 {
            break;
        }
        match doc.get_object(*id) {
            Ok(next) => object = next,
            Err(_) => break,
        }
        hops += 1;
    }
    object
}

fn resolved_dict<'a>(doc: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, object) {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}

pub(crate) fn object_number(doc: &Document, object: &Object) -> Option<f64> {
    match resolve(doc, object) {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn dict_name<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a [u8]> {
    match resolve(doc, dict.get(key).ok()?) {
        Object::Name(name) => Some(name.as_slice()),
        _ => None,
    }
}

fn dict_string(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match resolve(doc, dict.get(key).ok()?) {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

fn dict_int(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<i64> {
    match resolve(doc, dict.get(key).ok()?) {
        Object::Integer(i) => Some(*i),
        _ => None,
    }
}

fn kid_ids(doc: &Document, dict: &Dictionary) -> Vec<ObjectId> {
    let Some(kids) = dict.get(b"Kids").ok() else {
        return Vec::new();
    };
    let Object::Array(kids) = resolve(doc, kids) else {
        return Vec::new();
    };
    kids.iter()
        .filter_map(|kid| kid.as_reference().ok())
        .collect()
}

/// The catalog's object id, from the trailer `Root` entry.
pub(crate) fn catalog_id(doc: &Document) -> Option<ObjectId> {
    doc.trailer.get(b"Root").ok()?.as_reference().ok()
}

/// The `/AcroForm` object id, when the catalog references one indirectly.
pub(crate) fn acroform_id(doc: &Document) -> Option<ObjectId> {
    let catalog = resolved_dict(doc, doc.trailer.get(b"Root").ok()?)?;
    catalog.get(b"AcroForm").ok()?.as_reference().ok()
}

/// Collect every terminal field reachable from `/AcroForm /Fields`.
pub(crate) fn collect_fields(doc: &Document) -> Vec<FieldNode> {
    let Some(root) = doc.trailer.get(b"Root").ok() else {
        return Vec::new();
    };
    let Some(catalog) = resolved_dict(doc, root) else {
        return Vec::new();
    };
    let Some(acroform) = catalog
        .get(b"AcroForm")
        .ok()
        .and_then(|obj| resolved_dict(doc, obj))
    else {
        return Vec::new();
    };
    let Some(Object::Array(field_refs)) = acroform.get(b"Fields").ok().map(|o| resolve(doc, o))
    else {
        return Vec::new();
    };

    let roots: Vec<ObjectId> = field_refs
        .iter()
        .filter_map(|obj| obj.as_reference().ok())
        .collect();
    let mut out = Vec::new();
    for id in roots {
        walk_field(doc, id, None, None, None, &mut out, 0);
    }
    out
}

fn walk_field(
    doc: &Document,
    id: ObjectId,
    prefix: Option<&str>,
    inherited_ft: Option<&[u8]>,
    inherited_flags: Option<i64>,
    out: &mut Vec<FieldNode>,
    depth: usize,
) {
    if depth > MAX_DEPTH {
        return;
    }
    let Ok(object) = doc.get_object(id) else {
        return;
    };
    let Ok(dict) = object.as_dict() else {
        return;
    };

    let partial = dict_string(doc, dict, b"T");
    let full_name = match (prefix, partial.as_deref()) {
        (Some(prefix), Some(partial)) => Some(format!("{prefix}.{partial}")),
        (Some(prefix), None) => Some(prefix.to_string()),
        (None, Some(partial)) => Some(partial.to_string()),
        (None, None) => None,
    };

    let ft: Option<Vec<u8>> = dict_name(doc, dict, b"FT")
        .map(<[u8]>::to_vec)
        .or_else(|| inherited_ft.map(<[u8]>::to_vec));
    let flags = dict_int(doc, dict, b"Ff").or(inherited_flags);

    let kids = kid_ids(doc, dict);
    let named_kids: Vec<ObjectId> = kids
        .iter()
        .copied()
        .filter(|kid| {
            doc.get_object(*kid)
                .ok()
                .and_then(|obj| obj.as_dict().ok())
                .is_some_and(|d| d.has(b"T"))
        })
        .collect();

    if !named_kids.is_empty() {
        // Non-terminal node: recurse into named children.
        for kid in named_kids {
            walk_field(
                doc,
                kid,
                full_name.as_deref(),
                ft.as_deref(),
                flags,
                out,
                depth + 1,
            );
        }
        return;
    }

    let Some(ft) = ft else {
        return;
    };
    let Some(name) = full_name else {
        return;
    };

    let flags = flags.unwrap_or(0);
    let field_type = classify_type(&ft, flags);

    // Widgets: unnamed kids, or the field dictionary itself when merged.
    let widget_ids = if kids.is_empty() { vec![id] } else { kids };
    let mut widgets = Vec::with_capacity(widget_ids.len());
    let mut on_states: Vec<String> = Vec::new();
    for widget_id in widget_ids {
        let states = widget_on_states(doc, widget_id);
        for state in &states {
            if !on_states.contains(state) {
                on_states.push(state.clone());
            }
        }
        widgets.push(WidgetNode {
            id: widget_id,
            on_states: states,
        });
    }

    let options = choice_options(doc, dict);
    let current = current_value(doc, dict);
    let max_len = dict_int(doc, dict, b"MaxLen");

    out.push(FieldNode {
        name,
        id,
        widgets,
        field_type,
        flags,
        max_len,
        options,
        on_states,
        current,
    });
}

fn classify_type(ft: &[u8], flags: i64) -> FieldType {
    match ft {
        b"Tx" => FieldType::Text,
        b"Btn" => {
            if flags & FLAG_BTN_PUSHBUTTON != 0 {
                FieldType::Button
            } else if flags & FLAG_BTN_RADIO != 0 {
                FieldType::Radio
            } else {
                FieldType::CheckBox
            }
        }
        b"Ch" => FieldType::Dropdown,
        _ => FieldType::Unknown,
    }
}

/// Appearance states of a widget's normal appearance, minus `Off`.
fn widget_on_states(doc: &Document, widget_id: ObjectId) -> Vec<String> {
    let Some(widget) = doc
        .get_object(widget_id)
        .ok()
        .and_then(|obj| obj.as_dict().ok())
    else {
        return Vec::new();
    };
    let Some(ap) = widget
        .get(b"AP")
        .ok()
        .and_then(|obj| resolved_dict(doc, obj))
    else {
        return Vec::new();
    };
    let Some(Object::Dictionary(normal)) = ap.get(b"N").ok().map(|o| resolve(doc, o)) else {
        return Vec::new();
    };
    normal
        .iter()
        .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
        .filter(|state| state != "Off")
        .collect()
}

/// Export values from a choice field's `/Opt` array.
fn choice_options(doc: &Document, dict: &Dictionary) -> Vec<String> {
    let Some(Object::Array(entries)) = dict.get(b"Opt").ok().map(|o| resolve(doc, o)) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match resolve(doc, entry) {
            Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
            // [export, display] pairs carry the export value first.
            Object::Array(pair) => pair.first().and_then(|first| match resolve(doc, first) {
                Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
                _ => None,
            }),
            _ => None,
        })
        .collect()
}

fn current_value(doc: &Document, dict: &Dictionary) -> Option<String> {
    match resolve(doc, dict.get(b"V").ok()?) {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}
