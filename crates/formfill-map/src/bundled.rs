//! Bundled sample mapping tables.
//!
//! The tables ship as JSON data files under `mappings/` and are embedded
//! here so a registry can be built without any filesystem layout. They are
//! samples: production deployments load their own versioned tables with
//! [`MappingRegistry::from_dir`].

use std::path::PathBuf;

use formfill_model::FormMapping;

use crate::error::{MapError, Result};
use crate::registry::MappingRegistry;

const WI_FORM_1: &str = include_str!("../mappings/wi_form_1.json");
const FORM_1040: &str = include_str!("../mappings/form_1040.json");
const FORM_1040NR: &str = include_str!("../mappings/form_1040nr.json");

/// Build a registry preloaded with the bundled sample tables.
pub fn registry() -> Result<MappingRegistry> {
    let mut registry = MappingRegistry::new();
    for (name, contents) in [
        ("wi_form_1.json", WI_FORM_1),
        ("form_1040.json", FORM_1040),
        ("form_1040nr.json", FORM_1040NR),
    ] {
        let mapping: FormMapping =
            serde_json::from_str(contents).map_err(|source| MapError::Parse {
                path: PathBuf::from(name),
                source,
            })?;
        registry.register(mapping);
    }
    Ok(registry)
}
