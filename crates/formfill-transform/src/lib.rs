//! Value transformer library for form filling.
//!
//! Transformers are pure, total functions converting one application-level
//! answer (optionally with access to its sibling answers) into the value or
//! values written to the target document. They never fail: absent or
//! malformed input maps to a documented default.
//!
//! Mapping tables reference transformers by name through the
//! [`TransformerRegistry`], keeping executable code out of configuration
//! data.

pub mod registry;
pub mod transforms;

pub use registry::{TransformFn, TransformerRegistry};
pub use transforms::{TransformInput, TransformOutput};
