//! Export core modules shared by the CLI sinks.

pub mod text;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use text::{build_text_artifact, SECTION_SEPARATOR};
