//! Document serialization.
//!
//! Output is two-space indented JSON with `": "` separators and no trailing
//! newline. Keys are sorted at every level because every map in the document
//! model is a `BTreeMap` and serialized struct fields are declared
//! alphabetically. The renderer and diff-based fixture checks both rely on
//! this being byte-stable.

use std::io::Write;

use crate::core::NetstampError;
use crate::netlist::{Document, Fragment};

/// Wrap an aggregate fragment as a one-module document.
pub fn to_document(fragment: &Fragment, module_name: &str) -> Document {
    Document::single(module_name, fragment.to_module())
}

/// Render the document in the canonical fixture format.
pub fn to_json(document: &Document) -> Result<String, NetstampError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Single-line rendering, same key order.
pub fn to_json_compact(document: &Document) -> Result<String, NetstampError> {
    Ok(serde_json::to_string(document)?)
}

/// Write the canonical format to `writer`.
pub fn to_writer<W: Write>(writer: W, document: &Document) -> Result<(), NetstampError> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}
