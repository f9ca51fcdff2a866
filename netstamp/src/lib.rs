//! netstamp - netlist test-fixture generator for analog schematic skins
//!
//! This library builds the JSON netlist fixture used to eyeball an analog
//! rendering skin: one module, `tests`, made of independent "stamps", each
//! drawing one component wired to power rails and/or module ports.
//!
//! # Quick Start
//!
//! ```no_run
//! use netstamp::{FixtureCore, GenerateOptions};
//!
//! let fixture = FixtureCore::generate(&GenerateOptions::default()).unwrap();
//! println!("{}", fixture.to_json().unwrap());
//! ```
//!
//! # Pipeline
//!
//! - **Templates**: one port or cell at a given bit offset
//! - **Stamps**: templates wired into a self-contained test unit
//! - **Composer**: folds stamps over a bit cursor into one module
//! - **Serializer**: sorted-key, two-space JSON
//! - **Validator / connectivity**: post-assembly checks

pub mod catalog;
pub mod compose;
pub mod connectivity;
pub mod core;
pub mod netlist;
pub mod render;
pub mod serialize;
pub mod stamps;
pub mod validate;

// Re-export main types
pub use compose::{compose, compose_from, Composition, StampSpan};
pub use crate::core::{
    Fixture, FixtureCore, FixtureStats, GenerateOptions, NetstampError, RenderOptions,
};
pub use netlist::{BitRange, Document, Fragment, Module};
pub use render::Renderer;
pub use stamps::{Placement, Shape, Stamp, StampBuilder};
pub use validate::{validate, validate_document, SchemaViolation};

/// Generate the full analog suite as canonical JSON (convenience wrapper).
pub fn analog_suite_json() -> Result<String, NetstampError> {
    FixtureCore::generate(&GenerateOptions::default())?.to_json()
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::netlist::{Orientation, Polarity, TwoTerminal};
    pub use crate::{
        compose, Composition, Fixture, FixtureCore, GenerateOptions, NetstampError,
        RenderOptions, SchemaViolation, Stamp, StampBuilder,
    };
}
