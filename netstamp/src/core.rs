//! Core generation logic shared by the CLI and library users.
//! No process-wide state: options come in, a document goes out.

use std::path::{Path, PathBuf};

use crate::catalog;
use crate::compose::{compose, Composition};
use crate::connectivity::{Connectivity, ConnectivityStats};
use crate::netlist::Document;
use crate::render::{Renderer, DEFAULT_RENDERER};
use crate::serialize;
use crate::stamps::{Stamp, StampBuilder};
use crate::validate::{self, SchemaViolation};

#[derive(Debug, thiserror::Error)]
pub enum NetstampError {
    #[error("Schema violation: {}", format_violations(.0))]
    SchemaViolation(Vec<SchemaViolation>),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Renderer failed ({status}): {command}")]
    Render { command: String, status: String },
    #[error("Unknown stamp type: {}", .0.join(", "))]
    UnknownStamp(Vec<String>),
}

fn format_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Options for generating a fixture.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Name of the single module in the document.
    pub module_name: String,
    /// Refuse to produce a document that fails validation.
    pub validate: bool,
    /// Type tags to keep from the catalog; empty keeps all.
    pub only: Vec<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            module_name: "tests".to_string(),
            validate: true,
            only: vec![],
        }
    }
}

/// Options for rendering a fixture with the external tool.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Renderer command line; may include leading arguments.
    pub renderer: String,
    pub skin: PathBuf,
    pub json_path: PathBuf,
    pub svg_path: PathBuf,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            renderer: DEFAULT_RENDERER.to_string(),
            skin: PathBuf::from("analog.svg"),
            json_path: PathBuf::from("analog_test.json"),
            svg_path: PathBuf::from("analog_test.svg"),
        }
    }
}

/// A generated fixture with its layout and summary.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub composition: Composition,
    pub document: Document,
    pub stats: FixtureStats,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FixtureStats {
    pub stamps: usize,
    pub ports: usize,
    pub cells: usize,
    pub bits: usize,
    pub connectivity: ConnectivityStats,
}

impl Fixture {
    pub fn to_json(&self) -> Result<String, NetstampError> {
        serialize::to_json(&self.document)
    }
}

/// Core generation API used by the CLI.
pub struct FixtureCore;

impl FixtureCore {
    /// Generate the analog suite (optionally filtered by `options.only`).
    pub fn generate(options: &GenerateOptions) -> Result<Fixture, NetstampError> {
        let (stamps, unknown) = catalog::select(catalog::analog_suite(), &options.only);
        if !unknown.is_empty() {
            return Err(NetstampError::UnknownStamp(unknown));
        }
        Self::generate_with::<Stamp>(&stamps, options)
    }

    /// Generate a fixture from caller-supplied builders.
    pub fn generate_with<B: StampBuilder>(
        builders: &[B],
        options: &GenerateOptions,
    ) -> Result<Fixture, NetstampError> {
        let composition = compose(builders);

        if options.validate {
            let violations = validate::validate(&composition);
            if !violations.is_empty() {
                return Err(NetstampError::SchemaViolation(violations));
            }
        }

        let document = serialize::to_document(&composition.fragment, &options.module_name);
        let stats = FixtureStats {
            stamps: composition.stamp_count(),
            ports: composition.fragment.ports.len(),
            cells: composition.fragment.cells.len(),
            bits: composition.offset,
            connectivity: Connectivity::from_fragment(&composition.fragment).stats(),
        };
        tracing::debug!(
            "Generated {} stamps, {} ports, {} cells over {} bits",
            stats.stamps,
            stats.ports,
            stats.cells,
            stats.bits
        );

        Ok(Fixture {
            composition,
            document,
            stats,
        })
    }

    /// Serialize `document` to `path`, creating parent directories.
    pub fn write_document(document: &Document, path: &Path) -> Result<(), NetstampError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serialize::to_json(document)?;
        std::fs::write(path, json)?;
        tracing::info!("Wrote fixture to {}", path.display());
        Ok(())
    }

    /// Write the fixture JSON and run the renderer on it.
    pub fn render(fixture: &Fixture, options: &RenderOptions) -> Result<(), NetstampError> {
        Self::write_document(&fixture.document, &options.json_path)?;
        Renderer::from_command_line(&options.renderer).render(
            &options.skin,
            &options.json_path,
            &options.svg_path,
        )
    }
}
