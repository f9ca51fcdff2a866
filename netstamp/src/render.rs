//! External renderer invocation.
//!
//! The renderer is an opaque process: it receives a skin and the fixture
//! path, writes an image, and reports nothing but its exit status.

use std::path::Path;
use std::process::Command;

use crate::core::NetstampError;

pub const DEFAULT_RENDERER: &str = "netlistsvg";

/// A renderer command line, e.g. `netlistsvg` or `node ../bin/netlistsvg.js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    program: String,
    args: Vec<String>,
}

impl Renderer {
    /// Split a command line on whitespace; the first word is the program.
    ///
    /// An empty line falls back to [`DEFAULT_RENDERER`].
    pub fn from_command_line(command_line: &str) -> Self {
        let mut words = command_line.split_whitespace().map(str::to_string);
        match words.next() {
            Some(program) => Self {
                program,
                args: words.collect(),
            },
            None => Self::default(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The full argument list passed to the program.
    pub fn arguments(&self, skin: &Path, json_path: &Path, svg_path: &Path) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("--skin".to_string());
        args.push(skin.display().to_string());
        args.push("-o".to_string());
        args.push(svg_path.display().to_string());
        args.push(json_path.display().to_string());
        args
    }

    pub fn command_line(&self, skin: &Path, json_path: &Path, svg_path: &Path) -> String {
        std::iter::once(self.program.clone())
            .chain(self.arguments(skin, json_path, svg_path))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the renderer and wait for it.
    pub fn render(&self, skin: &Path, json_path: &Path, svg_path: &Path) -> Result<(), NetstampError> {
        let command = self.command_line(skin, json_path, svg_path);
        tracing::info!("Running renderer: {}", command);

        let status = Command::new(&self.program)
            .args(self.arguments(skin, json_path, svg_path))
            .status()?;

        if !status.success() {
            tracing::warn!("Renderer exited with {}", status);
            return Err(NetstampError::Render {
                command,
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            program: DEFAULT_RENDERER.to_string(),
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_split() {
        let renderer = Renderer::from_command_line("node ../bin/netlistsvg.js");
        assert_eq!(renderer.program(), "node");
        assert_eq!(
            renderer.command_line(
                Path::new("../lib/analog.svg"),
                Path::new("analog_test.json"),
                Path::new("analog_test.svg"),
            ),
            "node ../bin/netlistsvg.js --skin ../lib/analog.svg -o analog_test.svg analog_test.json"
        );
    }

    #[test]
    fn test_empty_command_line() {
        assert_eq!(Renderer::from_command_line("   "), Renderer::default());
        assert_eq!(Renderer::default().program(), DEFAULT_RENDERER);
    }

    #[test]
    fn test_missing_program_is_io_error() {
        let renderer = Renderer::from_command_line("netstamp-no-such-renderer-binary");
        let result = renderer.render(Path::new("s.svg"), Path::new("in.json"), Path::new("out.svg"));
        assert!(matches!(result, Err(NetstampError::Io(_))));
    }
}
