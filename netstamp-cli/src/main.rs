//! netstamp CLI - generate and render analog netlist test fixtures.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use netstamp::catalog;
use netstamp::connectivity::Connectivity;
use netstamp::render::DEFAULT_RENDERER;
use netstamp::serialize;
use netstamp::{FixtureCore, GenerateOptions, RenderOptions, StampBuilder};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netstamp")]
#[command(about = "Netlist test-fixture generator for analog schematic skins", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level for stderr diagnostics (RUST_LOG overrides)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the fixture JSON
    Generate {
        /// Write to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Name of the generated module
        #[arg(long, default_value = "tests")]
        module: String,

        /// Only include stamps with this type tag (repeatable)
        #[arg(long, value_name = "TAG")]
        only: Vec<String>,

        /// Skip the post-assembly validation pass
        #[arg(long)]
        no_validate: bool,

        /// Single-line JSON (stdout only)
        #[arg(long)]
        compact: bool,
    },

    /// Write the fixture JSON and run the renderer on it
    Render {
        /// Skin file passed to the renderer
        #[arg(long, value_name = "SKIN")]
        skin: PathBuf,

        /// Renderer command line
        #[arg(long, env = "NETSTAMP_RENDERER", default_value = DEFAULT_RENDERER)]
        renderer: String,

        /// Where to write the fixture JSON
        #[arg(long, value_name = "FILE", default_value = "analog_test.json")]
        json: PathBuf,

        /// Where the renderer writes the image
        #[arg(short, long, value_name = "FILE", default_value = "analog_test.svg")]
        output: PathBuf,

        /// Only include stamps with this type tag (repeatable)
        #[arg(long, value_name = "TAG")]
        only: Vec<String>,
    },

    /// List the stamp catalog
    Stamps {
        /// Show the bit range each stamp occupies in the full suite
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compose the suite and report validation and connectivity
    Check {
        /// Only include stamps with this type tag (repeatable)
        #[arg(long, value_name = "TAG")]
        only: Vec<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Generate {
            output,
            module,
            only,
            no_validate,
            compact,
        } => handle_generate(output, module, only, !no_validate, compact),
        Commands::Render {
            skin,
            renderer,
            json,
            output,
            only,
        } => handle_render(skin, renderer, json, output, only),
        Commands::Stamps { verbose } => {
            handle_stamps(verbose);
            Ok(())
        }
        Commands::Check { only, json } => handle_check(only, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_generate(
    output: Option<PathBuf>,
    module: String,
    only: Vec<String>,
    validate: bool,
    compact: bool,
) -> Result<()> {
    let options = GenerateOptions {
        module_name: module,
        validate,
        only,
    };
    tracing::debug!("Generate options: {:?}", options);
    let fixture = FixtureCore::generate(&options).context("generating fixture")?;

    match output {
        Some(path) => FixtureCore::write_document(&fixture.document, &path)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let json = if compact {
                serialize::to_json_compact(&fixture.document)?
            } else {
                serialize::to_json(&fixture.document)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}

fn handle_render(
    skin: PathBuf,
    renderer: String,
    json: PathBuf,
    output: PathBuf,
    only: Vec<String>,
) -> Result<()> {
    let options = GenerateOptions {
        only,
        ..GenerateOptions::default()
    };
    let fixture = FixtureCore::generate(&options).context("generating fixture")?;

    let render = RenderOptions {
        renderer,
        skin,
        json_path: json,
        svg_path: output,
    };
    FixtureCore::render(&fixture, &render)
        .with_context(|| format!("rendering {}", render.svg_path.display()))?;
    println!("{}", render.svg_path.display());
    Ok(())
}

fn handle_stamps(verbose: bool) {
    println!("Available stamps:\n");

    let composition = netstamp::compose(&catalog::analog_suite());
    for (stamp, span) in catalog::analog_suite().iter().zip(&composition.spans) {
        println!("  {}", stamp.type_tag());
        println!("    {} ({} bits)", stamp.describe(), stamp.width());
        if verbose {
            println!("    bits {}", span.range);
        }
        println!();
    }
}

fn handle_check(only: Vec<String>, json: bool) -> Result<()> {
    let options = GenerateOptions {
        only,
        ..GenerateOptions::default()
    };
    let fixture = FixtureCore::generate(&options).context("generating fixture")?;
    let stats = &fixture.stats;

    if json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("Stamps:      {}", stats.stamps);
    println!("Ports:       {}", stats.ports);
    println!("Cells:       {}", stats.cells);
    println!("Bits:        {}", stats.bits);
    let shared = Connectivity::from_fragment(&fixture.composition.fragment)
        .shared_nets()
        .len();
    println!("Shared nets: {}", shared);
    println!("Groups:      {}", stats.connectivity.group_count);

    if stats.connectivity.group_count != stats.stamps {
        anyhow::bail!(
            "{} stamps form {} connected groups",
            stats.stamps,
            stats.connectivity.group_count
        );
    }
    println!("\n  No schema violations found");
    Ok(())
}
