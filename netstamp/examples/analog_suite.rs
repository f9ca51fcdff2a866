//! Example: generate the analog suite and write it to a file.
//! Run with: cargo run --example analog_suite [path/to/analog_test.json]

use netstamp::{FixtureCore, GenerateOptions};
use std::path::PathBuf;

fn main() -> Result<(), netstamp::NetstampError> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("analog_test.json"));

    let fixture = FixtureCore::generate(&GenerateOptions::default())?;
    FixtureCore::write_document(&fixture.document, &path)?;

    println!(
        "Wrote {} stamps ({} ports, {} cells, {} bits) to {}",
        fixture.stats.stamps,
        fixture.stats.ports,
        fixture.stats.cells,
        fixture.stats.bits,
        path.display()
    );
    for span in &fixture.composition.spans {
        println!("  {:<20} {}", span.name, span.range);
    }
    Ok(())
}
