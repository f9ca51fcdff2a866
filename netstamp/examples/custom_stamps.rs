//! Example: a custom stamp builder composed next to catalog stamps.
//! Run with: cargo run --example custom_stamps

use netstamp::netlist::templates;
use netstamp::prelude::*;
use netstamp::{serialize, validate, Fragment};

/// A horizontal resistor whose output is also pulled to ground.
struct LoadedResistor;

impl StampBuilder for LoadedResistor {
    fn width(&self) -> usize {
        2
    }

    fn name(&self) -> String {
        "loaded_r".to_string()
    }

    fn build(&self, offset: usize) -> Fragment {
        templates::input(offset)
            .merge(templates::two_terminal(
                TwoTerminal::Resistor,
                Orientation::Horizontal,
                offset,
            ))
            .merge(templates::ground(offset + 1))
    }
}

fn main() -> Result<(), NetstampError> {
    let builders: Vec<Box<dyn StampBuilder>> = vec![
        Box::new(Stamp::Vertical(TwoTerminal::Capacitor)),
        Box::new(LoadedResistor),
        Box::new(Stamp::OpAmp),
    ];

    let composition = compose(&builders);
    let violations = validate(&composition);
    if !violations.is_empty() {
        return Err(NetstampError::SchemaViolation(violations));
    }

    let document = serialize::to_document(&composition.fragment, "tests");
    println!("{}", serialize::to_json(&document)?);
    Ok(())
}
