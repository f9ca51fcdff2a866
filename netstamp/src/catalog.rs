//! The standard analog test suite.

use crate::netlist::{Polarity, TwoTerminal};
use crate::stamps::Stamp;

/// Every stamp of the analog skin, in fixture order.
///
/// Passives and diodes get both orientations; sources are vertical only and
/// the crystal horizontal only, since the skin draws each of those once.
pub fn analog_suite() -> Vec<Stamp> {
    let mut stamps = Vec::new();

    for part in [TwoTerminal::Resistor, TwoTerminal::Inductor, TwoTerminal::Capacitor] {
        stamps.push(Stamp::Vertical(part));
        stamps.push(Stamp::Horizontal(part));
    }

    for source in [TwoTerminal::VoltageSource, TwoTerminal::CurrentSource] {
        stamps.push(Stamp::Vertical(source));
    }

    for diode in [TwoTerminal::Diode, TwoTerminal::Schottky, TwoTerminal::Led] {
        stamps.push(Stamp::Vertical(diode));
        stamps.push(Stamp::Horizontal(diode));
    }

    for polarity in [Polarity::Npn, Polarity::Pnp] {
        stamps.push(Stamp::Transistor(polarity));
    }

    stamps.push(Stamp::Horizontal(TwoTerminal::Crystal));
    stamps.push(Stamp::OpAmp);
    stamps.push(Stamp::Transformer);

    stamps
}

/// Restrict `stamps` to the given type tags, keeping suite order.
///
/// An empty filter keeps everything. Returns the tags that matched nothing
/// alongside the selection.
pub fn select(stamps: Vec<Stamp>, only: &[String]) -> (Vec<Stamp>, Vec<String>) {
    if only.is_empty() {
        return (stamps, Vec::new());
    }

    let unknown = only
        .iter()
        .filter(|tag| !stamps.iter().any(|s| s.type_tag() == tag.as_str()))
        .cloned()
        .collect();
    let selected = stamps
        .into_iter()
        .filter(|s| only.iter().any(|tag| *tag == s.type_tag()))
        .collect();
    (selected, unknown)
}
