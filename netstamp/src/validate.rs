//! Post-assembly validation
//!
//! The catalog is fixed, so everything checked here is a programming error in
//! a template or a custom builder. The checks collect every violation rather
//! than stopping at the first one.
//!
//! - every cell's `port_directions` and `connections` share a key set
//! - every port and connection carries exactly one bit
//! - every bit lies in `[0, offset)`
//! - every bit of a stamp lies in that stamp's range
//! - no bit is claimed by two different stamps
//! - no cell carries the same terminal label twice
//!
//! Inside a stamp, sharing follows one pattern: a net joins component
//! terminals and at most one attachment (a module port or a single-pin rail
//! cell). Two attachments on one net, or two terminals of one cell on one
//! net, is a short. Every bit of a stamp's range must be used, and every
//! attachment must land on a component terminal of its own stamp.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::compose::Composition;
use crate::netlist::{Document, Fragment, Module};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("cell {cell}: port_directions and connections differ (only in directions: {only_in_directions:?}, only in connections: {only_in_connections:?})")]
    KeyMismatch {
        cell: String,
        only_in_directions: Vec<String>,
        only_in_connections: Vec<String>,
    },

    #[error("bit {bit} claimed by both {first} and {second}")]
    BitCollision {
        bit: usize,
        first: String,
        second: String,
    },

    #[error("{owner}: bit {bit} outside [0, {offset})")]
    BitOutOfRange {
        owner: String,
        bit: usize,
        offset: usize,
    },

    #[error("{owner}: bit {bit} outside the range of stamp {stamp}")]
    BitOutsideStamp {
        owner: String,
        bit: usize,
        stamp: String,
    },

    #[error("stamp {stamp}: bit {bit} shorts {}", .claimants.join(", "))]
    ShortedNet {
        stamp: String,
        bit: usize,
        claimants: Vec<String>,
    },

    #[error("stamp {stamp}: {owner} on bit {bit} touches no component terminal")]
    FloatingAttachment {
        owner: String,
        bit: usize,
        stamp: String,
    },

    #[error("stamp {stamp}: bit {bit} is never used")]
    UnusedBit { stamp: String, bit: usize },

    #[error("cell {cell}: terminal {label} connected more than once")]
    DuplicateLabel { cell: String, label: String },

    #[error("{owner}.{label}: expected 1 bit, found {len}")]
    BadBitWidth {
        owner: String,
        label: String,
        len: usize,
    },
}

/// Validate a composition, including the per-stamp checks.
pub fn validate(composition: &Composition) -> Vec<SchemaViolation> {
    let module = composition.fragment.to_module();
    let mut violations = check_pins(&composition.fragment);
    violations.extend(check_module(&module, Some(composition.offset)));
    violations.extend(check_stamps(composition));
    violations.extend(check_sharing(composition));

    if !violations.is_empty() {
        tracing::warn!("Composition has {} schema violations", violations.len());
    }
    violations
}

/// Validate every module of a document.
///
/// Without stamp spans there is no way to tell intentional net sharing from a
/// collision, so only the key-set and bit-width checks apply, plus the range
/// check against `offset` when one is given.
pub fn validate_document(document: &Document, offset: Option<usize>) -> Vec<SchemaViolation> {
    document
        .modules
        .values()
        .flat_map(|module| check_module(module, offset))
        .collect()
}

fn check_module(module: &Module, offset: Option<usize>) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    for (name, port) in &module.ports {
        if port.bits.len() != 1 {
            violations.push(SchemaViolation::BadBitWidth {
                owner: name.clone(),
                label: "bits".to_string(),
                len: port.bits.len(),
            });
        }
        if let Some(offset) = offset {
            check_range(name, &port.bits, offset, &mut violations);
        }
    }

    for (name, cell) in &module.cells {
        let directions: BTreeSet<&String> = cell.port_directions.keys().collect();
        let connections: BTreeSet<&String> = cell.connections.keys().collect();
        if directions != connections {
            violations.push(SchemaViolation::KeyMismatch {
                cell: name.clone(),
                only_in_directions: directions
                    .difference(&connections)
                    .map(|s| s.to_string())
                    .collect(),
                only_in_connections: connections
                    .difference(&directions)
                    .map(|s| s.to_string())
                    .collect(),
            });
        }

        for (label, bits) in &cell.connections {
            if bits.len() != 1 {
                violations.push(SchemaViolation::BadBitWidth {
                    owner: name.clone(),
                    label: label.clone(),
                    len: bits.len(),
                });
            }
            if let Some(offset) = offset {
                check_range(name, bits, offset, &mut violations);
            }
        }
    }

    violations
}

fn check_range(owner: &str, bits: &[usize], offset: usize, violations: &mut Vec<SchemaViolation>) {
    for &bit in bits {
        if bit >= offset {
            violations.push(SchemaViolation::BitOutOfRange {
                owner: owner.to_string(),
                bit,
                offset,
            });
        }
    }
}

/// Labels are map keys on the wire, so a repeated label would silently drop
/// a pin during serialization.
fn check_pins(fragment: &Fragment) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    for (name, cell) in &fragment.cells {
        let mut seen = BTreeSet::new();
        for pin in &cell.pins {
            if !seen.insert(pin.label.as_str()) {
                violations.push(SchemaViolation::DuplicateLabel {
                    cell: name.clone(),
                    label: pin.label.as_str().to_string(),
                });
            }
        }
    }
    violations
}

/// Per-stamp checks: containment in the stamp's range, and exclusive bit
/// ownership across stamps. Sharing inside a stamp is left to
/// [`check_sharing`].
fn check_stamps(composition: &Composition) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    // bit -> (stamp index, first claimant)
    let mut owners: BTreeMap<usize, (usize, String)> = BTreeMap::new();
    let fragment = &composition.fragment;

    for (index, span) in composition.spans.iter().enumerate() {
        let port_claims = span.ports.iter().filter_map(|name| {
            fragment
                .ports
                .get(name)
                .map(|p| (name, p.bits.clone()))
        });
        let cell_claims = span.cells.iter().filter_map(|name| {
            fragment
                .cells
                .get(name)
                .map(|c| (name, c.bits().collect::<Vec<_>>()))
        });

        for (owner, bits) in port_claims.chain(cell_claims) {
            for bit in bits {
                if !span.range.contains(bit) {
                    violations.push(SchemaViolation::BitOutsideStamp {
                        owner: owner.clone(),
                        bit,
                        stamp: span.name.clone(),
                    });
                }
                match owners.get(&bit) {
                    Some((other, first)) if *other != index => {
                        violations.push(SchemaViolation::BitCollision {
                            bit,
                            first: first.clone(),
                            second: owner.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(bit, (index, owner.clone()));
                    }
                }
            }
        }
    }

    violations
}

/// What sits on one bit of one stamp.
#[derive(Default)]
struct Net {
    /// Module ports and rail cells.
    attachments: Vec<String>,
    /// `cell.label` for every pin of a multi-pin cell.
    terminals: Vec<String>,
    /// Set when one cell has two pins on this bit.
    self_short: bool,
}

/// Intra-stamp sharing: at most one attachment per net, every attachment on
/// a component terminal, no cell shorted to itself, no unused bits.
fn check_sharing(composition: &Composition) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    let fragment = &composition.fragment;

    for span in &composition.spans {
        let mut nets: BTreeMap<usize, Net> = BTreeMap::new();

        for name in &span.ports {
            if let Some(port) = fragment.ports.get(name) {
                for &bit in &port.bits {
                    nets.entry(bit).or_default().attachments.push(name.clone());
                }
            }
        }
        for name in &span.cells {
            let cell = match fragment.cells.get(name) {
                Some(cell) => cell,
                None => continue,
            };
            if cell.pins.len() == 1 {
                let bit = cell.pins[0].bit;
                nets.entry(bit).or_default().attachments.push(name.clone());
                continue;
            }
            let mut own_bits = BTreeSet::new();
            for pin in &cell.pins {
                let net = nets.entry(pin.bit).or_default();
                net.terminals.push(format!("{}.{}", name, pin.label));
                if !own_bits.insert(pin.bit) {
                    net.self_short = true;
                }
            }
        }

        for bit in span.range.iter() {
            if !nets.contains_key(&bit) {
                violations.push(SchemaViolation::UnusedBit {
                    stamp: span.name.clone(),
                    bit,
                });
            }
        }

        for (&bit, net) in &nets {
            if net.attachments.len() > 1 || net.self_short {
                violations.push(SchemaViolation::ShortedNet {
                    stamp: span.name.clone(),
                    bit,
                    claimants: net
                        .attachments
                        .iter()
                        .chain(&net.terminals)
                        .cloned()
                        .collect(),
                });
            }
            if net.terminals.is_empty() {
                for owner in &net.attachments {
                    violations.push(SchemaViolation::FloatingAttachment {
                        owner: owner.clone(),
                        bit,
                        stamp: span.name.clone(),
                    });
                }
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::netlist::templates;
    use crate::netlist::{Cell, Direction, Orientation, Polarity, Port, PortLabel, TwoTerminal};
    use crate::stamps::{Stamp, StampBuilder};

    /// Claims one bit more than it declares.
    struct Overhang;

    impl StampBuilder for Overhang {
        fn width(&self) -> usize {
            1
        }

        fn name(&self) -> String {
            "overhang".to_string()
        }

        fn build(&self, offset: usize) -> Fragment {
            Fragment::cell(
                format!("wide{}", offset),
                Cell::new("r_v")
                    .with_pin(PortLabel::A, Direction::Input, offset)
                    .with_pin(PortLabel::B, Direction::Output, offset + 1),
            )
        }
    }

    /// Negative supply lands on the collector instead of the emitter.
    struct MiswiredTransistor;

    impl StampBuilder for MiswiredTransistor {
        fn width(&self) -> usize {
            3
        }

        fn name(&self) -> String {
            "q_npn".to_string()
        }

        fn build(&self, offset: usize) -> Fragment {
            templates::input(offset)
                .merge(templates::supply(offset + 1))
                .merge(templates::transistor(Polarity::Npn, offset))
                .merge(templates::negative_supply(offset + 1))
        }
    }

    /// Input and output port on the same bit.
    struct PortsShorted;

    impl StampBuilder for PortsShorted {
        fn width(&self) -> usize {
            2
        }

        fn name(&self) -> String {
            "r_h".to_string()
        }

        fn build(&self, offset: usize) -> Fragment {
            templates::input(offset)
                .merge(templates::output(offset))
                .merge(templates::two_terminal(
                    TwoTerminal::Resistor,
                    Orientation::Horizontal,
                    offset,
                ))
        }
    }

    #[test]
    fn test_catalog_stamps_are_clean() {
        let stamps = [
            Stamp::Vertical(TwoTerminal::Resistor),
            Stamp::Vertical(TwoTerminal::Resistor),
            Stamp::Horizontal(TwoTerminal::Diode),
            Stamp::OpAmp,
        ];
        assert!(validate(&compose(&stamps)).is_empty());
    }

    #[test]
    fn test_overhang_collides_with_next_stamp() {
        let boxed: Vec<Box<dyn StampBuilder>> = vec![
            Box::new(Overhang),
            Box::new(Stamp::Vertical(TwoTerminal::Resistor)),
        ];
        let composition = compose(&boxed);
        let violations = validate(&composition);

        assert!(violations.contains(&SchemaViolation::BitOutsideStamp {
            owner: "wide0".to_string(),
            bit: 1,
            stamp: "overhang".to_string(),
        }));
        assert!(violations.iter().any(|v| matches!(
            v,
            SchemaViolation::BitCollision { bit: 1, first, .. } if first == "wide0"
        )));
    }

    #[test]
    fn test_out_of_range_bit() {
        let composition = compose(&[Overhang]);
        let violations = validate(&composition);
        assert!(violations.contains(&SchemaViolation::BitOutOfRange {
            owner: "wide0".to_string(),
            bit: 1,
            offset: 1,
        }));
    }

    #[test]
    fn test_key_mismatch_in_document() {
        let mut module = compose(&[Stamp::OpAmp]).fragment.to_module();
        let op = module.cells.get_mut("op").unwrap();
        op.connections.remove("VEE");
        op.port_directions.insert("GND".to_string(), Direction::Input);
        let document = Document::single("tests", module);

        let violations = validate_document(&document, None);
        assert_eq!(
            violations,
            vec![SchemaViolation::KeyMismatch {
                cell: "op".to_string(),
                only_in_directions: vec!["GND".to_string(), "VEE".to_string()],
                only_in_connections: vec![],
            }]
        );
    }

    #[test]
    fn test_bad_bit_width() {
        let mut module = compose(&[Stamp::Transformer]).fragment.to_module();
        module
            .ports
            .insert("bus".to_string(), Port { bits: vec![0, 1], direction: Direction::Input });
        let violations = validate_document(&Document::single("tests", module), Some(4));
        assert_eq!(
            violations,
            vec![SchemaViolation::BadBitWidth {
                owner: "bus".to_string(),
                label: "bits".to_string(),
                len: 2,
            }]
        );
    }

    #[test]
    fn test_rails_shorted_inside_stamp() {
        let violations = validate(&compose(&[MiswiredTransistor]));
        assert_eq!(
            violations,
            vec![SchemaViolation::ShortedNet {
                stamp: "q_npn".to_string(),
                bit: 1,
                claimants: vec!["vcc1".to_string(), "vee1".to_string(), "q_npn.C".to_string()],
            }]
        );
    }

    #[test]
    fn test_ports_shorted_inside_stamp() {
        let boxed: Vec<Box<dyn StampBuilder>> = vec![
            Box::new(Stamp::Vertical(TwoTerminal::Inductor)),
            Box::new(PortsShorted),
        ];
        let violations = validate(&compose(&boxed));
        assert_eq!(
            violations,
            vec![SchemaViolation::ShortedNet {
                stamp: "r_h".to_string(),
                bit: 2,
                claimants: vec!["in2".to_string(), "out2".to_string(), "r_h.A".to_string()],
            }]
        );
    }

    #[test]
    fn test_cell_shorted_to_itself() {
        struct Tied;

        impl StampBuilder for Tied {
            fn width(&self) -> usize {
                2
            }

            fn name(&self) -> String {
                "tied".to_string()
            }

            fn build(&self, offset: usize) -> Fragment {
                Fragment::cell(
                    "q_npn",
                    Cell::new("q_npn")
                        .with_pin(PortLabel::B, Direction::Input, offset)
                        .with_pin(PortLabel::C, Direction::Input, offset)
                        .with_pin(PortLabel::E, Direction::Output, offset + 1),
                )
            }
        }

        let violations = validate(&compose(&[Tied]));
        assert_eq!(
            violations,
            vec![SchemaViolation::ShortedNet {
                stamp: "tied".to_string(),
                bit: 0,
                claimants: vec!["q_npn.B".to_string(), "q_npn.C".to_string()],
            }]
        );
    }

    #[test]
    fn test_unused_bit_and_floating_rail() {
        struct Sparse;

        impl StampBuilder for Sparse {
            fn width(&self) -> usize {
                4
            }

            fn name(&self) -> String {
                "sparse".to_string()
            }

            fn build(&self, offset: usize) -> Fragment {
                templates::two_terminal(TwoTerminal::Capacitor, Orientation::Vertical, offset)
                    .merge(templates::ground(offset + 2))
            }
        }

        let violations = validate(&compose(&[Sparse]));
        assert_eq!(
            violations,
            vec![
                SchemaViolation::UnusedBit {
                    stamp: "sparse".to_string(),
                    bit: 3,
                },
                SchemaViolation::FloatingAttachment {
                    owner: "gnd2".to_string(),
                    bit: 2,
                    stamp: "sparse".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_label_is_reported() {
        struct Doubled;

        impl StampBuilder for Doubled {
            fn width(&self) -> usize {
                2
            }

            fn name(&self) -> String {
                "doubled".to_string()
            }

            fn build(&self, offset: usize) -> Fragment {
                Fragment::cell(
                    "r_v",
                    Cell::new("r_v")
                        .with_pin(PortLabel::A, Direction::Input, offset)
                        .with_pin(PortLabel::A, Direction::Output, offset + 1),
                )
            }
        }

        let composition = compose(&[Doubled]);
        // The wire record keeps only one of the two pins.
        assert_eq!(composition.fragment.to_module().cells["r_v"].connections.len(), 1);
        assert_eq!(
            validate(&composition),
            vec![SchemaViolation::DuplicateLabel {
                cell: "r_v".to_string(),
                label: "A".to_string(),
            }]
        );
    }
}
