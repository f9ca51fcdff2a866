//! Netlist Data Types
//!
//! Typed building blocks (ports, pins, cells, fragments) and the wire-format
//! records they are rendered into. All maps are `BTreeMap` so that every
//! level of the serialized document comes out with its keys sorted.
//!
//! Struct fields that are serialized directly are declared in alphabetical
//! order; serde emits fields in declaration order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Direction of a port or cell terminal as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// Terminal label on a cell.
///
/// The set is closed: every label the analog skin knows about has a variant
/// here, and the wire key is produced by [`PortLabel::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortLabel {
    A,
    B,
    C,
    E,
    Plus,
    Minus,
    Out,
    Vcc,
    Vee,
    Primary1,
    Primary2,
    Secondary1,
    Secondary2,
}

impl PortLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            PortLabel::A => "A",
            PortLabel::B => "B",
            PortLabel::C => "C",
            PortLabel::E => "E",
            PortLabel::Plus => "+",
            PortLabel::Minus => "-",
            PortLabel::Out => "OUT",
            PortLabel::Vcc => "VCC",
            PortLabel::Vee => "VEE",
            PortLabel::Primary1 => "L1.1",
            PortLabel::Primary2 => "L1.2",
            PortLabel::Secondary1 => "L2.1",
            PortLabel::Secondary2 => "L2.2",
        }
    }
}

impl fmt::Display for PortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A module-level external terminal.
///
/// This is already the wire shape (`{"bits": [..], "direction": ..}`); the
/// port name lives in the enclosing map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub bits: Vec<usize>,
    pub direction: Direction,
}

impl Port {
    pub fn new(direction: Direction, bit: usize) -> Self {
        Self {
            bits: vec![bit],
            direction,
        }
    }
}

/// One labeled terminal of a cell and the bit it connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub label: PortLabel,
    pub direction: Direction,
    pub bit: usize,
}

impl Pin {
    pub fn new(label: PortLabel, direction: Direction, bit: usize) -> Self {
        Self {
            label,
            direction,
            bit,
        }
    }
}

/// An instantiated component.
///
/// Directions and connections come from the same pin list, so the two wire
/// maps always share a key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub cell_type: String,
    pub pins: Vec<Pin>,
}

impl Cell {
    pub fn new(cell_type: impl Into<String>) -> Self {
        Self {
            cell_type: cell_type.into(),
            pins: Vec::new(),
        }
    }

    pub fn with_pin(mut self, label: PortLabel, direction: Direction, bit: usize) -> Self {
        self.pins.push(Pin::new(label, direction, bit));
        self
    }

    /// Look up the bit a label is connected to.
    pub fn bit(&self, label: PortLabel) -> Option<usize> {
        self.pins.iter().find(|p| p.label == label).map(|p| p.bit)
    }

    pub fn bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.pins.iter().map(|p| p.bit)
    }

    pub fn to_record(&self) -> CellRecord {
        let mut record = CellRecord {
            connections: BTreeMap::new(),
            port_directions: BTreeMap::new(),
            cell_type: self.cell_type.clone(),
        };
        for pin in &self.pins {
            record
                .connections
                .insert(pin.label.as_str().to_string(), vec![pin.bit]);
            record
                .port_directions
                .insert(pin.label.as_str().to_string(), pin.direction);
        }
        record
    }
}

/// A piece of netlist: named ports and named cells.
///
/// Templates return one-entry fragments, stamps return the union of their
/// templates, and the composer folds stamps into one aggregate fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub ports: BTreeMap<String, Port>,
    pub cells: BTreeMap<String, Cell>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(name: impl Into<String>, port: Port) -> Self {
        let mut fragment = Self::new();
        fragment.ports.insert(name.into(), port);
        fragment
    }

    pub fn cell(name: impl Into<String>, cell: Cell) -> Self {
        let mut fragment = Self::new();
        fragment.cells.insert(name.into(), cell);
        fragment
    }

    /// Union two fragments. Entries of `other` replace same-named entries.
    pub fn merge(mut self, other: Fragment) -> Self {
        self.ports.extend(other.ports);
        self.cells.extend(other.cells);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty() && self.cells.is_empty()
    }

    /// Every bit claimed by a port or a cell terminal, with the claimant's name.
    pub fn claims(&self) -> Vec<(&str, usize)> {
        let ports = self
            .ports
            .iter()
            .flat_map(|(name, port)| port.bits.iter().map(move |&b| (name.as_str(), b)));
        let cells = self
            .cells
            .iter()
            .flat_map(|(name, cell)| cell.bits().map(move |b| (name.as_str(), b)));
        ports.chain(cells).collect()
    }

    pub fn to_module(&self) -> Module {
        Module {
            cells: self
                .cells
                .iter()
                .map(|(name, cell)| (name.clone(), cell.to_record()))
                .collect(),
            ports: self.ports.clone(),
        }
    }
}

/// Wire form of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub connections: BTreeMap<String, Vec<usize>>,
    pub port_directions: BTreeMap<String, Direction>,
    #[serde(rename = "type")]
    pub cell_type: String,
}

/// Wire form of a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub cells: BTreeMap<String, CellRecord>,
    pub ports: BTreeMap<String, Port>,
}

/// Top-level document handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub modules: BTreeMap<String, Module>,
}

impl Document {
    /// Wrap a single module under `name`.
    pub fn single(name: impl Into<String>, module: Module) -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(name.into(), module);
        Self { modules }
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }
}
