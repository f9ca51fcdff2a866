//! Component catalog
//!
//! Every component the analog skin can draw, with the type tag and terminal
//! labels the skin expects. A wrong tag or label here is not caught by the
//! renderer: it silently draws a generic box or drops the wire.

use super::schema::{Direction, PortLabel};
use std::fmt;

/// Drawing orientation for two-terminal parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    fn suffix(self) -> &'static str {
        match self {
            Orientation::Vertical => "_v",
            Orientation::Horizontal => "_h",
        }
    }
}

/// Power-rail terminal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rail {
    /// Positive supply (`vcc`), drives the net.
    Supply,
    /// Negative supply (`vee`).
    NegativeSupply,
    /// Ground (`gnd`).
    Ground,
}

impl Rail {
    pub fn type_tag(self) -> &'static str {
        match self {
            Rail::Supply => "vcc",
            Rail::NegativeSupply => "vee",
            Rail::Ground => "gnd",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Rail::Supply => Direction::Output,
            Rail::NegativeSupply | Rail::Ground => Direction::Input,
        }
    }
}

/// Terminal labeling family of a two-terminal part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Labeling {
    /// `A` / `B` (passives, crystal)
    AB,
    /// `+` / `-` (sources, diodes)
    PlusMinus,
}

impl Labeling {
    pub fn labels(self) -> (PortLabel, PortLabel) {
        match self {
            Labeling::AB => (PortLabel::A, PortLabel::B),
            Labeling::PlusMinus => (PortLabel::Plus, PortLabel::Minus),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoTerminal {
    Resistor,
    Inductor,
    Capacitor,
    VoltageSource,
    CurrentSource,
    Diode,
    Schottky,
    Led,
    Crystal,
}

impl TwoTerminal {
    pub const ALL: [TwoTerminal; 9] = [
        TwoTerminal::Resistor,
        TwoTerminal::Inductor,
        TwoTerminal::Capacitor,
        TwoTerminal::VoltageSource,
        TwoTerminal::CurrentSource,
        TwoTerminal::Diode,
        TwoTerminal::Schottky,
        TwoTerminal::Led,
        TwoTerminal::Crystal,
    ];

    pub fn labeling(self) -> Labeling {
        match self {
            TwoTerminal::Resistor
            | TwoTerminal::Inductor
            | TwoTerminal::Capacitor
            | TwoTerminal::Crystal => Labeling::AB,
            TwoTerminal::VoltageSource
            | TwoTerminal::CurrentSource
            | TwoTerminal::Diode
            | TwoTerminal::Schottky
            | TwoTerminal::Led => Labeling::PlusMinus,
        }
    }

    fn base_tag(self) -> &'static str {
        match self {
            TwoTerminal::Resistor => "r",
            TwoTerminal::Inductor => "l",
            TwoTerminal::Capacitor => "c",
            TwoTerminal::VoltageSource => "v",
            TwoTerminal::CurrentSource => "i",
            TwoTerminal::Diode => "d",
            TwoTerminal::Schottky => "d_sk",
            TwoTerminal::Led => "d_led",
            TwoTerminal::Crystal => "xtal",
        }
    }

    /// Sources and the crystal have a single symbol regardless of orientation.
    pub fn is_oriented(self) -> bool {
        !matches!(
            self,
            TwoTerminal::VoltageSource | TwoTerminal::CurrentSource | TwoTerminal::Crystal
        )
    }

    pub fn type_tag(self, orientation: Orientation) -> String {
        if self.is_oriented() {
            format!("{}{}", self.base_tag(), orientation.suffix())
        } else {
            self.base_tag().to_string()
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TwoTerminal::Resistor => "resistor",
            TwoTerminal::Inductor => "inductor",
            TwoTerminal::Capacitor => "capacitor",
            TwoTerminal::VoltageSource => "voltage source",
            TwoTerminal::CurrentSource => "current source",
            TwoTerminal::Diode => "diode",
            TwoTerminal::Schottky => "schottky diode",
            TwoTerminal::Led => "LED",
            TwoTerminal::Crystal => "crystal",
        }
    }
}

impl fmt::Display for TwoTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bipolar transistor polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Npn,
    Pnp,
}

impl Polarity {
    pub fn type_tag(self) -> &'static str {
        match self {
            Polarity::Npn => "q_npn",
            Polarity::Pnp => "q_pnp",
        }
    }
}

pub const OPAMP_TYPE: &str = "op";
pub const TRANSFORMER_TYPE: &str = "transformer_1p_1s";
