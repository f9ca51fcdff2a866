//! Stamp builders
//!
//! A stamp is one self-contained test unit: a component cell plus the rails
//! or module ports needed to draw it. Every stamp occupies a fixed number of
//! bits starting at the offset it is given, and everything it produces lives
//! inside that range.
//!
//! Rails and module ports are not given bits of their own. They sit on the
//! same bit as the component terminal they drive, which is what makes them
//! the same net in the rendered schematic:
//!
//! | stamp       | ports                       | cells                                  | width |
//! |-------------|-----------------------------|----------------------------------------|-------|
//! | vertical    | -                           | `vcc(o)`, part(o, o+1), `gnd(o+1)`     | 2     |
//! | horizontal  | `in(o)`, `out(o+1)`         | part(o, o+1)                           | 2     |
//! | transistor  | `in(o)`                     | `vcc(o+1)`, q(o..o+2), `vee(o+2)`      | 3     |
//! | op-amp      | `in(o)`, `in(o+1)`, `out(o+2)` | `vcc(o+3)`, op(o..o+4), `vee(o+4)`  | 5     |
//! | transformer | `in(o)`, `in(o+1)`, `out(o+2)`, `out(o+3)` | transformer(o..o+3)     | 4     |

use std::fmt;

use crate::netlist::templates::{self, OPAMP_WIDTH, TRANSFORMER_WIDTH, TRANSISTOR_WIDTH, TWO_TERMINAL_WIDTH};
use crate::netlist::{allocate, BitRange, Fragment, Orientation, Polarity, TwoTerminal};

/// Anything that can be placed by the composer.
///
/// Implementors must keep every bit they produce inside
/// `[offset, offset + width())`.
pub trait StampBuilder {
    /// Number of consecutive bits the stamp occupies.
    fn width(&self) -> usize;

    /// Short name used in logs, reports and `--only` filters.
    fn name(&self) -> String;

    /// Build the stamp's ports and cells starting at `offset`.
    fn build(&self, offset: usize) -> Fragment;

    /// Build at `offset` and report the range consumed.
    fn place(&self, offset: usize) -> Placement {
        Placement {
            fragment: self.build(offset),
            range: allocate(offset, self.width()),
        }
    }
}

impl<T: StampBuilder + ?Sized> StampBuilder for Box<T> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn name(&self) -> String {
        (**self).name()
    }

    fn build(&self, offset: usize) -> Fragment {
        (**self).build(offset)
    }
}

/// Result of placing one stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub fragment: Fragment,
    pub range: BitRange,
}

impl Placement {
    /// The cursor the next stamp starts at.
    pub fn next_offset(&self) -> usize {
        self.range.end
    }
}

/// Layout of a stamp, independent of the component it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Vertical,
    Horizontal,
    Transistor,
    OpAmp,
    Transformer,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Vertical => write!(f, "vertical"),
            Shape::Horizontal => write!(f, "horizontal"),
            Shape::Transistor => write!(f, "transistor"),
            Shape::OpAmp => write!(f, "op-amp"),
            Shape::Transformer => write!(f, "transformer"),
        }
    }
}

/// The fixed catalog of stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stamp {
    /// Supply above, ground below, no module ports.
    Vertical(TwoTerminal),
    /// Input port on the left, output port on the right.
    Horizontal(TwoTerminal),
    /// Base driven from an input port, collector on supply, emitter on negative supply.
    Transistor(Polarity),
    OpAmp,
    Transformer,
}

impl Stamp {
    pub fn shape(&self) -> Shape {
        match self {
            Stamp::Vertical(_) => Shape::Vertical,
            Stamp::Horizontal(_) => Shape::Horizontal,
            Stamp::Transistor(_) => Shape::Transistor,
            Stamp::OpAmp => Shape::OpAmp,
            Stamp::Transformer => Shape::Transformer,
        }
    }

    /// Renderer type tag of the stamp's component cell.
    pub fn type_tag(&self) -> String {
        match self {
            Stamp::Vertical(part) => part.type_tag(Orientation::Vertical),
            Stamp::Horizontal(part) => part.type_tag(Orientation::Horizontal),
            Stamp::Transistor(polarity) => polarity.type_tag().to_string(),
            Stamp::OpAmp => crate::netlist::component::OPAMP_TYPE.to_string(),
            Stamp::Transformer => crate::netlist::component::TRANSFORMER_TYPE.to_string(),
        }
    }

    /// Human-readable description, e.g. "vertical resistor".
    pub fn describe(&self) -> String {
        match self {
            Stamp::Vertical(part) | Stamp::Horizontal(part) => {
                format!("{} {}", self.shape(), part)
            }
            Stamp::Transistor(Polarity::Npn) => "NPN transistor".to_string(),
            Stamp::Transistor(Polarity::Pnp) => "PNP transistor".to_string(),
            Stamp::OpAmp => "op-amp".to_string(),
            Stamp::Transformer => "transformer".to_string(),
        }
    }
}

impl StampBuilder for Stamp {
    fn width(&self) -> usize {
        match self {
            Stamp::Vertical(_) | Stamp::Horizontal(_) => TWO_TERMINAL_WIDTH,
            Stamp::Transistor(_) => TRANSISTOR_WIDTH,
            Stamp::OpAmp => OPAMP_WIDTH,
            Stamp::Transformer => TRANSFORMER_WIDTH,
        }
    }

    fn name(&self) -> String {
        self.type_tag()
    }

    fn build(&self, offset: usize) -> Fragment {
        match *self {
            Stamp::Vertical(part) => vertical(part, offset),
            Stamp::Horizontal(part) => horizontal(part, offset),
            Stamp::Transistor(polarity) => transistor(polarity, offset),
            Stamp::OpAmp => opamp(offset),
            Stamp::Transformer => transformer(offset),
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_tag())
    }
}

fn vertical(part: TwoTerminal, offset: usize) -> Fragment {
    templates::supply(offset)
        .merge(templates::two_terminal(part, Orientation::Vertical, offset))
        .merge(templates::ground(offset + 1))
}

fn horizontal(part: TwoTerminal, offset: usize) -> Fragment {
    templates::input(offset)
        .merge(templates::output(offset + 1))
        .merge(templates::two_terminal(part, Orientation::Horizontal, offset))
}

fn transistor(polarity: Polarity, offset: usize) -> Fragment {
    templates::input(offset)
        .merge(templates::supply(offset + 1))
        .merge(templates::transistor(polarity, offset))
        .merge(templates::negative_supply(offset + 2))
}

fn opamp(offset: usize) -> Fragment {
    templates::input(offset)
        .merge(templates::input(offset + 1))
        .merge(templates::output(offset + 2))
        .merge(templates::supply(offset + 3))
        .merge(templates::opamp(offset))
        .merge(templates::negative_supply(offset + 4))
}

fn transformer(offset: usize) -> Fragment {
    templates::input(offset)
        .merge(templates::input(offset + 1))
        .merge(templates::output(offset + 2))
        .merge(templates::output(offset + 3))
        .merge(templates::transformer(offset))
}
