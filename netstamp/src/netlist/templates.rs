//! Port and cell templates.
//!
//! Each template maps a starting bit offset to a one-entry [`Fragment`] and
//! occupies the `*_WIDTH` bits that follow it. Templates never look at
//! anything but their offset, so two calls with the same offset return equal
//! fragments.

use super::component::{Orientation, Polarity, Rail, TwoTerminal, OPAMP_TYPE, TRANSFORMER_TYPE};
use super::schema::{Cell, Direction, Fragment, Port, PortLabel};

pub const TERMINAL_WIDTH: usize = 1;
pub const PORT_WIDTH: usize = 1;
pub const TWO_TERMINAL_WIDTH: usize = 2;
pub const TRANSISTOR_WIDTH: usize = 3;
pub const OPAMP_WIDTH: usize = 5;
pub const TRANSFORMER_WIDTH: usize = 4;

/// Single-pin rail cell, named `<tag><offset>`.
pub fn terminal(rail: Rail, offset: usize) -> Fragment {
    let tag = rail.type_tag();
    Fragment::cell(
        format!("{}{}", tag, offset),
        Cell::new(tag).with_pin(PortLabel::A, rail.direction(), offset),
    )
}

pub fn supply(offset: usize) -> Fragment {
    terminal(Rail::Supply, offset)
}

pub fn negative_supply(offset: usize) -> Fragment {
    terminal(Rail::NegativeSupply, offset)
}

pub fn ground(offset: usize) -> Fragment {
    terminal(Rail::Ground, offset)
}

/// Module input port `in<offset>`.
pub fn input(offset: usize) -> Fragment {
    Fragment::port(format!("in{}", offset), Port::new(Direction::Input, offset))
}

/// Module output port `out<offset>`.
pub fn output(offset: usize) -> Fragment {
    Fragment::port(format!("out{}", offset), Port::new(Direction::Output, offset))
}

/// Two-terminal part: first label input at `offset`, second output at `offset + 1`.
pub fn two_terminal(part: TwoTerminal, orientation: Orientation, offset: usize) -> Fragment {
    let tag = part.type_tag(orientation);
    let (first, second) = part.labeling().labels();
    let cell = Cell::new(tag.clone())
        .with_pin(first, Direction::Input, offset)
        .with_pin(second, Direction::Output, offset + 1);
    Fragment::cell(tag, cell)
}

/// Bipolar transistor: base, collector, emitter.
pub fn transistor(polarity: Polarity, offset: usize) -> Fragment {
    let tag = polarity.type_tag();
    let cell = Cell::new(tag)
        .with_pin(PortLabel::B, Direction::Input, offset)
        .with_pin(PortLabel::C, Direction::Input, offset + 1)
        .with_pin(PortLabel::E, Direction::Output, offset + 2);
    Fragment::cell(tag, cell)
}

/// Op-amp with its supply pins.
///
/// `VEE` is declared an output; that is what the skin's symbol expects.
pub fn opamp(offset: usize) -> Fragment {
    let cell = Cell::new(OPAMP_TYPE)
        .with_pin(PortLabel::Plus, Direction::Input, offset)
        .with_pin(PortLabel::Minus, Direction::Input, offset + 1)
        .with_pin(PortLabel::Out, Direction::Output, offset + 2)
        .with_pin(PortLabel::Vcc, Direction::Input, offset + 3)
        .with_pin(PortLabel::Vee, Direction::Output, offset + 4);
    Fragment::cell(OPAMP_TYPE, cell)
}

/// One-primary, one-secondary transformer.
pub fn transformer(offset: usize) -> Fragment {
    let cell = Cell::new(TRANSFORMER_TYPE)
        .with_pin(PortLabel::Primary1, Direction::Input, offset)
        .with_pin(PortLabel::Primary2, Direction::Input, offset + 1)
        .with_pin(PortLabel::Secondary1, Direction::Output, offset + 2)
        .with_pin(PortLabel::Secondary2, Direction::Output, offset + 3);
    Fragment::cell(TRANSFORMER_TYPE, cell)
}
