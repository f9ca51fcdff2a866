pub mod component;
pub mod offset;
pub mod schema;
pub mod templates;

// Re-export for convenience
pub use component::{Labeling, Orientation, Polarity, Rail, TwoTerminal};
pub use offset::{allocate, BitRange};
pub use schema::*;
