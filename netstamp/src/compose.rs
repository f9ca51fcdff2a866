//! Composer
//!
//! Folds an ordered list of stamp builders into one aggregate fragment. The
//! only state is the bit cursor, which is threaded from one placement to the
//! next; each builder gets exclusive use of the range it is handed.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::netlist::{BitRange, Fragment};
use crate::stamps::StampBuilder;

/// Where one stamp landed and which entries it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StampSpan {
    pub name: String,
    pub range: BitRange,
    /// Port names as stored in the aggregate (after any renaming).
    pub ports: Vec<String>,
    /// Cell names as stored in the aggregate (after any renaming).
    pub cells: Vec<String>,
}

/// Output of a composition run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub fragment: Fragment,
    /// Final cursor: one past the last bit handed out.
    pub offset: usize,
    pub spans: Vec<StampSpan>,
}

impl Composition {
    pub fn stamp_count(&self) -> usize {
        self.spans.len()
    }

    /// Find the stamp that contributed the named port or cell.
    pub fn owner_of(&self, entry: &str) -> Option<&StampSpan> {
        self.spans
            .iter()
            .find(|s| s.ports.iter().any(|p| p == entry) || s.cells.iter().any(|c| c == entry))
    }
}

/// Compose `builders` starting from bit 0.
pub fn compose<B: StampBuilder>(builders: &[B]) -> Composition {
    compose_from(0, builders)
}

/// Compose `builders` starting from an arbitrary cursor.
pub fn compose_from<B: StampBuilder>(start: usize, builders: &[B]) -> Composition {
    builders.iter().fold(
        Composition {
            offset: start,
            ..Composition::default()
        },
        |mut acc, builder| {
            let placement = builder.place(acc.offset);
            let name = builder.name();
            tracing::debug!("Placed stamp {} at {}", name, placement.range);

            let start = placement.range.start;
            let ports = merge_unique(&mut acc.fragment.ports, placement.fragment.ports, start);
            let cells = merge_unique(&mut acc.fragment.cells, placement.fragment.cells, start);

            acc.spans.push(StampSpan {
                name,
                range: placement.range,
                ports,
                cells,
            });
            acc.offset = placement.range.end;
            acc
        },
    )
}

/// Insert every entry of `incoming`, renaming on collision.
///
/// Rails and ports embed their bit in the name, so in practice only component
/// cells placed twice collide; the later one becomes `<name><start>`.
fn merge_unique<V>(
    target: &mut BTreeMap<String, V>,
    incoming: BTreeMap<String, V>,
    start: usize,
) -> Vec<String> {
    let mut names = Vec::with_capacity(incoming.len());
    for (name, value) in incoming {
        let name = if target.contains_key(&name) {
            let mut renamed = format!("{}{}", name, start);
            let mut n = 1;
            while target.contains_key(&renamed) {
                renamed = format!("{}{}_{}", name, start, n);
                n += 1;
            }
            tracing::debug!("Renamed {} to {} to keep names unique", name, renamed);
            renamed
        } else {
            name
        };
        target.insert(name.clone(), value);
        names.push(name);
    }
    names
}
