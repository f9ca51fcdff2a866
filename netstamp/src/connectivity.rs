//! Connectivity Graph
//!
//! Graph view of an assembled fragment using petgraph. Ports and cells are
//! terminal nodes, every bit is a net node, and an edge joins a terminal to
//! each bit it touches. This makes net sharing explicit:
//! - which terminals sit on a given net
//! - how many isolated groups the fixture contains
//!
//! Stamps are meant to be independent, so a well-formed fixture has exactly
//! one connected group per stamp.

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::compose::Composition;
use crate::netlist::Fragment;

/// Node in the connectivity graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NetNode {
    /// A module port, by name.
    Port(String),
    /// A cell, by name.
    Cell(String),
    /// A net, by bit index.
    Net(usize),
}

/// Edge label: the cell terminal (or `bits` for a port) that touches the net.
pub type NetEdge = String;

#[derive(Debug, Clone)]
pub struct Connectivity {
    graph: UnGraph<NetNode, NetEdge>,
    net_indices: HashMap<usize, NodeIndex>,
}

impl Connectivity {
    pub fn from_fragment(fragment: &Fragment) -> Self {
        let mut connectivity = Self {
            graph: UnGraph::new_undirected(),
            net_indices: HashMap::new(),
        };

        for (name, port) in &fragment.ports {
            let node = connectivity.graph.add_node(NetNode::Port(name.clone()));
            for &bit in &port.bits {
                let net = connectivity.net(bit);
                connectivity.graph.add_edge(node, net, "bits".to_string());
            }
        }

        for (name, cell) in &fragment.cells {
            let node = connectivity.graph.add_node(NetNode::Cell(name.clone()));
            for pin in &cell.pins {
                let net = connectivity.net(pin.bit);
                connectivity
                    .graph
                    .add_edge(node, net, pin.label.as_str().to_string());
            }
        }

        connectivity
    }

    fn net(&mut self, bit: usize) -> NodeIndex {
        if let Some(&idx) = self.net_indices.get(&bit) {
            return idx;
        }
        let idx = self.graph.add_node(NetNode::Net(bit));
        self.net_indices.insert(bit, idx);
        idx
    }

    pub fn net_count(&self) -> usize {
        self.net_indices.len()
    }

    /// Number of isolated groups of terminals.
    pub fn group_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Terminals on a net as `(owner, label)`, sorted.
    pub fn terminals_on(&self, bit: usize) -> Vec<(String, String)> {
        let Some(&net) = self.net_indices.get(&bit) else {
            return Vec::new();
        };

        let mut terminals: Vec<(String, String)> = self
            .graph
            .neighbors(net)
            .filter_map(|node| {
                let label = self
                    .graph
                    .find_edge(node, net)
                    .and_then(|e| self.graph.edge_weight(e))?;
                match &self.graph[node] {
                    NetNode::Port(name) | NetNode::Cell(name) => {
                        Some((name.clone(), label.clone()))
                    }
                    NetNode::Net(_) => None,
                }
            })
            .collect();
        terminals.sort();
        terminals
    }

    /// Nets with more than one terminal, i.e. the intentionally shared bits.
    pub fn shared_nets(&self) -> BTreeMap<usize, Vec<(String, String)>> {
        self.net_indices
            .keys()
            .filter_map(|&bit| {
                let terminals = self.terminals_on(bit);
                (terminals.len() > 1).then_some((bit, terminals))
            })
            .collect()
    }

    pub fn stats(&self) -> ConnectivityStats {
        ConnectivityStats {
            terminal_count: self.graph.node_count() - self.net_count(),
            net_count: self.net_count(),
            connection_count: self.graph.edge_count(),
            group_count: self.group_count(),
        }
    }
}

/// Summary numbers for a connectivity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectivityStats {
    pub terminal_count: usize,
    pub net_count: usize,
    pub connection_count: usize,
    pub group_count: usize,
}

/// True when every stamp of the composition is its own isolated group.
pub fn stamps_are_isolated(composition: &Composition) -> bool {
    let connectivity = Connectivity::from_fragment(&composition.fragment);
    let groups = connectivity.group_count();
    if groups != composition.stamp_count() {
        tracing::warn!(
            "Expected {} isolated stamps, found {} connected groups",
            composition.stamp_count(),
            groups
        );
        return false;
    }
    true
}
