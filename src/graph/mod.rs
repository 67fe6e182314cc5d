//! Declaration dependency graph.
//!
//! Two views of how declarations use each other live here. [`branches`]
//! walks containment paths with level information and powers the recursion
//! check. This module flattens the same relationships into a petgraph
//! [`DiGraph`] for the tooling surface: DOT export, reachability questions,
//! and name suggestions. Edges here ignore whether a use is behind a
//! pointer, slice, or map, so a graph cycle is not by itself a validation
//! finding.

pub mod branches;

use std::collections::HashMap;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::Serialize;

use crate::document::DocValue;
use crate::expr::{self, GO_PRIMITIVES};
use crate::schema::Schema;

// =============================================================================
// Node and edge kinds
// =============================================================================

/// What a graph node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A root name bound to a type expression.
    Alias,
    /// A root name bound to a field group.
    Group,
    /// A basic Go type referenced by some value.
    Primitive,
    /// A referenced name with no declaration.
    Unresolved,
}

/// How one declaration uses another. Field names are not nodes; a field
/// edge starts at the declaring group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Used directly in an alias value.
    Value,
    /// Used in a group field value.
    Field,
}

/// Summary counters for reports and the graph CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub aliases: usize,
    pub groups: usize,
    pub primitives: usize,
    pub unresolved: usize,
    pub cycles: usize,
}

// =============================================================================
// DeclGraph
// =============================================================================

/// The declaration reference graph of a single schema.
pub struct DeclGraph {
    graph: DiGraph<String, EdgeKind>,
    kinds: HashMap<String, NodeKind>,
    node_indices: HashMap<String, NodeIndex>,
}

impl DeclGraph {
    /// Build the graph from a schema. Unparseable values contribute no
    /// edges; the validator owns reporting those.
    pub fn from_schema(schema: &Schema) -> Self {
        let mut builder = Self {
            graph: DiGraph::new(),
            kinds: HashMap::new(),
            node_indices: HashMap::new(),
        };

        for (name, value) in schema.declarations() {
            match value {
                DocValue::Str(_) => builder.ensure_node(name, NodeKind::Alias),
                DocValue::Mapping(_) => builder.ensure_node(name, NodeKind::Group),
                DocValue::Other => continue,
            };
        }

        for (name, value) in schema.declarations() {
            match value {
                DocValue::Str(raw) => builder.add_value_edges(name, raw, EdgeKind::Value),
                DocValue::Mapping(fields) => {
                    for field_value in fields.values() {
                        if let DocValue::Str(raw) = field_value {
                            builder.add_value_edges(name, raw, EdgeKind::Field);
                        }
                    }
                }
                DocValue::Other => {}
            }
        }

        builder
    }

    fn ensure_node(&mut self, name: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&index) = self.node_indices.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), index);
        self.kinds.insert(name.to_string(), kind);
        index
    }

    fn add_value_edges(&mut self, from: &str, raw: &str, kind: EdgeKind) {
        let Ok(parsed) = expr::parse(raw) else { return };
        let Some(&source) = self.node_indices.get(from) else {
            return;
        };

        for ident in parsed.identifiers() {
            let node_kind = if self.node_indices.contains_key(ident) {
                self.kinds[ident]
            } else if expr::is_primitive(ident) {
                NodeKind::Primitive
            } else {
                NodeKind::Unresolved
            };
            let target = self.ensure_node(ident, node_kind);
            self.graph.update_edge(source, target, kind);
        }
    }

    // ========== Queries ==========

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Kind of a node, when the name appears in the graph at all.
    pub fn kind(&self, name: &str) -> Option<NodeKind> {
        self.kinds.get(name).copied()
    }

    /// Names this declaration uses, sorted.
    pub fn references_out(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Declarations that use this name, sorted.
    pub fn references_in(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Incoming)
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        let Some(&index) = self.node_indices.get(name) else {
            return Vec::new();
        };

        let mut names: Vec<&str> = self
            .graph
            .edges_directed(index, direction)
            .filter_map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                self.graph.node_weight(other).map(|n| n.as_str())
            })
            .collect();
        names.sort_unstable();
        names
    }

    /// Reference cycles, including self loops, as sorted name groups.
    /// Containment legality is decided elsewhere; a cycle that only exists
    /// through pointers is still reported here.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut groups: Vec<Vec<String>> = petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .map(|&ix| self.graph.find_edge(ix, ix).is_some())
                        .unwrap_or(false)
            })
            .map(|component| {
                let mut names: Vec<String> = component
                    .into_iter()
                    .filter_map(|ix| self.graph.node_weight(ix).cloned())
                    .collect();
                names.sort_unstable();
                names
            })
            .collect();
        groups.sort();
        groups
    }

    pub fn stats(&self) -> GraphStats {
        let count = |kind: NodeKind| self.kinds.values().filter(|&&k| k == kind).count();
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            aliases: count(NodeKind::Alias),
            groups: count(NodeKind::Group),
            primitives: count(NodeKind::Primitive),
            unresolved: count(NodeKind::Unresolved),
            cycles: self.cycles().len(),
        }
    }

    // ========== Export ==========

    /// Render the graph in GraphViz DOT format, nodes colored by kind and
    /// sorted for stable output.
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph declarations {\n");
        output.push_str("  rankdir=LR;\n");
        output.push_str("  bgcolor=\"#1e1e1e\";\n");
        output.push_str("  node [shape=box, style=\"filled,rounded\", fontname=\"Helvetica\", fontsize=10, fontcolor=\"white\", color=\"#404040\"];\n");
        output.push_str("  edge [color=\"#808080\"];\n");
        output.push('\n');

        let mut names: Vec<&String> = self.kinds.keys().collect();
        names.sort();
        for name in &names {
            let color = match self.kinds[name.as_str()] {
                NodeKind::Alias => "#00BCD4",
                NodeKind::Group => "#FF9800",
                NodeKind::Primitive => "#607D8B",
                NodeKind::Unresolved => "#F44336",
            };
            output.push_str(&format!(
                "  \"{}\" [fillcolor=\"{}\"];\n",
                name, color
            ));
        }

        output.push('\n');

        let mut edges: Vec<(String, String)> = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.graph.node_weight(edge.source())?;
                let target = self.graph.node_weight(edge.target())?;
                Some((source.clone(), target.clone()))
            })
            .collect();
        edges.sort();
        for (source, target) in edges {
            output.push_str(&format!("  \"{}\" -> \"{}\";\n", source, target));
        }

        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Name suggestions
// =============================================================================

/// Fuzzy-rank declared names and basic types against an unknown name.
/// Backs the "did you mean" hint the validator CLI prints next to a
/// type-not-found finding.
pub fn suggestions(schema: &Schema, name: &str, limit: usize) -> Vec<String> {
    let matcher = SkimMatcherV2::default();

    let mut candidates: Vec<&str> = schema.declarations().map(|(n, _)| n).collect();
    candidates.extend(GO_PRIMITIVES.iter().copied());

    let mut scored: Vec<(i64, &str)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, name)
                .map(|score| (score, candidate))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
