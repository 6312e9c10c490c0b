//! SKG Graph - Transient graph construction and rendering
//!
//! Two graph shapes are built from accumulated extraction output, used
//! only for rendering and discarded afterwards:
//!
//! - [`RelationGraph`]: directed, one node per relationship endpoint
//!   string, edges added unconditionally (may contain non-entity nodes).
//! - [`EntityGraph`]: undirected, nodes are recognized entity texts; an
//!   edge is added only when both relationship endpoints are entity nodes.
//!
//! Rendering is Graphviz DOT via `petgraph::dot`, written to files so
//! headless and test environments need no display.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use skg_core::{Entity, Relationship};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while building or rendering graphs
#[derive(Error, Debug)]
pub enum GraphError {
    /// The configured focus node never appeared in the relation graph
    #[error("Focus node '{0}' not found in relation graph")]
    FocusNodeMissing(String),

    /// A DOT file could not be written
    #[error("Failed to write graph file {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;

// ============================================================================
// Relation Graph
// ============================================================================

/// Directed graph over raw relationship endpoints
#[derive(Debug)]
pub struct RelationGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl RelationGraph {
    /// Build a directed graph with one edge per relationship
    ///
    /// Endpoints become nodes whether or not they were recognized as
    /// entities.
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        for relationship in relationships {
            let subject = Self::intern(&mut graph, &mut nodes, &relationship.subject);
            let head = Self::intern(&mut graph, &mut nodes, &relationship.head);
            graph.add_edge(subject, head, ());
        }

        Self { graph, nodes }
    }

    fn intern(
        graph: &mut DiGraph<String, ()>,
        nodes: &mut HashMap<String, NodeIndex>,
        text: &str,
    ) -> NodeIndex {
        if let Some(&index) = nodes.get(text) {
            return index;
        }
        let index = graph.add_node(text.to_string());
        nodes.insert(text.to_string(), index);
        index
    }

    /// The subgraph induced by the focus node and its direct successors
    ///
    /// Keeps every edge whose endpoints both lie in that node set, so
    /// successor-to-successor and successor-to-focus edges survive. Fails
    /// when the focus node is absent; callers treat that as a fatal
    /// condition and abort the run.
    pub fn neighborhood(&self, focus: &str) -> Result<RelationGraph> {
        let &focus_index = self
            .nodes
            .get(focus)
            .ok_or_else(|| GraphError::FocusNodeMissing(focus.to_string()))?;

        let mut keep: HashSet<NodeIndex> = self.graph.neighbors(focus_index).collect();
        keep.insert(focus_index);

        let mut graph = DiGraph::new();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        for &index in &keep {
            Self::intern(&mut graph, &mut nodes, &self.graph[index]);
        }
        for edge in self.graph.edge_references() {
            if keep.contains(&edge.source()) && keep.contains(&edge.target()) {
                let source = nodes[&self.graph[edge.source()]];
                let target = nodes[&self.graph[edge.target()]];
                graph.add_edge(source, target, ());
            }
        }

        Ok(Self { graph, nodes })
    }

    pub fn contains_node(&self, text: &str) -> bool {
        self.nodes.contains_key(text)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render as Graphviz DOT
    pub fn to_dot(&self) -> String {
        // Debug formatting: the unit edge weights have no Display impl
        format!("{:?}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    /// Write the DOT rendering to a file, replacing any existing content
    pub fn write_dot(&self, path: &Path) -> Result<()> {
        write_dot_file(path, &self.to_dot())
    }
}

// ============================================================================
// Entity Graph
// ============================================================================

/// Undirected graph over recognized entity texts
#[derive(Debug)]
pub struct EntityGraph {
    graph: UnGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl EntityGraph {
    /// Build the entity graph from the accumulated sets
    ///
    /// Every entity text becomes a node; a relationship contributes an
    /// edge only when both of its endpoints are entity nodes.
    pub fn build(entities: &HashSet<Entity>, relationships: &[Relationship]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        for entity in entities {
            if !nodes.contains_key(&entity.text) {
                let index = graph.add_node(entity.text.clone());
                nodes.insert(entity.text.clone(), index);
            }
        }

        for relationship in relationships {
            let (Some(&subject), Some(&head)) = (
                nodes.get(&relationship.subject),
                nodes.get(&relationship.head),
            ) else {
                continue;
            };
            graph.add_edge(subject, head, ());
        }

        Self { graph, nodes }
    }

    pub fn contains_node(&self, text: &str) -> bool {
        self.nodes.contains_key(text)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render as Graphviz DOT
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    /// Write the DOT rendering to a file, replacing any existing content
    pub fn write_dot(&self, path: &Path) -> Result<()> {
        write_dot_file(path, &self.to_dot())
    }
}

fn write_dot_file(path: &Path, dot: &str) -> Result<()> {
    std::fs::write(path, dot).map_err(|source| GraphError::WriteError {
        path: path.display().to_string(),
        source,
    })
}

// ============================================================================
// Tests
// ============================================================================
