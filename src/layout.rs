//! Boundary with the external layout engine.
//!
//! Positions are never computed here. [`LayoutRequest`] describes the graph
//! the engine should lay out, and [`LayoutHint`] reads back what it produced
//! (ELK JSON: a root with positioned `children`).

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::GraphConfig;
use crate::ir::{Graph, Position, Size};

/// A positioned node as reported by the layout engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Deserialize)]
struct LayoutResult {
    #[serde(default)]
    children: Vec<LayoutNode>,
}

/// Read-only lookup of layout results by node id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutHint {
    nodes: HashMap<String, LayoutNode>,
}

impl LayoutHint {
    pub fn new(nodes: impl IntoIterator<Item = LayoutNode>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
        }
    }

    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        let result: LayoutResult = serde_json::from_str(input)?;
        Ok(Self::new(result.children))
    }

    /// Hint that keeps every node of a previous graph where it was.
    pub fn from_graph(graph: &Graph) -> Self {
        Self::new(graph.nodes.iter().map(|n| LayoutNode {
            id: n.id.clone(),
            x: Some(n.position.x),
            y: Some(n.position.y),
            width: n.size.map(|s| s.width),
            height: n.size.map(|s| s.height),
        }))
    }

    /// Each coordinate the engine did not report falls back to `default`.
    pub fn position(&self, id: &str, default: Position) -> Position {
        match self.nodes.get(id) {
            Some(node) => Position {
                x: node.x.unwrap_or(default.x),
                y: node.y.unwrap_or(default.y),
            },
            None => default,
        }
    }

    pub fn size(&self, id: &str) -> Option<Size> {
        let node = self.nodes.get(id)?;
        Some(Size {
            width: node.width?,
            height: node.height?,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Input graph for the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub id: String,
    pub layout_options: IndexMap<String, String>,
    pub children: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

impl LayoutRequest {
    /// Nodes keep a size already known to the graph; the rest are estimated
    /// from their text.
    pub fn from_graph(graph: &Graph, config: &GraphConfig) -> Self {
        let children = graph
            .nodes
            .iter()
            .map(|node| {
                let size = node
                    .size
                    .unwrap_or_else(|| config.metrics.node_size(node));
                LayoutNode {
                    id: node.id.clone(),
                    x: None,
                    y: None,
                    width: Some(size.width),
                    height: Some(size.height),
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| LayoutEdge {
                id: edge.id.clone(),
                sources: vec![edge.source.clone()],
                targets: vec![edge.target.clone()],
            })
            .collect();

        Self {
            id: "root".to_string(),
            layout_options: config.layout_options.clone(),
            children,
            edges,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
