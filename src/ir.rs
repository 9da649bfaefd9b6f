use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dmmf::FieldKind;
use crate::transform::RelationType;

/// The diagram graph handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub position: Position,
    #[serde(flatten)]
    pub size: Option<Size>,
    pub data: NodeData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Model,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Model(ModelData),
    Enum(EnumData),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelData {
    pub name: String,
    pub db_name: Option<String>,
    pub documentation: Option<String>,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumData {
    pub name: String,
    pub db_name: Option<String>,
    pub documentation: Option<String>,
    pub values: Vec<String>,
}

/// One display row of a model node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    pub kind: FieldKind,
    pub documentation: Option<String>,
    pub is_list: bool,
    pub is_required: bool,
    pub relation_name: Option<String>,
    pub relation_from_fields: Vec<String>,
    pub relation_to_fields: Vec<String>,
    pub relation_type: Option<RelationType>,
    pub display_type: String,
    #[serde(rename = "type")]
    pub typ: Option<String>,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Enum-to-column connector.
    Smoothstep,
    Relation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub relation_type: RelationType,
}

impl Node {
    pub fn name(&self) -> &str {
        match &self.data {
            NodeData::Model(model) => &model.name,
            NodeData::Enum(e) => &e.name,
        }
    }

    /// Connection points the renderer exposes on this node.
    pub fn handles(&self) -> Vec<String> {
        match &self.data {
            NodeData::Enum(_) => vec![self.id.clone()],
            NodeData::Model(model) => {
                let mut handles = Vec::new();
                for col in &model.columns {
                    if let Some(relation) = &col.relation_name {
                        handles.push(format!("{}-{}", self.id, relation));
                        handles.push(format!("{}-{}-{}", self.id, relation, col.name));
                    } else if col.kind == FieldKind::Enum {
                        handles.push(format!("{}-{}", self.id, col.name));
                    }
                }
                handles
            }
        }
    }
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Ids of edges whose endpoints or handles do not exist on the graph.
    pub fn dangling_edges(&self) -> Vec<&str> {
        let handles: HashSet<(&str, String)> = self
            .nodes
            .iter()
            .flat_map(|n| n.handles().into_iter().map(move |h| (n.id.as_str(), h)))
            .collect();

        self.edges
            .iter()
            .filter(|e| {
                !handles.contains(&(e.source.as_str(), e.source_handle.clone()))
                    || !handles.contains(&(e.target.as_str(), e.target_handle.clone()))
            })
            .map(|e| e.id.as_str())
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
