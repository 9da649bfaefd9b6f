//! Enum and relation edges with their handle ids.

use super::fields::TableField;
use super::join::{join_table_name, side_letter};
use super::relations::{Relation, RelationType};
use crate::ir::{Edge, EdgeData, EdgeKind};

/// Enum -> column connector: `e<table>-<field>-<enum>`.
pub fn enum_edge(entry: &TableField<'_>) -> Edge {
    let enum_name = entry.type_name();
    Edge {
        id: format!("e{}-{}-{}", entry.table, entry.name(), enum_name),
        kind: EdgeKind::Smoothstep,
        source: enum_name.to_string(),
        target: entry.table.to_string(),
        source_handle: enum_name.to_string(),
        target_handle: format!("{}-{}", entry.table, entry.name()),
        label: None,
        data: None,
    }
}

/// Two edges into the join node for many-to-many, one edge otherwise.
pub fn relation_edges(name: &str, relation: &Relation<'_>) -> Vec<Edge> {
    match relation.kind {
        RelationType::ManyToMany => {
            let join = join_table_name(name);
            relation
                .fields
                .iter()
                .enumerate()
                .map(|(side, entry)| {
                    let letter = side_letter(side);
                    let mut id = format!("e{}-{}-{}", name, entry.table, entry.type_name());
                    // Both sides of a self relation share table and type.
                    if relation.is_self_relation() {
                        id = format!("{id}-{letter}");
                    }
                    Edge {
                        id,
                        source: entry.table.to_string(),
                        target: join.clone(),
                        source_handle: source_handle(name, entry),
                        target_handle: format!("{join}-{letter}"),
                        ..relation_edge(name, relation.kind)
                    }
                })
                .collect()
        }
        RelationType::OneToMany | RelationType::OneToOne => {
            // one-to-one always anchors on the first declared side
            let entry = relation.many_side().unwrap_or(&relation.fields[0]);
            vec![Edge {
                source: entry.table.to_string(),
                target: entry.type_name().to_string(),
                source_handle: source_handle(name, entry),
                target_handle: format!("{}-{}", entry.type_name(), name),
                ..relation_edge(name, relation.kind)
            }]
        }
    }
}

fn source_handle(relation: &str, entry: &TableField<'_>) -> String {
    format!("{}-{}-{}", entry.table, relation, entry.name())
}

fn relation_edge(name: &str, kind: RelationType) -> Edge {
    Edge {
        id: format!("e{name}"),
        kind: EdgeKind::Relation,
        source: String::new(),
        target: String::new(),
        source_handle: String::new(),
        target_handle: String::new(),
        label: Some(name.to_string()),
        data: Some(EdgeData {
            relation_type: kind,
        }),
    }
}
