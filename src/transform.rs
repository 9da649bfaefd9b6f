//! Datamodel to graph transform.
//!
//! Stages run leaves first: fields are partitioned by kind, relation fields
//! are grouped and classified, many-to-many relations get a synthesized join
//! model, and finally nodes and edges are generated. The transform is pure:
//! it reads the datamodel and layout hint and returns a fresh [`Graph`].

mod edges;
mod fields;
mod join;
mod nodes;
mod relations;

use std::collections::HashSet;

use log::debug;

pub use fields::{FieldGroups, TableField, classify_fields};
pub use join::{JOIN_PREFIX, join_table_name, synthesize_join_models};
pub use nodes::{display_type, format_default};
pub use relations::{Relation, RelationType, Relations, group_relations};

use crate::config::GraphConfig;
use crate::dmmf::Datamodel;
use crate::error::TransformError;
use crate::ir::Graph;
use crate::layout::LayoutHint;

pub fn transform(
    datamodel: &Datamodel,
    layout: Option<&LayoutHint>,
    config: &GraphConfig,
) -> Result<Graph, TransformError> {
    let groups = classify_fields(&datamodel.models);
    let relations = group_relations(&groups.relations)?;
    let join_models = synthesize_join_models(datamodel, &relations);

    // Join columns carry their side letter as relation name, which must not
    // resolve against the real relations.
    let no_relations = Relations::new();

    let nodes: Vec<_> = datamodel
        .enums
        .iter()
        .map(|e| nodes::enum_node(e, layout, config))
        .chain(
            datamodel
                .models
                .iter()
                .map(|m| nodes::model_node(m, &relations, layout, config)),
        )
        .chain(
            join_models
                .iter()
                .map(|m| nodes::model_node(m, &no_relations, layout, config)),
        )
        .collect();
    ensure_unique(nodes.iter().map(|n| n.id.as_str()), TransformError::DuplicateNodeId)?;

    let edges: Vec<_> = groups
        .enums
        .iter()
        .map(edges::enum_edge)
        .chain(
            relations
                .iter()
                .flat_map(|(name, relation)| edges::relation_edges(name, relation)),
        )
        .collect();
    ensure_unique(edges.iter().map(|e| e.id.as_str()), TransformError::DuplicateEdgeId)?;

    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        relations = relations.len(),
        join_models = join_models.len();
        "Graph built"
    );

    Ok(Graph { nodes, edges })
}

fn ensure_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    err: fn(String) -> TransformError,
) -> Result<(), TransformError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(err(id.to_string()));
        }
    }
    Ok(())
}

impl Graph {
    /// Transform with the default node positions and metrics.
    pub fn from_datamodel(
        datamodel: &Datamodel,
        layout: Option<&LayoutHint>,
    ) -> Result<Self, TransformError> {
        transform(datamodel, layout, &GraphConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{NodeData, NodeKind, Position};
    use serde_json::json;

    fn blog() -> Datamodel {
        serde_json::from_value(json!({
            "models": [
                { "name": "User", "fields": [
                    { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "isRequired": true,
                      "hasDefaultValue": true, "default": { "name": "autoincrement", "args": [] } },
                    { "name": "role", "kind": "enum", "type": "Role", "isRequired": true,
                      "hasDefaultValue": true, "default": "USER" },
                    { "name": "posts", "kind": "object", "type": "Post", "isList": true, "relationName": "UserPosts" }
                ]},
                { "name": "Post", "fields": [
                    { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "isRequired": true },
                    { "name": "authorId", "kind": "scalar", "type": "Int", "isRequired": true },
                    { "name": "author", "kind": "object", "type": "User", "isRequired": true, "relationName": "UserPosts",
                      "relationFromFields": ["authorId"], "relationToFields": ["id"] },
                    { "name": "tags", "kind": "object", "type": "Tag", "isList": true, "relationName": "Post_Tag" }
                ]},
                { "name": "Tag", "fields": [
                    { "name": "name", "kind": "scalar", "type": "String", "isId": true, "isRequired": true },
                    { "name": "posts", "kind": "object", "type": "Post", "isList": true, "relationName": "Post_Tag" }
                ]}
            ],
            "enums": [
                { "name": "Role", "values": [{ "name": "USER" }, { "name": "ADMIN" }] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_node_ids() {
        let graph = Graph::from_datamodel(&blog(), None).unwrap();

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Role", "User", "Post", "Tag", "_Post_Tag"]);
        assert_eq!(graph.node("Role").unwrap().kind, NodeKind::Enum);
        assert_eq!(graph.node("_Post_Tag").unwrap().kind, NodeKind::Model);
    }

    #[test]
    fn test_edge_ids() {
        let graph = Graph::from_datamodel(&blog(), None).unwrap();

        let ids: Vec<&str> = graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "eUser-role-Role",
                "eUserPosts",
                "ePost_Tag-Post-Tag",
                "ePost_Tag-Tag-Post"
            ]
        );
        assert_eq!(graph.edge("eUserPosts").unwrap().source, "User");
        assert_eq!(graph.edge("eUserPosts").unwrap().target, "Post");
    }

    #[test]
    fn test_every_handle_resolves() {
        let graph = Graph::from_datamodel(&blog(), None).unwrap();
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_columns_carry_relation_type() {
        let graph = Graph::from_datamodel(&blog(), None).unwrap();

        let NodeData::Model(post) = &graph.node("Post").unwrap().data else {
            panic!("expected model data");
        };
        let author = post.columns.iter().find(|c| c.name == "author").unwrap();
        assert_eq!(author.relation_type, Some(RelationType::OneToMany));
        assert_eq!(author.relation_from_fields, vec!["authorId"]);
        assert_eq!(author.display_type, "User");
        let tags = post.columns.iter().find(|c| c.name == "tags").unwrap();
        assert_eq!(tags.relation_type, Some(RelationType::ManyToMany));
        assert_eq!(tags.display_type, "Tag[]");

        let NodeData::Model(user) = &graph.node("User").unwrap().data else {
            panic!("expected model data");
        };
        assert_eq!(user.columns[0].default_value.as_deref(), Some("autoincrement()"));
        assert_eq!(user.columns[1].default_value.as_deref(), Some("USER"));
    }

    #[test]
    fn test_join_node_columns() {
        let graph = Graph::from_datamodel(&blog(), None).unwrap();

        let NodeData::Model(join) = &graph.node("_Post_Tag").unwrap().data else {
            panic!("expected model data");
        };
        let columns: Vec<(&str, &str)> = join
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.display_type.as_str()))
            .collect();
        assert_eq!(columns, vec![("A", "String"), ("B", "Int")]);
        assert!(join.columns.iter().all(|c| c.relation_type.is_none()));
    }

    #[test]
    fn test_layout_positions() {
        let layout = LayoutHint::from_json(
            &json!({ "children": [
                { "id": "User", "x": 500, "y": 120 },
                { "id": "_Post_Tag", "x": 900, "y": 40 }
            ]})
            .to_string(),
        )
        .unwrap();

        let graph = Graph::from_datamodel(&blog(), Some(&layout)).unwrap();

        assert_eq!(graph.node("User").unwrap().position, Position::new(500.0, 120.0));
        assert_eq!(graph.node("_Post_Tag").unwrap().position, Position::new(900.0, 40.0));
        assert_eq!(graph.node("Post").unwrap().position, Position::new(250.0, 25.0));
        assert_eq!(graph.node("Role").unwrap().position, Position::new(0.0, 0.0));
    }

    #[test]
    fn test_deterministic() {
        let dm = blog();
        let first = Graph::from_datamodel(&dm, None).unwrap();
        let second = Graph::from_datamodel(&dm, None).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }

    #[test]
    fn test_configured_default_positions() {
        let config = GraphConfig {
            model_position: Position::new(10.0, 10.0),
            enum_position: Position::new(-5.0, 0.0),
            ..GraphConfig::default()
        };
        let graph = transform(&blog(), None, &config).unwrap();

        assert_eq!(graph.node("Tag").unwrap().position, Position::new(10.0, 10.0));
        assert_eq!(graph.node("Role").unwrap().position, Position::new(-5.0, 0.0));
    }

    #[test]
    fn test_join_name_collision() {
        let mut dm = blog();
        dm.models.push(
            serde_json::from_value(json!({ "name": "_Post_Tag", "fields": [] })).unwrap(),
        );

        assert_eq!(
            Graph::from_datamodel(&dm, None).unwrap_err(),
            TransformError::DuplicateNodeId("_Post_Tag".to_string())
        );
    }

    #[test]
    fn test_malformed_relation_fails() {
        let dm: Datamodel = serde_json::from_value(json!({
            "models": [{ "name": "User", "fields": [
                { "name": "posts", "kind": "object", "type": "Post", "isList": true, "relationName": "UserPosts" }
            ]}]
        }))
        .unwrap();

        assert_eq!(
            Graph::from_datamodel(&dm, None).unwrap_err(),
            TransformError::MalformedRelation {
                relation: "UserPosts".to_string(),
                count: 1
            }
        );
    }

    #[test]
    fn test_self_relation_graph() {
        let dm: Datamodel = serde_json::from_value(json!({
            "models": [{ "name": "Employee", "fields": [
                { "name": "id", "kind": "scalar", "type": "Int", "isId": true, "isRequired": true },
                { "name": "manager", "kind": "object", "type": "Employee", "relationName": "Management" },
                { "name": "reports", "kind": "object", "type": "Employee", "isList": true, "relationName": "Management" },
                { "name": "mentors", "kind": "object", "type": "Employee", "isList": true, "relationName": "Mentoring" },
                { "name": "mentees", "kind": "object", "type": "Employee", "isList": true, "relationName": "Mentoring" }
            ]}]
        }))
        .unwrap();

        let graph = Graph::from_datamodel(&dm, None).unwrap();

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Employee", "_Mentoring"]);

        let management = graph.edge("eManagement").unwrap();
        assert_eq!(management.source, "Employee");
        assert_eq!(management.target, "Employee");
        assert_eq!(management.source_handle, "Employee-Management-reports");

        assert_eq!(graph.edges.len(), 3);
        assert!(graph.dangling_edges().is_empty());
    }

    #[test]
    fn test_unsupported_fields_stay_as_columns() {
        let dm: Datamodel = serde_json::from_value(json!({
            "models": [{ "name": "Place", "fields": [
                { "name": "geom", "kind": "unsupported", "type": "geometry" }
            ]}]
        }))
        .unwrap();

        let graph = Graph::from_datamodel(&dm, None).unwrap();

        assert!(graph.edges.is_empty());
        let NodeData::Model(place) = &graph.nodes[0].data else {
            panic!("expected model data");
        };
        assert_eq!(place.columns[0].display_type, "geometry?");
    }
}
