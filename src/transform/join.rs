//! Implicit join tables for many-to-many relations.

use log::debug;

use super::relations::{RelationType, Relations};
use crate::dmmf::{Datamodel, Field, FieldKind, Model};

/// Marks synthesized node ids so they cannot shadow a declared model or enum.
pub const JOIN_PREFIX: &str = "_";

const SIDE_LETTERS: [&str; 2] = ["A", "B"];

pub fn join_table_name(relation: &str) -> String {
    format!("{JOIN_PREFIX}{relation}")
}

/// Column letter of a relation side (0 -> `A`, 1 -> `B`).
pub fn side_letter(side: usize) -> &'static str {
    SIDE_LETTERS[side]
}

/// One join model per many-to-many relation, in relation order.
pub fn synthesize_join_models(datamodel: &Datamodel, relations: &Relations<'_>) -> Vec<Model> {
    relations
        .iter()
        .filter(|(_, relation)| relation.kind == RelationType::ManyToMany)
        .map(|(name, relation)| {
            let fields = relation
                .fields
                .iter()
                .enumerate()
                .map(|(side, entry)| {
                    let letter = side_letter(side);
                    let typ = datamodel
                        .model(entry.type_name())
                        .and_then(|m| m.id_type())
                        .map(str::to_string);
                    if typ.is_none() {
                        debug!(relation = *name, model = entry.type_name(); "No id field for join column type");
                    }

                    Field {
                        name: letter.to_string(),
                        kind: FieldKind::Scalar,
                        typ,
                        is_list: false,
                        is_required: true,
                        is_id: false,
                        // Carries the letter through to the column's handle id.
                        relation_name: Some(letter.to_string()),
                        relation_from_fields: vec![],
                        relation_to_fields: vec![],
                        has_default_value: false,
                        default: None,
                        documentation: None,
                    }
                })
                .collect();

            Model {
                name: join_table_name(name),
                db_name: None,
                documentation: None,
                fields,
            }
        })
        .collect()
}
