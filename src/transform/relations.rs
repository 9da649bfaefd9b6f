//! Relation grouping and cardinality inference.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::fields::TableField;
use crate::error::TransformError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationType {
    #[serde(rename = "1-1")]
    OneToOne,
    #[serde(rename = "1-n")]
    OneToMany,
    #[serde(rename = "m-n")]
    ManyToMany,
}

impl RelationType {
    /// Cardinality from the `isList` flags of both sides.
    pub fn classify(a_is_list: bool, b_is_list: bool) -> Self {
        match (a_is_list, b_is_list) {
            (true, true) => Self::ManyToMany,
            (true, false) | (false, true) => Self::OneToMany,
            (false, false) => Self::OneToOne,
        }
    }
}

/// Both ends of a relation, in the order they were declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation<'a> {
    pub kind: RelationType,
    pub fields: [TableField<'a>; 2],
}

impl<'a> Relation<'a> {
    /// The list-bearing side of a one-to-many relation.
    pub fn many_side(&self) -> Option<&TableField<'a>> {
        match self.kind {
            RelationType::OneToMany => self.fields.iter().find(|f| f.field.is_list),
            _ => None,
        }
    }

    pub fn is_self_relation(&self) -> bool {
        self.fields[0].table == self.fields[1].table
    }
}

pub type Relations<'a> = IndexMap<&'a str, Relation<'a>>;

/// Group relation fields by relation name, keeping first-seen order.
pub fn group_relations<'a>(fields: &[TableField<'a>]) -> Result<Relations<'a>, TransformError> {
    let mut groups: IndexMap<&'a str, Vec<TableField<'a>>> = IndexMap::new();

    for entry in fields {
        match entry.field.relation_name.as_deref() {
            Some(name) => groups.entry(name).or_default().push(*entry),
            None => {
                debug!(model = entry.table, field = entry.name(); "Relation field without relation name");
            }
        }
    }

    groups
        .into_iter()
        .map(|(name, group)| {
            let count = group.len();
            let fields: [TableField<'a>; 2] =
                group.try_into().map_err(|_| TransformError::MalformedRelation {
                    relation: name.to_string(),
                    count,
                })?;
            let kind = RelationType::classify(fields[0].field.is_list, fields[1].field.is_list);
            Ok((name, Relation { kind, fields }))
        })
        .collect()
}
