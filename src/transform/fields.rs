//! Partition of every model field by kind.

use log::trace;

use crate::dmmf::{Field, FieldKind, Model};

/// A field together with the name of the model declaring it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableField<'a> {
    pub table: &'a str,
    pub field: &'a Field,
}

impl<'a> TableField<'a> {
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    /// The field's type: related model for relations, enum name for enum columns.
    pub fn type_name(&self) -> &'a str {
        self.field.type_name()
    }
}

#[derive(Debug, Default)]
pub struct FieldGroups<'a> {
    pub scalars: Vec<TableField<'a>>,
    pub enums: Vec<TableField<'a>>,
    pub relations: Vec<TableField<'a>>,
}

/// Scan models in declaration order. Fields of unknown kind land in no group.
pub fn classify_fields(models: &[Model]) -> FieldGroups<'_> {
    let mut groups = FieldGroups::default();

    for model in models {
        for field in &model.fields {
            let entry = TableField {
                table: &model.name,
                field,
            };
            match field.kind {
                FieldKind::Scalar => groups.scalars.push(entry),
                FieldKind::Enum => groups.enums.push(entry),
                FieldKind::Object => groups.relations.push(entry),
                FieldKind::Unsupported => {
                    trace!(model = model.name, field = field.name; "Skipping field of unsupported kind");
                }
            }
        }
    }

    groups
}
