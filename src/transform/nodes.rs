//! Model and enum nodes.

use serde_json::Value;

use super::relations::Relations;
use crate::config::GraphConfig;
use crate::dmmf::{DatamodelEnum, Field, FieldDefault, FieldKind, Model};
use crate::ir::{Column, EnumData, ModelData, Node, NodeData, NodeKind};
use crate::layout::LayoutHint;

/// Enum nodes take their size from the layout when it has one.
pub fn enum_node(e: &DatamodelEnum, layout: Option<&LayoutHint>, config: &GraphConfig) -> Node {
    let position = match layout {
        Some(layout) => layout.position(&e.name, config.enum_position),
        None => config.enum_position,
    };

    Node {
        id: e.name.clone(),
        kind: NodeKind::Enum,
        position,
        size: layout.and_then(|l| l.size(&e.name)),
        data: NodeData::Enum(EnumData {
            name: e.name.clone(),
            db_name: e.db_name.clone(),
            documentation: e.documentation.clone(),
            values: e.values.iter().map(|v| v.name().to_string()).collect(),
        }),
    }
}

/// Model nodes size themselves from their rows, so only the position is
/// taken from the layout.
pub fn model_node(
    model: &Model,
    relations: &Relations<'_>,
    layout: Option<&LayoutHint>,
    config: &GraphConfig,
) -> Node {
    let position = match layout {
        Some(layout) => layout.position(&model.name, config.model_position),
        None => config.model_position,
    };

    Node {
        id: model.name.clone(),
        kind: NodeKind::Model,
        position,
        size: None,
        data: NodeData::Model(ModelData {
            name: model.name.clone(),
            db_name: model.db_name.clone(),
            documentation: model.documentation.clone(),
            columns: model.fields.iter().map(|f| column(f, relations)).collect(),
        }),
    }
}

fn column(field: &Field, relations: &Relations<'_>) -> Column {
    Column {
        name: field.name.clone(),
        kind: field.kind,
        documentation: field.documentation.clone(),
        is_list: field.is_list,
        is_required: field.is_required,
        relation_name: field.relation_name.clone(),
        relation_from_fields: field.relation_from_fields.clone(),
        relation_to_fields: field.relation_to_fields.clone(),
        relation_type: field
            .relation_name
            .as_deref()
            .and_then(|name| relations.get(name))
            .map(|r| r.kind),
        display_type: display_type(field),
        typ: field.typ.clone(),
        default_value: format_default(field),
    }
}

/// `Type[]` for lists, `Type?` for optional fields. A list is never
/// also required, so the two suffixes do not combine.
pub fn display_type(field: &Field) -> String {
    let suffix = if field.is_list {
        "[]"
    } else if !field.is_required {
        "?"
    } else {
        ""
    };
    format!("{}{}", field.type_name(), suffix)
}

pub fn format_default(field: &Field) -> Option<String> {
    if !field.has_default_value {
        return None;
    }

    match field.default.as_ref()? {
        FieldDefault::Function { name, args } => {
            let args: Vec<String> = args.iter().map(Value::to_string).collect();
            Some(format!("{}({})", name, args.join(",")))
        }
        FieldDefault::Literal(value) if field.kind == FieldKind::Enum => Some(plain_string(value)),
        FieldDefault::Literal(value) => Some(value.to_string()),
    }
}

/// String form of an enum default; list defaults join their members with commas.
fn plain_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(plain_string).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}
