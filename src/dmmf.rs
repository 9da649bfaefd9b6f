//! Schema datamodel as emitted by the schema parser (DMMF JSON).

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datamodel {
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
}

impl Datamodel {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Model {
    /// The type of the field marked `isId`. Composite ids yield the first one.
    pub fn id_type(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.is_id)
            .and_then(|f| f.typ.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    /// Scalar type, enum name or related model name. Only absent on
    /// synthesized join columns whose related model has no id field.
    #[serde(rename = "type", default)]
    pub typ: Option<String>,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub relation_name: Option<String>,
    #[serde(default)]
    pub relation_from_fields: Vec<String>,
    #[serde(default)]
    pub relation_to_fields: Vec<String>,
    #[serde(default)]
    pub has_default_value: bool,
    #[serde(default, alias = "defaultValue")]
    pub default: Option<FieldDefault>,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl Field {
    pub fn type_name(&self) -> &str {
        self.typ.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Enum,
    Object,
    /// Any kind this crate does not model (e.g. `unsupported` columns).
    #[serde(other)]
    Unsupported,
}

/// A recorded default: either a function call such as `autoincrement()` or
/// a literal value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldDefault {
    Function {
        name: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Named {
        name: String,
        #[serde(default, rename = "dbName")]
        db_name: Option<String>,
    },
    Bare(String),
}

impl EnumValue {
    pub fn name(&self) -> &str {
        match self {
            EnumValue::Named { name, .. } => name,
            EnumValue::Bare(name) => name,
        }
    }
}
