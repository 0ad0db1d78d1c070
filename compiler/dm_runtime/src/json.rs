//! Compiled-definition format.
//!
//! The compiler emits the object tree as nested JSON records:
//!
//! ```json
//! { "name": "", "children": [
//!     { "name": "mob", "variables": { "health": 100 },
//!       "procs": { "hurt": [{ "bytecode": [1, 2], "arguments": [{ "name": "amount", "type": 32 }] }] } },
//!     { "name": "ghost", "parent": "/mob" }
//! ] }
//! ```
//!
//! Values are JSON strings and numbers, or objects tagged with a numeric
//! `type`: `0` resource (`resourcePath`), `1` null, `2` path (`value`).

use crate::errors::LoadError;
use crate::proc::DreamProc;
use crate::resource::ResourceLoader;
use crate::value::DreamValue;
use dm_ir::{DMValueType, DreamPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One class in the compiled tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DreamObjectJson {
    pub name: String,
    /// Declared parent type, when it differs from the path parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_variables: Option<BTreeMap<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procs: Option<BTreeMap<String, Vec<ProcDefinitionJson>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_proc: Option<ProcDefinitionJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DreamObjectJson>>,
}

impl DreamObjectJson {
    pub fn named(name: impl Into<String>) -> Self {
        DreamObjectJson {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn children(&self) -> &[DreamObjectJson] {
        self.children.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcDefinitionJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytecode: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<ProcArgumentJson>>,
}

impl ProcDefinitionJson {
    /// Build the proc named `name`. Missing bytecode is an empty proc.
    pub fn to_proc(&self, name: &str) -> DreamProc {
        let arguments = self.arguments.as_deref().unwrap_or_default();
        DreamProc::new(
            name,
            self.bytecode.clone().unwrap_or_default(),
            arguments.iter().map(|argument| argument.name.clone()).collect(),
            arguments
                .iter()
                .map(|argument| DMValueType::from_bits_truncate(argument.ty))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcArgumentJson {
    pub name: String,
    /// `DMValueType` bits.
    #[serde(rename = "type", default)]
    pub ty: u32,
}

/// Tags of structured constants.
mod tag {
    pub const RESOURCE: u64 = 0;
    pub const NULL: u64 = 1;
    pub const PATH: u64 = 2;
}

/// Parse a compiled-definition document.
pub fn parse(text: &str) -> Result<DreamObjectJson, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a compiled constant.
///
/// A number is a float exactly when its literal contains a decimal point.
/// Any other number is an integer, saturating to `i32::MAX` when its text
/// does not parse as one, so exponent literals such as `1e3` saturate too.
pub fn decode_value(
    value: &Value,
    resources: &dyn ResourceLoader,
) -> Result<DreamValue, LoadError> {
    match value {
        Value::String(text) => Ok(DreamValue::string(text.as_str())),
        Value::Number(number) => {
            // Raw literal text, kept intact by `arbitrary_precision`.
            let text = number.to_string();
            if text.contains('.') {
                let float = text
                    .parse::<f32>()
                    .map_err(|_| LoadError::InvalidValueKind { kind: "number" })?;
                Ok(DreamValue::Float(float))
            } else {
                Ok(DreamValue::Integer(text.parse::<i32>().unwrap_or(i32::MAX)))
            }
        }
        Value::Object(fields) => {
            let tag = fields
                .get("type")
                .and_then(Value::as_u64)
                .ok_or(LoadError::MissingProperty { property: "type" })?;
            match tag {
                tag::RESOURCE => match fields.get("resourcePath") {
                    Some(Value::String(path)) => {
                        Ok(DreamValue::Resource(resources.load_resource(path)?))
                    }
                    Some(Value::Null) => Ok(DreamValue::Null),
                    Some(_) => Err(LoadError::InvalidResourcePath),
                    None => Err(LoadError::MissingProperty {
                        property: "resourcePath",
                    }),
                },
                tag::NULL => Ok(DreamValue::Null),
                tag::PATH => fields
                    .get("value")
                    .and_then(Value::as_str)
                    .map(|path| DreamValue::Path(DreamPath::new(path)))
                    .ok_or(LoadError::MissingProperty { property: "value" }),
                other => Err(LoadError::InvalidVariableType { tag: other }),
            }
        }
        Value::Null => Err(LoadError::InvalidValueKind { kind: "null" }),
        Value::Bool(_) => Err(LoadError::InvalidValueKind { kind: "bool" }),
        Value::Array(_) => Err(LoadError::InvalidValueKind { kind: "array" }),
    }
}
