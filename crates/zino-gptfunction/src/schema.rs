//! Assembling function calling schemas.

use crate::error::FunctionResult;
use crate::extractor::ParamRecord;
use crate::types::{ParamType, TypeNaming};
use crate::{JsonValue, Map};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// A function definition in a tool list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Function name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Object schema of the parameters.
    pub parameters: JsonValue,
}

/// A tool accepted by function calling APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool type, always `"function"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Function definition.
    pub function: ToolDefinition,
}

impl ToolSchema {
    /// Creates a new schema for a function definition.
    pub fn new(function: ToolDefinition) -> Self {
        Self {
            kind: "function".to_owned(),
            function,
        }
    }

    /// Returns the function name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Converts the schema into a JSON value.
    pub fn into_json(self) -> JsonValue {
        let ToolDefinition {
            name,
            description,
            parameters,
        } = self.function;
        json!({
            "type": self.kind,
            "function": {
                "name": name,
                "description": description,
                "parameters": parameters,
            },
        })
    }
}

impl From<ToolSchema> for JsonValue {
    #[inline]
    fn from(schema: ToolSchema) -> Self {
        schema.into_json()
    }
}

/// Converts parameter records into the `parameters` object of a schema.
///
/// The properties follow the order of `params`. Any unsupported type fails the
/// whole conversion. Each property is laid out as `type`, `description`, `enum`.
pub fn parse_params(params: &[ParamRecord], naming: TypeNaming) -> FunctionResult<Map> {
    let mut properties = Map::new();
    for param in params {
        let param_type = ParamType::resolve(&param.declared)?;
        let mut property = Map::new();
        property.insert("type".to_owned(), param_type.type_name(naming).into());
        property.insert(
            "description".to_owned(),
            param.description.clone().into(),
        );
        if let ParamType::EnumeratedString(values) = param_type {
            property.insert("enum".to_owned(), values.into());
        }
        properties.insert(param.name.clone(), property.into());
    }

    let mut parameters = Map::new();
    parameters.insert("type".to_owned(), "object".into());
    parameters.insert("properties".to_owned(), properties.into());
    Ok(parameters)
}

/// Builds the schema of a function.
pub fn assemble(
    name: &str,
    description: &str,
    params: &[ParamRecord],
    naming: TypeNaming,
) -> FunctionResult<ToolSchema> {
    let parameters = parse_params(params, naming)?;
    Ok(ToolSchema::new(ToolDefinition {
        name: name.to_owned(),
        description: description.to_owned(),
        parameters: parameters.into(),
    }))
}
