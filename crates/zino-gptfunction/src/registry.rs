//! Function registry for managing available functions.

use crate::JsonValue;
use crate::error::{FunctionError, FunctionResult};
use crate::function::Function;
use crate::schema::ToolSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registry for managing available functions.
///
/// Functions are kept in registration order, which is also the order of the
/// schemas passed to a function calling API.
#[derive(Default)]
pub struct FunctionRegistry {
    /// Map of function names to their implementations
    functions: IndexMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    /// Create a new function registry.
    pub fn new() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Registers a function under its own name.
    pub fn register<F: Function + 'static>(&mut self, function: F) -> FunctionResult<()> {
        self.register_arc(Arc::new(function))
    }

    /// Registers a shared function under its own name.
    pub fn register_arc(&mut self, function: Arc<dyn Function>) -> FunctionResult<()> {
        let name = function.name().to_owned();
        if self.functions.contains_key(&name) {
            return Err(FunctionError::DuplicateFunction(name));
        }
        self.functions.insert(name, function);
        Ok(())
    }

    /// Get a function by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.functions.get(name).cloned()
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Get all registered function names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(|name| name.as_str()).collect()
    }

    /// Remove a function from the registry.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.functions.shift_remove(name).is_some()
    }

    /// Get the number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Generates the schemas of all functions.
    ///
    /// Fails with the first function whose schema can not be generated.
    pub fn schemas(&self) -> FunctionResult<Vec<ToolSchema>> {
        self.functions
            .values()
            .map(|function| function.schema())
            .collect()
    }

    /// Invokes a function by name with JSON arguments.
    pub fn dispatch(&self, name: &str, arguments: JsonValue) -> FunctionResult<String> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| FunctionError::FunctionNotFound(name.to_owned()))?;
        tracing::debug!(function = name, "dispatching function call");
        function.invoke(arguments)
    }

    /// Executes a tool call requested by the model.
    pub fn execute(&self, tool_call: &ToolCall) -> FunctionResult<ToolMessage> {
        let content = self.dispatch(
            &tool_call.function.name,
            tool_call.function.arguments.clone(),
        )?;
        Ok(ToolMessage::new(tool_call.id.clone(), content))
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("function_count", &self.functions.len())
            .field("function_names", &self.names())
            .finish()
    }
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool call ID.
    pub id: String,
    /// Tool type, always `"function"`.
    #[serde(rename = "type", default = "default_tool_type")]
    pub kind: String,
    /// Function name and arguments.
    pub function: ToolFunction,
}

impl ToolCall {
    /// Creates a new function call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            id: id.into(),
            kind: default_tool_type(),
            function: ToolFunction {
                name: name.into(),
                arguments,
            },
        }
    }
}

/// Name and arguments of a requested function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFunction {
    /// Function name.
    pub name: String,
    /// Arguments, transmitted as a JSON encoded string.
    #[serde(with = "stringified_json")]
    pub arguments: JsonValue,
}

/// Result of a tool call to be sent back to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMessage {
    /// Message role, always `"tool"`.
    pub role: String,
    /// ID of the tool call this message responds to.
    pub tool_call_id: String,
    /// Function result.
    pub content: String,
}

impl ToolMessage {
    /// Creates a new tool message.
    pub fn new(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_owned(),
            tool_call_id: tool_call_id.into(),
            content: content.into(),
        }
    }
}

fn default_tool_type() -> String {
    "function".to_owned()
}

/// Function arguments are serialized as strings such as `"{\"key\": \"value\"}"`.
mod stringified_json {
    use crate::JsonValue;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S>(value: &JsonValue, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<JsonValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&s).map_err(serde::de::Error::custom)
    }
}
