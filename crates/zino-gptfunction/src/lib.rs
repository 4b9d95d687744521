#![doc = include_str!("../README.md")]
#![doc(html_favicon_url = "https://zino.cc/assets/zino-logo.png")]
#![doc(html_logo_url = "https://zino.cc/assets/zino-logo.svg")]

mod macros;

pub mod config;
pub mod docstring;
pub mod error;
pub mod extractor;
pub mod function;
pub mod output;
pub mod registry;
pub mod schema;
pub mod signature;
pub mod types;

pub use config::FunctionConfig;
pub use docstring::{DocParser, Docstring, DocstringStyle};
pub use error::{BoxError, FunctionError, FunctionResult};
pub use extractor::{Diagnostic, DiagnosticKind, Extraction, ParamRecord, extract_params};
pub use function::{CompiledSchema, Function, GptFunction, gptfunction};
pub use output::{Displayed, FunctionOutput, IntoText, TextOutput, coerce};
pub use registry::{FunctionRegistry, ToolCall, ToolFunction, ToolMessage};
pub use schema::{ToolDefinition, ToolSchema, assemble, parse_params};
pub use signature::{ParamDecl, Signature};
pub use types::{DeclaredType, ParamType, TypeHint, TypeNaming, map_type};

/// A JSON value.
pub type JsonValue = serde_json::Value;

/// A JSON object with keys in insertion order.
pub type Map = serde_json::Map<String, JsonValue>;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
