//! Wrapping Rust callables as GPT functions.

use crate::JsonValue;
use crate::config::FunctionConfig;
use crate::docstring::{DocParser, Docstring};
use crate::error::{FunctionError, FunctionResult};
use crate::extractor::{Extraction, extract_params};
use crate::output::{FunctionOutput, IntoText, coerce};
use crate::schema::{ToolSchema, assemble};
use crate::signature::Signature;
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased interface of GPT functions.
pub trait Function: Send + Sync {
    /// Returns the function name.
    fn name(&self) -> &str;

    /// Returns the short description.
    fn description(&self) -> String;

    /// Generates the function calling schema.
    fn schema(&self) -> FunctionResult<ToolSchema>;

    /// Invokes the function with JSON arguments and returns the result as text.
    fn invoke(&self, arguments: JsonValue) -> FunctionResult<String>;
}

/// A schema with the diagnostics collected while generating it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    /// Function calling schema.
    pub schema: ToolSchema,
    /// Extraction result the schema was built from.
    pub extraction: Extraction,
}

/// A callable that can be described to and invoked by a function calling API.
///
/// The callable takes a single argument `A`, usually a tuple of the parameters
/// in declaration order or a struct deserializable from the JSON arguments.
///
/// # Example
/// ```
/// use zino_gptfunction::{GptFunction, Signature};
///
/// let signature = Signature::new("add")
///     .doc("Adds two numbers.\n\n:param a: First number.\n:param b: Second number.")
///     .typed::<i64>("a")
///     .typed::<i64>("b");
/// let add = GptFunction::new(signature, |(a, b): (i64, i64)| a + b);
///
/// assert_eq!(add.call((2, 3)), "5");
/// assert_eq!(add.invoke_json(serde_json::json!([2, 3])).unwrap(), "5");
/// assert_eq!(add.description(), "Adds two numbers.");
/// ```
pub struct GptFunction<F, A> {
    /// Name, documentation and parameter types
    signature: Signature,
    /// Schema generation configuration
    config: FunctionConfig,
    /// Documentation parser overriding the configured style
    parser: Option<Arc<dyn DocParser>>,
    /// Wrapped callable
    function: F,
    /// Argument type
    phantom: PhantomData<fn(A)>,
}

impl<F, A> GptFunction<F, A> {
    /// Wraps a callable.
    pub fn new<R>(signature: Signature, function: F) -> Self
    where
        F: Fn(A) -> R,
    {
        Self {
            signature,
            config: FunctionConfig::default(),
            parser: None,
            function,
            phantom: PhantomData,
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: FunctionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets a custom documentation parser.
    #[must_use]
    pub fn with_parser<P: DocParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Returns the function name.
    #[inline]
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Returns the signature.
    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }

    /// Parses the documentation.
    pub fn docstring(&self) -> Docstring {
        let text = self.signature.doc_text();
        match &self.parser {
            Some(parser) => parser.parse(text),
            None => self.config.docstring_style.parse(text),
        }
    }

    /// Returns the short description, which is empty if there is no documentation.
    pub fn description(&self) -> String {
        self.docstring().short_description.unwrap_or_default()
    }

    /// Generates the schema and returns it along with the diagnostics.
    ///
    /// Nothing is logged.
    pub fn compile(&self) -> FunctionResult<CompiledSchema> {
        let docstring = self.docstring();
        let extraction = extract_params(self.signature.annotations(), &docstring.params);
        let description = docstring.short_description.unwrap_or_default();
        let schema = assemble(
            self.name(),
            &description,
            &extraction.params,
            self.config.type_naming,
        )?;
        Ok(CompiledSchema { schema, extraction })
    }

    /// Generates the function calling schema.
    ///
    /// Undocumented parameters are reported as warnings unless disabled in the configuration.
    pub fn schema(&self) -> FunctionResult<ToolSchema> {
        let CompiledSchema { schema, extraction } = self.compile()?;
        if self.config.warn_missing_docs {
            for diagnostic in &extraction.diagnostics {
                tracing::warn!(
                    function = self.name(),
                    parameter = diagnostic.parameter.as_str(),
                    "{}",
                    diagnostic
                );
            }
        }
        Ok(schema)
    }

    /// Invokes the callable and coerces the result into a string.
    pub fn call<R>(&self, args: A) -> String
    where
        F: Fn(A) -> R,
        R: IntoText,
    {
        coerce((self.function)(args))
    }

    /// Invokes a fallible callable and coerces the result into a string.
    ///
    /// The callable's error is returned unchanged.
    pub fn try_call<T, E>(&self, args: A) -> Result<String, E>
    where
        F: Fn(A) -> Result<T, E>,
        T: IntoText,
    {
        (self.function)(args).map(coerce)
    }

    /// Decodes JSON arguments and invokes the callable.
    ///
    /// Arguments are decoded into `A` with serde, so a struct accepts a JSON object and
    /// a tuple accepts a JSON array. A tuple also accepts an object keyed by parameter
    /// name, as declared in the schema. Arguments are not checked against the schema.
    pub fn invoke_json<R>(&self, arguments: JsonValue) -> FunctionResult<String>
    where
        F: Fn(A) -> R,
        A: DeserializeOwned,
        R: FunctionOutput,
    {
        let args = self.decode_arguments(arguments)?;
        (self.function)(args).into_output()
    }

    /// Decodes the arguments directly, then as positional values in declaration order.
    ///
    /// The first decoding error is kept when both attempts fail.
    fn decode_arguments(&self, arguments: JsonValue) -> FunctionResult<A>
    where
        A: DeserializeOwned,
    {
        let err = match <A as serde::Deserialize>::deserialize(&arguments) {
            Ok(args) => return Ok(args),
            Err(err) => err,
        };
        let values = match arguments {
            JsonValue::Object(mut map) => self
                .signature
                .params()
                .iter()
                .map(|param| map.remove(&param.name).unwrap_or(JsonValue::Null))
                .collect(),
            JsonValue::Array(values) => values,
            _ => return Err(FunctionError::InvalidArguments(err.to_string())),
        };
        // A callable without parameters takes `()`, which only decodes from `null`.
        let positional = if values.is_empty() {
            JsonValue::Null
        } else {
            JsonValue::Array(values)
        };
        serde_json::from_value(positional)
            .map_err(|_| FunctionError::InvalidArguments(err.to_string()))
    }
}

impl<F, A, R> Function for GptFunction<F, A>
where
    F: Fn(A) -> R + Send + Sync,
    A: DeserializeOwned,
    R: FunctionOutput,
{
    fn name(&self) -> &str {
        self.signature.name()
    }

    fn description(&self) -> String {
        GptFunction::description(self)
    }

    fn schema(&self) -> FunctionResult<ToolSchema> {
        GptFunction::schema(self)
    }

    fn invoke(&self, arguments: JsonValue) -> FunctionResult<String> {
        self.invoke_json(arguments)
    }
}

impl<F, A> fmt::Debug for GptFunction<F, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GptFunction")
            .field("signature", &self.signature)
            .field("config", &self.config)
            .field("custom_parser", &self.parser.is_some())
            .finish_non_exhaustive()
    }
}

/// Wraps a callable as a GPT function.
#[inline]
pub fn gptfunction<F, A, R>(signature: Signature, function: F) -> GptFunction<F, A>
where
    F: Fn(A) -> R,
{
    GptFunction::new(signature, function)
}
