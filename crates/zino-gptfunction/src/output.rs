//! Coercing function results into text.
//!
//! Function calling APIs expect a single string per call. A result is coerced in
//! a fixed order: a string is kept as is, a value with a textual representation is
//! rendered, and anything else becomes an empty string.

use crate::JsonValue;
use crate::error::{BoxError, FunctionError, FunctionResult};
use std::borrow::Cow;
use std::fmt;

/// Outcome of coercing a result into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutput {
    /// The result is already a string.
    Native(String),
    /// The textual representation of the result.
    Rendered(String),
    /// The result has no textual representation.
    Empty,
}

impl TextOutput {
    /// Returns the text, which is empty for [`TextOutput::Empty`].
    pub fn into_string(self) -> String {
        match self {
            TextOutput::Native(text) | TextOutput::Rendered(text) => text,
            TextOutput::Empty => String::new(),
        }
    }
}

impl From<TextOutput> for String {
    #[inline]
    fn from(output: TextOutput) -> Self {
        output.into_string()
    }
}

/// Values which can be returned to a function calling API.
pub trait IntoText {
    /// Coerces the value into text.
    fn into_text(self) -> TextOutput;
}

impl IntoText for String {
    #[inline]
    fn into_text(self) -> TextOutput {
        TextOutput::Native(self)
    }
}

impl IntoText for &str {
    #[inline]
    fn into_text(self) -> TextOutput {
        TextOutput::Native(self.to_owned())
    }
}

impl IntoText for Cow<'_, str> {
    #[inline]
    fn into_text(self) -> TextOutput {
        TextOutput::Native(self.into_owned())
    }
}

impl IntoText for () {
    #[inline]
    fn into_text(self) -> TextOutput {
        TextOutput::Empty
    }
}

impl<T: IntoText> IntoText for Option<T> {
    fn into_text(self) -> TextOutput {
        match self {
            Some(value) => value.into_text(),
            None => TextOutput::Empty,
        }
    }
}

impl IntoText for JsonValue {
    fn into_text(self) -> TextOutput {
        match self {
            JsonValue::String(text) => TextOutput::Native(text),
            JsonValue::Null => TextOutput::Empty,
            value => TextOutput::Rendered(value.to_string()),
        }
    }
}

macro_rules! impl_rendered_text {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoText for $ty {
                #[inline]
                fn into_text(self) -> TextOutput {
                    TextOutput::Rendered(self.to_string())
                }
            }
        )+
    };
}

impl_rendered_text!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

/// A wrapper rendering any [`Display`](fmt::Display) value as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> IntoText for Displayed<T> {
    #[inline]
    fn into_text(self) -> TextOutput {
        TextOutput::Rendered(self.0.to_string())
    }
}

/// Coerces a function result into a string.
#[inline]
pub fn coerce<T: IntoText>(result: T) -> String {
    result.into_text().into_string()
}

/// Results of callables invoked through the type-erased [`Function`](crate::Function) trait.
///
/// Plain values are coerced with [`IntoText`]. The error of a `Result` is returned
/// as [`FunctionError::Execution`] without being inspected.
pub trait FunctionOutput {
    /// Converts the result into text or the callable's error.
    fn into_output(self) -> FunctionResult<String>;
}

impl<T: IntoText> FunctionOutput for T {
    #[inline]
    fn into_output(self) -> FunctionResult<String> {
        Ok(coerce(self))
    }
}

impl<T, E> FunctionOutput for Result<T, E>
where
    T: IntoText,
    E: Into<BoxError>,
{
    fn into_output(self) -> FunctionResult<String> {
        self.map(coerce)
            .map_err(|err| FunctionError::Execution(err.into()))
    }
}
