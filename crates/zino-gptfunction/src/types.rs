//! Declared parameter types and the mapping into schema fragments.
//!
//! A [`DeclaredType`] is what the caller says a parameter is. A [`ParamType`] is one
//! of the closed set of categories a function calling schema can express.
//! [`ParamType::resolve`] bridges the two and is the only place where an
//! unsupported type is rejected.

use crate::error::{FunctionError, FunctionResult};
use crate::{JsonValue, Map};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The annotation declared for a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// A string.
    Str,
    /// An integer.
    Int,
    /// A floating point number.
    Float,
    /// A boolean.
    Bool,
    /// A homogeneous list.
    List(Box<DeclaredType>),
    /// A key-value map.
    Map,
    /// An optional value.
    Optional(Box<DeclaredType>),
    /// A closed set of literal values.
    Literal(Vec<JsonValue>),
    /// A named enumeration with the values of its members in declaration order.
    Enum {
        /// Enumeration name.
        name: String,
        /// Member values.
        values: Vec<JsonValue>,
    },
    /// Any other named type.
    Named(String),
}

impl DeclaredType {
    /// Creates a literal type from string choices.
    pub fn literal<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Literal(
            choices
                .into_iter()
                .map(|choice| JsonValue::String(choice.into()))
                .collect(),
        )
    }

    /// Creates a named enumeration from the string values of its members.
    pub fn string_enum<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            name: name.into(),
            values: values
                .into_iter()
                .map(|value| JsonValue::String(value.into()))
                .collect(),
        }
    }

    /// Creates a named type which is not known to the schema generator.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Str => f.write_str("str"),
            DeclaredType::Int => f.write_str("int"),
            DeclaredType::Float => f.write_str("float"),
            DeclaredType::Bool => f.write_str("bool"),
            DeclaredType::List(item) => write!(f, "list[{item}]"),
            DeclaredType::Map => f.write_str("map"),
            DeclaredType::Optional(inner) => write!(f, "optional[{inner}]"),
            DeclaredType::Literal(values) => {
                let values = values
                    .iter()
                    .map(|value| value.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "literal[{values}]")
            }
            DeclaredType::Enum { name, .. } => write!(f, "enum {name}"),
            DeclaredType::Named(name) => f.write_str(name),
        }
    }
}

/// Naming of the primitive types in generated schemas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeNaming {
    /// `"int"` and `"float"`.
    #[default]
    Short,
    /// `"integer"` and `"number"`, as JSON Schema spells them.
    JsonSchema,
}

/// A parameter type which can be expressed in a function calling schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// A string.
    String,
    /// An integer.
    Integer,
    /// A floating point number.
    Float,
    /// A string restricted to an ordered, non-empty set of choices.
    EnumeratedString(Vec<String>),
}

impl ParamType {
    /// Resolves a declared type into one of the supported categories.
    ///
    /// Literal sets and named enumerations both collapse into
    /// [`ParamType::EnumeratedString`]. They must be non-empty and hold only strings.
    pub fn resolve(declared: &DeclaredType) -> FunctionResult<Self> {
        match declared {
            DeclaredType::Str => Ok(ParamType::String),
            DeclaredType::Int => Ok(ParamType::Integer),
            DeclaredType::Float => Ok(ParamType::Float),
            DeclaredType::Literal(values) | DeclaredType::Enum { values, .. } => {
                string_values(values)
                    .map(ParamType::EnumeratedString)
                    .ok_or_else(|| FunctionError::UnsupportedType(declared.to_string()))
            }
            _ => Err(FunctionError::UnsupportedType(declared.to_string())),
        }
    }

    /// Returns the name used for the `type` field.
    pub fn type_name(&self, naming: TypeNaming) -> &'static str {
        match (self, naming) {
            (ParamType::String | ParamType::EnumeratedString(_), _) => "string",
            (ParamType::Integer, TypeNaming::Short) => "int",
            (ParamType::Integer, TypeNaming::JsonSchema) => "integer",
            (ParamType::Float, TypeNaming::Short) => "float",
            (ParamType::Float, TypeNaming::JsonSchema) => "number",
        }
    }

    /// Returns the schema fragment, i.e. the `type` field and the `enum` choices if any.
    pub fn fragment(&self, naming: TypeNaming) -> Map {
        let mut fragment = Map::new();
        fragment.insert("type".to_owned(), self.type_name(naming).into());
        if let ParamType::EnumeratedString(values) = self {
            fragment.insert("enum".to_owned(), values.clone().into());
        }
        fragment
    }
}

/// Maps a declared type to its schema fragment.
pub fn map_type(declared: &DeclaredType, naming: TypeNaming) -> FunctionResult<Map> {
    ParamType::resolve(declared).map(|param_type| param_type.fragment(naming))
}

fn string_values(values: &[JsonValue]) -> Option<Vec<String>> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .map(|value| value.as_str().map(|s| s.to_owned()))
        .collect()
}

/// Rust types which know their declared parameter type.
///
/// Use [`string_enum!`](crate::string_enum) to implement it for an enumeration.
pub trait TypeHint {
    /// Returns the declared type.
    fn type_hint() -> DeclaredType;
}

macro_rules! impl_type_hint {
    ($declared:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl TypeHint for $ty {
                #[inline]
                fn type_hint() -> DeclaredType {
                    $declared
                }
            }
        )+
    };
}

impl_type_hint!(DeclaredType::Str => String, &str, Box<str>);
impl_type_hint!(
    DeclaredType::Int =>
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);
impl_type_hint!(DeclaredType::Float => f32, f64);
impl_type_hint!(DeclaredType::Bool => bool);
impl_type_hint!(DeclaredType::Map => Map);

impl<T: TypeHint> TypeHint for Vec<T> {
    fn type_hint() -> DeclaredType {
        DeclaredType::List(Box::new(T::type_hint()))
    }
}

impl<T: TypeHint> TypeHint for Option<T> {
    fn type_hint() -> DeclaredType {
        DeclaredType::Optional(Box::new(T::type_hint()))
    }
}

impl<K, V, S> TypeHint for HashMap<K, V, S> {
    fn type_hint() -> DeclaredType {
        DeclaredType::Map
    }
}

impl<K, V> TypeHint for BTreeMap<K, V> {
    fn type_hint() -> DeclaredType {
        DeclaredType::Map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(declared: DeclaredType) -> JsonValue {
        map_type(&declared, TypeNaming::Short)
            .map(JsonValue::Object)
            .unwrap()
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(fragment(DeclaredType::Int), json!({"type": "int"}));
        assert_eq!(fragment(DeclaredType::Str), json!({"type": "string"}));
        assert_eq!(fragment(DeclaredType::Float), json!({"type": "float"}));
    }

    #[test]
    fn test_json_schema_naming() {
        let integer = map_type(&DeclaredType::Int, TypeNaming::JsonSchema).unwrap();
        let number = map_type(&DeclaredType::Float, TypeNaming::JsonSchema).unwrap();
        assert_eq!(JsonValue::Object(integer), json!({"type": "integer"}));
        assert_eq!(JsonValue::Object(number), json!({"type": "number"}));
    }

    #[test]
    fn test_literal_type() {
        let result = fragment(DeclaredType::literal(["one", "two", "three"]));
        assert_eq!(
            result,
            json!({"type": "string", "enum": ["one", "two", "three"]})
        );
    }

    #[test]
    fn test_enum_type() {
        let result = fragment(DeclaredType::string_enum("Number", ["one", "two", "three"]));
        assert_eq!(
            result,
            json!({"type": "string", "enum": ["one", "two", "three"]})
        );
    }

    #[test]
    fn test_enum_keeps_declaration_order() {
        let param_type = ParamType::resolve(&DeclaredType::literal(["y", "x"])).unwrap();
        assert_eq!(
            param_type,
            ParamType::EnumeratedString(vec!["y".to_owned(), "x".to_owned()])
        );
    }

    #[test]
    fn test_unsupported_types() {
        let unsupported = [
            DeclaredType::Map,
            DeclaredType::Bool,
            DeclaredType::List(Box::new(DeclaredType::Str)),
            DeclaredType::Optional(Box::new(DeclaredType::Int)),
            DeclaredType::named("Point"),
            DeclaredType::Literal(vec![]),
            DeclaredType::Literal(vec![json!(1), json!(2)]),
            DeclaredType::Enum {
                name: "Level".to_owned(),
                values: vec![json!("low"), json!(3)],
            },
        ];
        for declared in unsupported {
            let err = map_type(&declared, TypeNaming::Short).unwrap_err();
            assert!(
                matches!(&err, FunctionError::UnsupportedType(name) if *name == declared.to_string()),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_type_hints() {
        assert_eq!(String::type_hint(), DeclaredType::Str);
        assert_eq!(<&str>::type_hint(), DeclaredType::Str);
        assert_eq!(u8::type_hint(), DeclaredType::Int);
        assert_eq!(i64::type_hint(), DeclaredType::Int);
        assert_eq!(f32::type_hint(), DeclaredType::Float);
        assert_eq!(bool::type_hint(), DeclaredType::Bool);
        assert_eq!(
            Vec::<String>::type_hint(),
            DeclaredType::List(Box::new(DeclaredType::Str))
        );
        assert_eq!(HashMap::<String, i32>::type_hint(), DeclaredType::Map);
        assert_eq!(Option::<f64>::type_hint().to_string(), "optional[float]");
    }
}
