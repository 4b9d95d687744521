//! Explicit parameter tables for wrapped callables.

use crate::types::{DeclaredType, TypeHint};

/// A declared parameter of a callable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Declared type. Parameters without one are left out of the schema.
    pub declared: Option<DeclaredType>,
}

/// Name, documentation and parameter types of a callable.
///
/// # Example
/// ```
/// use zino_gptfunction::{DeclaredType, Signature};
///
/// let signature = Signature::new("output_user")
///     .doc("Outputs a user's name and age.\n\n:param name: The name of the user.")
///     .typed::<String>("name")
///     .typed::<u32>("age")
///     .param("mode", DeclaredType::literal(["short", "long"]));
///
/// assert_eq!(signature.annotations().count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    /// Callable name.
    name: String,
    /// Raw documentation.
    doc: String,
    /// Parameters in declaration order.
    params: Vec<ParamDecl>,
    /// Return type.
    returns: Option<DeclaredType>,
}

impl Signature {
    /// Creates a new signature without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            params: Vec::new(),
            returns: None,
        }
    }

    /// Sets the raw documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    /// Declares a parameter with the given type.
    ///
    /// Declaring an existing name again replaces its type and keeps its position.
    #[must_use]
    pub fn param(self, name: impl Into<String>, declared: DeclaredType) -> Self {
        self.declare(name.into(), Some(declared))
    }

    /// Declares a parameter whose type is derived from a Rust type.
    #[must_use]
    pub fn typed<T: TypeHint>(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), Some(T::type_hint()))
    }

    /// Declares a parameter without a type.
    #[must_use]
    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), None)
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, declared: DeclaredType) -> Self {
        self.returns = Some(declared);
        self
    }

    /// Sets the return type derived from a Rust type.
    #[must_use]
    pub fn returns_typed<T: TypeHint>(self) -> Self {
        self.returns(T::type_hint())
    }

    fn declare(mut self, name: String, declared: Option<DeclaredType>) -> Self {
        match self.params.iter_mut().find(|param| param.name == name) {
            Some(param) => param.declared = declared,
            None => self.params.push(ParamDecl { name, declared }),
        }
        self
    }

    /// Returns the callable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw documentation.
    #[inline]
    pub fn doc_text(&self) -> &str {
        &self.doc
    }

    /// Returns all declared parameters, typed or not.
    #[inline]
    pub fn params(&self) -> &[ParamDecl] {
        &self.params
    }

    /// Returns the return type.
    #[inline]
    pub fn return_type(&self) -> Option<&DeclaredType> {
        self.returns.as_ref()
    }

    /// Returns the typed parameters in declaration order.
    ///
    /// The return type is never part of the annotations.
    pub fn annotations(&self) -> impl Iterator<Item = (&str, &DeclaredType)> {
        self.params.iter().filter_map(|param| {
            param
                .declared
                .as_ref()
                .map(|declared| (param.name.as_str(), declared))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotations_skip_untyped() {
        let signature = Signature::new("f")
            .untyped("a")
            .typed::<i32>("b")
            .untyped("c")
            .returns_typed::<i32>();
        let annotations = signature.annotations().collect::<Vec<_>>();
        assert_eq!(annotations, vec![("b", &DeclaredType::Int)]);
        assert_eq!(signature.params().len(), 3);
        assert_eq!(signature.return_type(), Some(&DeclaredType::Int));
    }

    #[test]
    fn test_redeclared_param_keeps_position() {
        let signature = Signature::new("f")
            .typed::<i32>("a")
            .typed::<String>("b")
            .typed::<f64>("a");
        let annotations = signature.annotations().collect::<Vec<_>>();
        assert_eq!(
            annotations,
            vec![("a", &DeclaredType::Float), ("b", &DeclaredType::Str)]
        );
    }

    #[test]
    fn test_param_named_return() {
        let signature = Signature::new("f")
            .typed::<String>("return")
            .returns(DeclaredType::Int);
        let names = signature
            .annotations()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["return"]);
    }
}
