//! Merging parameter types with their documentation.

use crate::docstring::DocParam;
use crate::types::DeclaredType;
use std::collections::HashMap;
use std::fmt;

/// A parameter of a callable together with its documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRecord {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    pub declared: DeclaredType,
    /// Description, empty if the parameter is undocumented.
    pub description: String,
}

impl ParamRecord {
    /// Creates a new parameter record.
    pub fn new(
        name: impl Into<String>,
        declared: DeclaredType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared,
            description: description.into(),
        }
    }
}

/// Kinds of non-fatal issues found while extracting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The parameter has no documentation entry.
    MissingDocumentation,
}

/// A non-fatal issue found while extracting parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Kind of the issue.
    pub kind: DiagnosticKind,
    /// Name of the affected parameter.
    pub parameter: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::MissingDocumentation => write!(
                f,
                "function param `{}` has no docstring description; \
                    add a docstring description for more accurate use by GPT",
                self.parameter
            ),
        }
    }
}

/// Parameter records in declaration order, along with diagnostics.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Extraction {
    /// Parameter records.
    pub params: Vec<ParamRecord>,
    /// Diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

/// Combines the type annotations of a callable with its parameter documentation.
///
/// The output follows the order of `annotations`, not the order of `doc_params`.
/// A parameter without a documentation entry gets an empty description and a
/// [`DiagnosticKind::MissingDocumentation`] diagnostic. Parameters which are not
/// annotated can not appear in the output at all.
pub fn extract_params<'a, I>(annotations: I, doc_params: &[DocParam]) -> Extraction
where
    I: IntoIterator<Item = (&'a str, &'a DeclaredType)>,
{
    let keyed_doc_params = doc_params
        .iter()
        .map(|param| (param.arg_name.as_str(), param))
        .collect::<HashMap<_, _>>();

    let mut extraction = Extraction::default();
    for (name, declared) in annotations {
        let description = match keyed_doc_params.get(name) {
            Some(param) => param.description.clone(),
            None => {
                extraction.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::MissingDocumentation,
                    parameter: name.to_owned(),
                });
                String::new()
            }
        };
        extraction
            .params
            .push(ParamRecord::new(name, declared.clone(), description));
    }
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docstring;
    use crate::signature::Signature;

    #[test]
    fn test_function_with_no_params() {
        let signature = Signature::new("no_param_function").doc("I'm a function with no params!");
        let docstring = docstring::parse(signature.doc_text());
        let extraction = extract_params(signature.annotations(), &docstring.params);
        assert!(extraction.params.is_empty());
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_correct_function_parameters() {
        let signature = Signature::new("my_func")
            .doc(
                "
                I'm a function that does something!

                :param a: Param a does a thing.
                :param b: b description
                          spans multiple lines.
                :return: Something.
                ",
            )
            .typed::<i32>("a")
            .typed::<i32>("b")
            .returns_typed::<i32>();
        let docstring = docstring::parse(signature.doc_text());
        let extraction = extract_params(signature.annotations(), &docstring.params);
        assert_eq!(
            extraction.params,
            vec![
                ParamRecord::new("a", DeclaredType::Int, "Param a does a thing."),
                ParamRecord::new("b", DeclaredType::Int, "b description\nspans multiple lines."),
            ]
        );
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_undocumented_parameters() {
        let signature = Signature::new("my_func")
            .doc("Lol no docs for you")
            .typed::<i32>("a")
            .typed::<i32>("b");
        let docstring = docstring::parse(signature.doc_text());
        let extraction = extract_params(signature.annotations(), &docstring.params);
        assert_eq!(
            extraction.params,
            vec![
                ParamRecord::new("a", DeclaredType::Int, ""),
                ParamRecord::new("b", DeclaredType::Int, ""),
            ]
        );
        let undocumented = extraction
            .diagnostics
            .iter()
            .map(|diagnostic| (diagnostic.kind, diagnostic.parameter.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            undocumented,
            vec![
                (DiagnosticKind::MissingDocumentation, "a"),
                (DiagnosticKind::MissingDocumentation, "b"),
            ]
        );
    }

    #[test]
    fn test_params_without_type_annotations_are_dropped() {
        let signature = Signature::new("my_func")
            .doc(
                "I can write docstring but not type annotations.\n\n\
                :param a: Param a does a thing.\n\
                :param b: b description.",
            )
            .untyped("a")
            .untyped("b");
        let docstring = docstring::parse(signature.doc_text());
        let extraction = extract_params(signature.annotations(), &docstring.params);
        assert!(extraction.params.is_empty());
        assert!(extraction.diagnostics.is_empty());
    }

    #[test]
    fn test_declaration_order_wins_over_documentation_order() {
        let signature = Signature::new("f")
            .doc(":param b: B param\n:param a: A param")
            .typed::<i64>("a")
            .typed::<String>("b");
        let docstring = docstring::parse(signature.doc_text());
        let extraction = extract_params(signature.annotations(), &docstring.params);
        let names = extraction
            .params
            .iter()
            .map(|param| param.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(extraction.params[0].description, "A param");
    }
}
