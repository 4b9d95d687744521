//! Structured documentation parsing.
//!
//! A function's documentation yields a short description for the schema and one
//! description per parameter. Two layouts are understood out of the box:
//!
//! ```text
//! Outputs a user's name and age to the console.
//!
//! :param name: The name of the user.
//! :param age: The age of the user.
//! ```
//!
//! and
//!
//! ```text
//! Outputs a user's name and age to the console.
//!
//! Args:
//!     name (str): The name of the user.
//!     age (int): The age of the user.
//! ```
//!
//! Other layouts can be supported by implementing [`DocParser`].

use serde::{Deserialize, Serialize};

/// Keywords introducing a parameter entry in reStructuredText field lists.
const PARAM_KEYWORDS: [&str; 6] = ["param", "parameter", "arg", "argument", "key", "keyword"];

/// Keywords introducing the return value entry.
const RETURNS_KEYWORDS: [&str; 2] = ["return", "returns"];

/// Keywords introducing an exception entry.
const RAISES_KEYWORDS: [&str; 4] = ["raises", "raise", "except", "exception"];

/// Parsed documentation of a function.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Docstring {
    /// First line of the description block.
    pub short_description: Option<String>,
    /// Remainder of the description block.
    pub long_description: Option<String>,
    /// Parameter entries in documentation order.
    pub params: Vec<DocParam>,
    /// The return value entry.
    pub returns: Option<DocReturns>,
    /// Exception entries.
    pub raises: Vec<DocRaises>,
}

impl Docstring {
    /// Returns the entry documenting the parameter with the given name.
    pub fn param(&self, name: &str) -> Option<&DocParam> {
        self.params.iter().rev().find(|param| param.arg_name == name)
    }

    fn set_description(&mut self, text: &str) {
        let mut parts = text.splitn(2, '\n');
        self.short_description = parts
            .next()
            .map(|line| line.trim_end())
            .filter(|line| !line.is_empty())
            .map(|line| line.to_owned());
        self.long_description = parts
            .next()
            .map(|rest| rest.trim())
            .filter(|rest| !rest.is_empty())
            .map(|rest| rest.to_owned());
    }
}

/// Documentation of a single parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParam {
    /// Parameter name.
    pub arg_name: String,
    /// Type name written in the documentation, if any.
    pub type_name: Option<String>,
    /// Description, with continuation lines joined by `\n`.
    pub description: String,
}

impl DocParam {
    /// Creates a new parameter entry without a type name.
    pub fn new(arg_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            arg_name: arg_name.into(),
            type_name: None,
            description: description.into(),
        }
    }
}

/// Documentation of the return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocReturns {
    /// Type name written in the documentation, if any.
    pub type_name: Option<String>,
    /// Description.
    pub description: String,
}

/// Documentation of a raised error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRaises {
    /// Error type name, if any.
    pub type_name: Option<String>,
    /// Description.
    pub description: String,
}

/// Parser turning raw documentation text into a [`Docstring`].
pub trait DocParser: Send + Sync {
    /// Parses the documentation text. Parsing is lenient and never fails.
    fn parse(&self, text: &str) -> Docstring;
}

/// Built-in documentation layouts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocstringStyle {
    /// Detects the layout from the text.
    #[default]
    Auto,
    /// reStructuredText field lists.
    Rest,
    /// Google style sections.
    Google,
}

impl DocstringStyle {
    /// Detects the layout of the documentation text.
    pub fn detect(text: &str) -> Self {
        if text.lines().any(|line| line.trim_start().starts_with(':')) {
            DocstringStyle::Rest
        } else if text
            .lines()
            .any(|line| GoogleSection::from_header(line.trim()).is_some())
        {
            DocstringStyle::Google
        } else {
            DocstringStyle::Rest
        }
    }
}

impl DocParser for DocstringStyle {
    fn parse(&self, text: &str) -> Docstring {
        match self {
            DocstringStyle::Auto => Self::detect(text).parse(text),
            DocstringStyle::Rest => RestParser.parse(text),
            DocstringStyle::Google => GoogleParser.parse(text),
        }
    }
}

/// Parses the documentation text, detecting its layout.
pub fn parse(text: &str) -> Docstring {
    DocstringStyle::Auto.parse(text)
}

/// Parser for reStructuredText field lists such as `:param name: text`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RestParser;

impl DocParser for RestParser {
    fn parse(&self, text: &str) -> Docstring {
        let text = cleandoc(text);
        let mut docstring = Docstring::default();
        let meta_start = line_starts(&text).find(|&start| text[start..].starts_with(':'));
        let (description, meta) = match meta_start {
            Some(start) => text.split_at(start),
            None => (text.as_str(), ""),
        };
        docstring.set_description(description);

        let starts = line_starts(meta)
            .filter(|&start| meta[start..].starts_with(':'))
            .collect::<Vec<_>>();
        let mut param_types = Vec::new();
        let mut return_type = None;
        for (index, &start) in starts.iter().enumerate() {
            let end = starts.get(index + 1).copied().unwrap_or(meta.len());
            let field = meta[start..end].trim_start_matches(':');
            let Some((args, description)) = field.split_once(':') else {
                continue;
            };
            let args = args.split_whitespace().collect::<Vec<_>>();
            let description = join_description(description);
            match args.as_slice() {
                [keyword, name] if PARAM_KEYWORDS.contains(keyword) => {
                    docstring.params.push(DocParam::new(*name, description));
                }
                [keyword, type_name, name] if PARAM_KEYWORDS.contains(keyword) => {
                    docstring.params.push(DocParam {
                        arg_name: (*name).to_owned(),
                        type_name: Some((*type_name).to_owned()),
                        description,
                    });
                }
                ["type", name] => param_types.push(((*name).to_owned(), description)),
                ["rtype"] => return_type = Some(description),
                [keyword] if RETURNS_KEYWORDS.contains(keyword) => {
                    docstring.returns = Some(DocReturns {
                        type_name: None,
                        description,
                    });
                }
                [keyword, type_name] if RETURNS_KEYWORDS.contains(keyword) => {
                    docstring.returns = Some(DocReturns {
                        type_name: Some((*type_name).to_owned()),
                        description,
                    });
                }
                [keyword] if RAISES_KEYWORDS.contains(keyword) => {
                    docstring.raises.push(DocRaises {
                        type_name: None,
                        description,
                    });
                }
                [keyword, type_name] if RAISES_KEYWORDS.contains(keyword) => {
                    docstring.raises.push(DocRaises {
                        type_name: Some((*type_name).to_owned()),
                        description,
                    });
                }
                _ => {}
            }
        }

        for (name, type_name) in param_types {
            let param = docstring
                .params
                .iter_mut()
                .find(|param| param.arg_name == name && param.type_name.is_none());
            if let Some(param) = param {
                param.type_name = Some(type_name);
            }
        }
        if let Some(type_name) = return_type {
            let returns = docstring.returns.get_or_insert_with(|| DocReturns {
                type_name: None,
                description: String::new(),
            });
            returns.type_name.get_or_insert(type_name);
        }
        docstring
    }
}

/// Section headers understood by [`GoogleParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoogleSection {
    Args,
    Returns,
    Raises,
    Other,
}

impl GoogleSection {
    fn from_header(line: &str) -> Option<Self> {
        let title = line.strip_suffix(':')?.trim_end();
        match title {
            "Args" | "Arguments" | "Parameters" | "Params" => Some(GoogleSection::Args),
            "Returns" | "Return" | "Yields" | "Yield" => Some(GoogleSection::Returns),
            "Raises" | "Exceptions" | "Except" => Some(GoogleSection::Raises),
            "Attributes" | "Example" | "Examples" | "Note" | "Notes" | "Todo" => {
                Some(GoogleSection::Other)
            }
            _ => None,
        }
    }
}

/// Parser for Google style sections such as `Args:`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoogleParser;

impl DocParser for GoogleParser {
    fn parse(&self, text: &str) -> Docstring {
        let text = cleandoc(text);
        let lines = text.lines().collect::<Vec<_>>();
        let sections = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| GoogleSection::from_header(line).map(|kind| (index, kind)))
            .collect::<Vec<_>>();

        let mut docstring = Docstring::default();
        let description_end = sections.first().map_or(lines.len(), |&(index, _)| index);
        docstring.set_description(&lines[..description_end].join("\n"));

        for (position, &(index, kind)) in sections.iter().enumerate() {
            let end = sections
                .get(position + 1)
                .map_or(lines.len(), |&(next, _)| next);
            let body = &lines[index + 1..end];
            match kind {
                GoogleSection::Args => {
                    for item in split_items(body) {
                        let Some((key, description)) = item.split_once(':') else {
                            continue;
                        };
                        let (name, type_name) = split_typed_name(key);
                        docstring.params.push(DocParam {
                            arg_name: name,
                            type_name,
                            description: join_description(description),
                        });
                    }
                }
                GoogleSection::Returns => {
                    let item = cleandoc(&body.join("\n"));
                    if item.is_empty() {
                        continue;
                    }
                    let returns = match item.split_once(':') {
                        Some((type_name, description))
                            if !type_name.trim().is_empty()
                                && !type_name.trim().contains(char::is_whitespace) =>
                        {
                            DocReturns {
                                type_name: Some(type_name.trim().to_owned()),
                                description: join_description(description),
                            }
                        }
                        _ => DocReturns {
                            type_name: None,
                            description: join_description(&item),
                        },
                    };
                    docstring.returns = Some(returns);
                }
                GoogleSection::Raises => {
                    for item in split_items(body) {
                        let raises = match item.split_once(':') {
                            Some((type_name, description)) => DocRaises {
                                type_name: Some(type_name.trim().to_owned()),
                                description: join_description(description),
                            },
                            None => DocRaises {
                                type_name: None,
                                description: join_description(&item),
                            },
                        };
                        docstring.raises.push(raises);
                    }
                }
                GoogleSection::Other => {}
            }
        }
        docstring
    }
}

/// Splits a section body into items starting at the body's indentation.
fn split_items(body: &[&str]) -> Vec<String> {
    let Some(indent) = body
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| indentation(line))
    else {
        return Vec::new();
    };

    let mut items: Vec<Vec<&str>> = Vec::new();
    for &line in body {
        if line.trim().is_empty() || indentation(line) != indent {
            if let Some(item) = items.last_mut() {
                item.push(line);
            }
        } else {
            items.push(vec![&line[indent..]]);
        }
    }
    items.into_iter().map(|item| item.join("\n")).collect()
}

/// Splits `name (type)` into the name and the type.
fn split_typed_name(key: &str) -> (String, Option<String>) {
    let key = key.trim();
    if let Some(open) = key.find('(') {
        if let Some(inner) = key[open + 1..].strip_suffix(')') {
            let type_name = inner.trim();
            let type_name = (!type_name.is_empty()).then(|| type_name.to_owned());
            return (key[..open].trim().to_owned(), type_name);
        }
    }
    (key.to_owned(), None)
}

/// Joins a description whose continuation lines are indented.
fn join_description(text: &str) -> String {
    let text = text.trim();
    match text.split_once('\n') {
        Some((first, rest)) => format!("{}\n{}", first.trim_end(), cleandoc(rest)),
        None => text.to_owned(),
    }
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').map(|(index, _)| index + 1))
}

/// Cleans up indentation of documentation text.
///
/// Leading whitespace of the first line is removed, the common indentation of the
/// remaining lines is removed, and leading and trailing blank lines are dropped.
pub fn cleandoc(text: &str) -> String {
    let text = text.replace('\t', "        ");
    let margin = text
        .lines()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(indentation)
        .min()
        .unwrap_or(0);
    let lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                line.trim_start()
            } else if line.trim().is_empty() {
                ""
            } else {
                &line[margin..]
            }
        })
        .map(|line| line.trim_end())
        .collect::<Vec<_>>();
    let start = lines.iter().position(|line| !line.is_empty());
    let end = lines.iter().rposition(|line| !line.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleandoc() {
        let text = "\n    First line.\n\n      indented\n    back\n\n";
        assert_eq!(cleandoc(text), "First line.\n\n  indented\nback");
        assert_eq!(cleandoc("   "), "");
        assert_eq!(cleandoc(" Single"), "Single");
    }

    #[test]
    fn test_rest_docstring() {
        let doc = r#"
            I'm a function that does something!

            It has a longer explanation.

            :param a: Param a does a thing.
            :param b: b description
                      spans multiple lines.
            :return: Something.
            "#;
        let docstring = RestParser.parse(doc);
        assert_eq!(
            docstring.short_description.as_deref(),
            Some("I'm a function that does something!")
        );
        assert_eq!(
            docstring.long_description.as_deref(),
            Some("It has a longer explanation.")
        );
        assert_eq!(
            docstring.params,
            vec![
                DocParam::new("a", "Param a does a thing."),
                DocParam::new("b", "b description\nspans multiple lines."),
            ]
        );
        assert_eq!(
            docstring.returns.map(|returns| returns.description),
            Some("Something.".to_owned())
        );
    }

    #[test]
    fn test_rest_typed_fields() {
        let doc = "Adds numbers.\n\n:param int a: First.\n:param b: Second.\n:type b: float\n:rtype: float\n:raises ValueError: On overflow.";
        let docstring = RestParser.parse(doc);
        assert_eq!(docstring.params[0].type_name.as_deref(), Some("int"));
        assert_eq!(docstring.params[1].type_name.as_deref(), Some("float"));
        let returns = docstring.returns.unwrap();
        assert_eq!(returns.type_name.as_deref(), Some("float"));
        assert_eq!(returns.description, "");
        assert_eq!(
            docstring.raises,
            vec![DocRaises {
                type_name: Some("ValueError".to_owned()),
                description: "On overflow.".to_owned(),
            }]
        );
    }

    #[test]
    fn test_undocumented() {
        let docstring = parse("\n    Lol no docs for you\n    ");
        assert_eq!(docstring.short_description.as_deref(), Some("Lol no docs for you"));
        assert!(docstring.long_description.is_none());
        assert!(docstring.params.is_empty());

        assert_eq!(parse(""), Docstring::default());
    }

    #[test]
    fn test_google_docstring() {
        let doc = r#"
            Fetches rows from a table.

            Args:
                table (str): Name of the table.
                limit (int): Maximum number of rows
                    to return.
                verbose: Whether to log.

            Returns:
                list: The rows.

            Raises:
                IOError: An error occurred.
            "#;
        assert_eq!(DocstringStyle::detect(doc), DocstringStyle::Google);

        let docstring = parse(doc);
        assert_eq!(
            docstring.short_description.as_deref(),
            Some("Fetches rows from a table.")
        );
        assert_eq!(
            docstring.params,
            vec![
                DocParam {
                    arg_name: "table".to_owned(),
                    type_name: Some("str".to_owned()),
                    description: "Name of the table.".to_owned(),
                },
                DocParam {
                    arg_name: "limit".to_owned(),
                    type_name: Some("int".to_owned()),
                    description: "Maximum number of rows\nto return.".to_owned(),
                },
                DocParam::new("verbose", "Whether to log."),
            ]
        );
        assert_eq!(
            docstring.returns,
            Some(DocReturns {
                type_name: Some("list".to_owned()),
                description: "The rows.".to_owned(),
            })
        );
        assert_eq!(docstring.raises[0].type_name.as_deref(), Some("IOError"));
    }

    #[test]
    fn test_detect_style() {
        assert_eq!(DocstringStyle::detect(":param a: A"), DocstringStyle::Rest);
        assert_eq!(DocstringStyle::detect("Plain text."), DocstringStyle::Rest);
        assert_eq!(
            DocstringStyle::detect("Does X.\n\nArgs:\n    a: A"),
            DocstringStyle::Google
        );
    }

    #[test]
    fn test_last_entry_wins() {
        let docstring = parse(":param a: first\n:param a: second");
        assert_eq!(
            docstring.param("a").map(|param| param.description.as_str()),
            Some("second")
        );
    }
}
