//! Schema generation configuration.
//!
//! The configuration can be embedded in an application's TOML file:
//!
//! ```toml
//! [gptfunction]
//! type-naming = "json-schema"
//! docstring-style = "rest"
//! warn-missing-docs = false
//! ```

use crate::docstring::DocstringStyle;
use crate::error::FunctionResult;
use crate::types::TypeNaming;
use serde::{Deserialize, Serialize};

/// Configuration for GPT functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FunctionConfig {
    /// Naming of primitive types in schemas.
    pub type_naming: TypeNaming,
    /// Layout of the documentation.
    pub docstring_style: DocstringStyle,
    /// Whether to emit a warning for each undocumented parameter.
    pub warn_missing_docs: bool,
}

impl FunctionConfig {
    /// Creates default configuration.
    pub fn new() -> Self {
        Self {
            type_naming: TypeNaming::Short,
            docstring_style: DocstringStyle::Auto,
            warn_missing_docs: true,
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> FunctionResult<Self> {
        toml::from_str(s).map_err(Into::into)
    }

    /// Parses configuration from a `[gptfunction]` table of a TOML document.
    ///
    /// Returns the default configuration if the table does not exist.
    pub fn from_toml_section(s: &str) -> FunctionResult<Self> {
        #[derive(Deserialize)]
        struct Document {
            #[serde(default)]
            gptfunction: FunctionConfig,
        }

        let document: Document = toml::from_str(s)?;
        Ok(document.gptfunction)
    }

    /// Sets the naming of primitive types.
    #[must_use]
    pub fn with_type_naming(mut self, naming: TypeNaming) -> Self {
        self.type_naming = naming;
        self
    }

    /// Sets the documentation layout.
    #[must_use]
    pub fn with_docstring_style(mut self, style: DocstringStyle) -> Self {
        self.docstring_style = style;
        self
    }

    /// Disables warnings for undocumented parameters.
    #[must_use]
    pub fn without_doc_warnings(mut self) -> Self {
        self.warn_missing_docs = false;
        self
    }

    /// Get configuration summary.
    pub fn summary(&self) -> String {
        format!(
            "type_naming={:?}, docstring_style={:?}, warn_missing_docs={}",
            self.type_naming, self.docstring_style, self.warn_missing_docs
        )
    }
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FunctionError;

    #[test]
    fn test_default_config() {
        let config = FunctionConfig::from_toml_str("").unwrap();
        assert_eq!(config, FunctionConfig::default());
        assert_eq!(
            config.summary(),
            "type_naming=Short, docstring_style=Auto, warn_missing_docs=true"
        );
    }

    #[test]
    fn test_toml_config() {
        let config = FunctionConfig::from_toml_str(
            r#"
            type-naming = "json-schema"
            docstring-style = "google"
            warn-missing-docs = false
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            FunctionConfig::new()
                .with_type_naming(TypeNaming::JsonSchema)
                .with_docstring_style(DocstringStyle::Google)
                .without_doc_warnings()
        );
    }

    #[test]
    fn test_toml_section() {
        let config = FunctionConfig::from_toml_section(
            r#"
            name = "demo"

            [gptfunction]
            docstring-style = "rest"
            "#,
        )
        .unwrap();
        assert_eq!(config.docstring_style, DocstringStyle::Rest);
        assert!(config.warn_missing_docs);

        let config = FunctionConfig::from_toml_section("name = \"demo\"").unwrap();
        assert_eq!(config, FunctionConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let result = FunctionConfig::from_toml_str("type-naming = \"long\"");
        assert!(matches!(result, Err(FunctionError::Config(_))));
    }
}
