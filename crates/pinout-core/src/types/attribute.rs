//! Attribute definitions for the extraction catalog.

use serde::{Deserialize, Serialize};

/// A single extractable attribute of a connector part.
///
/// Each attribute carries two instruction texts: one tuned for cleaned
/// website data and one tuned for document context retrieved from PDFs.
/// The `allowed_values` dictionary constrains document extraction to a
/// closed vocabulary; attributes with an empty dictionary are free-form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Canonical attribute key, e.g. "Gender" or "Max. Working Temperature [°C]".
    pub key: String,
    /// Extraction instructions for the web stage.
    pub web_instructions: String,
    /// Extraction instructions for the document stages.
    pub pdf_instructions: String,
    /// Closed dictionary of values the document stages may answer with.
    #[serde(default)]
    pub allowed_values: Vec<String>,
}

impl AttributeSpec {
    /// Create a new attribute definition.
    pub fn new(
        key: impl Into<String>,
        web_instructions: impl Into<String>,
        pdf_instructions: impl Into<String>,
        allowed_values: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            web_instructions: web_instructions.into(),
            pdf_instructions: pdf_instructions.into(),
            allowed_values,
        }
    }

    /// Whether this attribute restricts answers to a closed dictionary.
    pub fn has_dictionary(&self) -> bool {
        !self.allowed_values.is_empty()
    }

    /// Render the dictionary as a JSON list for prompt interpolation.
    ///
    /// Attributes without a dictionary render as an empty list, which the
    /// template instructions treat as "no restriction".
    pub fn dictionary_block(&self) -> String {
        serde_json::Value::from(self.allowed_values.clone()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_block_renders_json_list() {
        let attr = AttributeSpec::new(
            "Gender",
            "web",
            "pdf",
            vec!["Female".to_string(), "Male".to_string()],
        );
        assert!(attr.has_dictionary());
        assert_eq!(attr.dictionary_block(), r#"["Female","Male"]"#);
    }

    #[test]
    fn test_empty_dictionary_is_free_form() {
        let attr = AttributeSpec::new("Length [MM]", "web", "pdf", vec![]);
        assert!(!attr.has_dictionary());
        assert_eq!(attr.dictionary_block(), "[]");
    }
}
