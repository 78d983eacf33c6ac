//! ADF JSON format
//!
//! The stored representation itself. Parsing is tolerant about everything
//! below the root (see [`crate::ir::json`]) but insists on a `doc` root, since
//! anything else is not a description at all.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::json::is_adf_document;
use crate::ir::nodes::Document;
use serde_json::Value;
use std::collections::HashMap;

/// Format implementation for ADF JSON
pub struct AdfFormat;

impl Format for AdfFormat {
    fn name(&self) -> &str {
        "adf"
    }

    fn description(&self) -> &str {
        "Atlassian Document Format (JSON)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json", "adf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let value: Value = serde_json::from_str(source)?;
        if !is_adf_document(&value) {
            return Err(FormatError::ParseError(
                "expected a root object with \"type\": \"doc\"".to_string(),
            ));
        }
        Ok(Document::from_value(&value))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.to_json_pretty())
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut pretty = true;
        for (key, value) in options {
            match (key.as_str(), value.as_str()) {
                ("pretty", "true") => pretty = true,
                ("pretty", "false") => pretty = false,
                ("pretty", other) => {
                    return Err(FormatError::SerializationError(format!(
                        "Invalid value for 'pretty': {other}"
                    )))
                }
                (other, _) => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'adf' has no option '{other}'"
                    )))
                }
            }
        }
        Ok(if pretty { doc.to_json_pretty() } else { doc.to_json() })
    }
}
