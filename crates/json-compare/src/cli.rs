//! Parse-and-compare seam for the `json-compare` binary.
//!
//! The engine only ever sees well-formed trees; both documents are parsed
//! here and a failure on either side is reported against that side.

use serde_json::Value;
use thiserror::Error;

use crate::report;
use json_compare_core::diff;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("document {alias} is not valid JSON: {source}")]
    InvalidJson {
        alias: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse both documents, run a full comparison, and render the text report.
pub fn run_compare(
    text_a: &str,
    text_b: &str,
    alias_a: &str,
    alias_b: &str,
) -> Result<String, CompareError> {
    let a = parse_document(text_a, alias_a)?;
    let b = parse_document(text_b, alias_b)?;
    let differences = diff(&a, &b);
    Ok(report::render(&differences, alias_a, alias_b))
}

fn parse_document(text: &str, alias: &str) -> Result<Value, CompareError> {
    serde_json::from_str(text.trim()).map_err(|source| CompareError::InvalidJson {
        alias: alias.to_string(),
        source,
    })
}
