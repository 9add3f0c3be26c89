//! Parse inference replies into extracted terms

use crate::error::ExtractorError;
use devglossary_domain::ExtractedTerm;
use serde_json::Value;
use tracing::warn;

/// Terms recovered from one reply
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedReply {
    /// Valid terms, in reply order
    pub terms: Vec<ExtractedTerm>,

    /// Records dropped because they failed validation
    pub rejected: usize,
}

/// Parse an inference reply into validated terms
///
/// The body must be a JSON array, optionally wrapped in a markdown code fence.
/// Individual records that fail validation are dropped and counted; only a
/// body that is not an array is an error.
pub fn parse_llm_response(response: &str) -> Result<ParsedReply, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let records = match json {
        Value::Array(records) => records,
        _ => {
            return Err(ExtractorError::InvalidFormat(
                "Expected JSON array".to_string(),
            ))
        }
    };

    let mut reply = ParsedReply::default();
    for (idx, record) in records.into_iter().enumerate() {
        match parse_term_json(record) {
            Ok(term) => reply.terms.push(term),
            Err(e) => {
                warn!("Dropping term {}: {}", idx, e);
                reply.rejected += 1;
            }
        }
    }

    Ok(reply)
}

/// Strip a surrounding markdown code fence, if any
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_term_json(record: Value) -> Result<ExtractedTerm, String> {
    if !record.is_object() {
        return Err("record is not a JSON object".to_string());
    }

    let term: ExtractedTerm = serde_json::from_value(record).map_err(|e| e.to_string())?;
    term.validate()?;
    Ok(term)
}
