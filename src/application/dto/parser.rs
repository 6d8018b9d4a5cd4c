// src/application/dto/parser.rs
// Parsers for IR documents

use crate::domain::model::IntermediateRepresentation;

/// Parse IR JSON. A surrounding Markdown code fence is tolerated.
pub fn parse_ir(text: &str) -> Result<IntermediateRepresentation, serde_json::Error> {
    serde_json::from_str(strip_code_fence(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // drop the info string (e.g. "json") on the opening line
    let body = body.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
    body.strip_suffix("```").unwrap_or(body).trim()
}
