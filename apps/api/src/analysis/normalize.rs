//! Response Normalizer — coerces the model's loosely-typed completion into a
//! strict [`AnalysisResult`]. The contract is explicit: normalization never
//! fails, every field falls back to its documented default independently, and
//! the degraded branches are observable through [`Outcome`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder summary when the completion is not parseable JSON at all.
pub const UNPARSEABLE_SUMMARY: &str = "The resume content could not be analyzed.";
/// Placeholder suggestions when the completion is not parseable JSON at all.
pub const UNPARSEABLE_IMPROVE: &str =
    "The analysis service returned an unreadable response. Try uploading the resume again.";
/// Placeholder when the model omits or mistypes `summary`.
pub const SUMMARY_PLACEHOLDER: &str = "No summary available.";
/// Placeholder when the model omits or mistypes `improve`.
pub const IMPROVE_PLACEHOLDER: &str = "No suggestions available.";

/// The only domain entity: one analyzed resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    /// Detected skill tokens, in the order the model returned them.
    pub skills: Vec<String>,
    pub email: Option<String>,
    /// The model promises [0, 100] but out-of-range values pass through
    /// unclamped; clamping is a product decision that has not been made.
    pub score: f64,
    /// Newline-delimited suggestions, stored as a single string.
    pub improve: String,
}

/// How the normalizer arrived at its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The completion parsed and every field had the expected type.
    Clean,
    /// The completion parsed but the named fields were substituted with
    /// their defaults.
    FieldsDefaulted(Vec<&'static str>),
    /// The completion was not a JSON object; the canned fallback was used.
    Unparseable,
}

/// A normalized completion. The result is always fully typed; the outcome
/// lets callers distinguish "model understood the resume" from "model output
/// was unusable and defaults were substituted".
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub result: AnalysisResult,
    pub outcome: Outcome,
}

impl Normalized {
    pub fn is_degraded(&self) -> bool {
        self.outcome != Outcome::Clean
    }
}

/// Normalizes a raw model completion. Never fails, regardless of how
/// malformed the completion is.
pub fn normalize_completion(raw: &str) -> Normalized {
    let body = strip_code_fences(raw);

    let object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::warn!("Model completion parsed as JSON but is not an object: {other}");
            return unparseable_fallback();
        }
        Err(e) => {
            tracing::warn!("Model completion is not valid JSON ({e}); substituting fallback");
            return unparseable_fallback();
        }
    };

    let mut defaulted: Vec<&'static str> = Vec::new();

    let summary = match object.get("summary").and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => {
            defaulted.push("summary");
            SUMMARY_PLACEHOLDER.to_string()
        }
    };

    // Elements are not individually validated: non-string entries are carried
    // via their JSON rendering rather than dropped.
    let skills = match object.get("skills").and_then(Value::as_array) {
        Some(items) => items.iter().map(value_to_text).collect(),
        None => {
            defaulted.push("skills");
            Vec::new()
        }
    };

    // Both a legitimate null and a wrong type map to None; only the wrong
    // type counts as a substitution.
    let email = match object.get("email") {
        Some(Value::String(s)) => Some(s.clone()),
        None | Some(Value::Null) => None,
        Some(_) => {
            defaulted.push("email");
            None
        }
    };

    // No clamping to [0, 100]: an out-of-range score passes through as-is.
    let score = match object.get("score").and_then(Value::as_f64) {
        Some(n) => n,
        None => {
            defaulted.push("score");
            0.0
        }
    };

    let improve = match object.get("improve") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => {
            defaulted.push("improve");
            IMPROVE_PLACEHOLDER.to_string()
        }
    };

    let outcome = if defaulted.is_empty() {
        Outcome::Clean
    } else {
        Outcome::FieldsDefaulted(defaulted)
    };

    Normalized {
        result: AnalysisResult {
            summary,
            skills,
            email,
            score,
            improve,
        },
        outcome,
    }
}

fn unparseable_fallback() -> Normalized {
    Normalized {
        result: AnalysisResult {
            summary: UNPARSEABLE_SUMMARY.to_string(),
            skills: Vec::new(),
            email: None,
            score: 0.0,
            improve: UNPARSEABLE_IMPROVE.to_string(),
        },
        outcome: Outcome::Unparseable,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Strips a leading "```json" (case-insensitive) or bare "```" marker and a
/// trailing "```" marker. The model sometimes wraps its JSON in markdown
/// fencing despite instructions.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = if trimmed
        .get(..7)
        .is_some_and(|tag| tag.eq_ignore_ascii_case("```json"))
    {
        &trimmed[7..]
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        trimmed
    };
    let body = body.trim_start();
    body.strip_suffix("```").map(str::trim_end).unwrap_or(body)
}
