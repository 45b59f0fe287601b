// Resume analysis prompt. The worked example is the de-facto contract with
// the model: the normalizer's field coercion mirrors exactly this shape.

/// Analysis prompt template. Replace `{resume_text}` before sending.
pub const RESUME_ANALYZE_PROMPT_TEMPLATE: &str = r#"You're an AI resume analyzer. Given the text of a resume, return JSON with:
- summary: string — a free-text synopsis of the candidate
- skills: array of detected tech skills (e.g. JavaScript, MySQL)
- email: email address found in the resume, or null
- score: number between 0-100 based on resume strength
- improve: suggested improvements based on the resume weaknesses, newline-separated

Example of the exact shape expected:
{
  "summary": "Backend engineer with four years of Go and PostgreSQL experience.",
  "skills": ["Go", "PostgreSQL", "Docker"],
  "email": "jane@example.com",
  "score": 72,
  "improve": "Quantify the impact of each role.\nList relevant certifications."
}

Respond ONLY with a valid JSON object — no prose, no markdown code fences.

Resume:
{resume_text}"#;

/// Builds the instruction string for one resume. Deterministic and infallible.
pub fn build_analyze_prompt(resume_text: &str) -> String {
    RESUME_ANALYZE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_resume_text() {
        let prompt = build_analyze_prompt("Jane Doe, backend engineer");
        assert!(prompt.contains("Jane Doe, backend engineer"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_prompt_names_every_schema_field() {
        let prompt = build_analyze_prompt("");
        for field in ["summary", "skills", "email", "score", "improve"] {
            assert!(prompt.contains(field), "prompt is missing field '{field}'");
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(build_analyze_prompt("same text"), build_analyze_prompt("same text"));
    }
}
