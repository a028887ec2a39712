use once_cell::sync::Lazy;
use regex::Regex;

static THINK_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<think>[\s\S]*?</think>|<think\s*/>").unwrap());

static REASONING_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<reasoning>[\s\S]*?</reasoning>").unwrap());

/// Cleans an LLM reply by removing reasoning artifacts some models emit
/// before the payload.
pub fn clean_llm_response(response: &str) -> String {
    let mut cleaned = response.to_string();
    cleaned = THINK_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned = REASONING_TAG_PATTERN.replace_all(&cleaned, "").to_string();
    cleaned.trim().to_string()
}

/// Extracts the JSON payload from an LLM reply. Handles raw JSON, fenced
/// code blocks, and prose surrounding a single JSON object.
pub fn extract_json_payload(output: &str) -> String {
    let trimmed = output.trim();
    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return trimmed.to_string();
    }

    let stripped = strip_code_fence(trimmed);
    if serde_json::from_str::<serde_json::Value>(&stripped).is_ok() {
        return stripped;
    }

    // Last resort: the outermost brace-delimited span.
    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return trimmed[start..=end].to_string();
        }
    }
    stripped
}

fn strip_code_fence(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix("```json") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    if let Some(stripped) = trimmed.strip_prefix("```") {
        return stripped.trim().trim_end_matches("```").trim().to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_think_tags() {
        let input = "<think>Some reasoning here</think>{\"estimatedValue\": 1}";
        assert_eq!(clean_llm_response(input), "{\"estimatedValue\": 1}");
    }

    #[test]
    fn test_clean_reasoning_tags() {
        let input = "<reasoning>Internal reasoning</reasoning>Final answer";
        assert_eq!(clean_llm_response(input), "Final answer");
    }

    #[test]
    fn test_clean_preserves_normal_text() {
        let input = "A normal response without any special tags.";
        assert_eq!(clean_llm_response(input), input);
    }

    #[test]
    fn test_extract_raw_json() {
        let input = r#"{"estimatedValue": 1000}"#;
        assert_eq!(extract_json_payload(input), input);
    }

    #[test]
    fn test_extract_fenced_json() {
        let input = "```json\n{\"estimatedValue\": 1000}\n```";
        assert_eq!(extract_json_payload(input), "{\"estimatedValue\": 1000}");
    }

    #[test]
    fn test_extract_bare_fence() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_payload(input), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_json_from_prose() {
        let input = "Here is the valuation you asked for: {\"a\": 1} Hope it helps!";
        assert_eq!(extract_json_payload(input), "{\"a\": 1}");
    }
}
