use serde_json::Value;

/// Best-effort structured extraction from LLM reply text, which routinely
/// wraps JSON in prose or markdown fencing.
///
/// Tier 1: strict parse of the whole text.
/// Tier 2: parse the substring from the first `{` to the last `}`.
/// Tier 3 (`None`): the caller falls back to its domain default.
pub fn extract_json(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
