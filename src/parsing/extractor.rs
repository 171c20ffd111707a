//! Recovery of the JSON document embedded in an agent's chat reply.

/// Marker the agent writes immediately before the JSON payload.
pub const START_SENTINEL: &str = "STARTJSON";
/// Marker the agent writes immediately after the JSON payload.
pub const END_SENTINEL: &str = "ENDJSON";

const CODE_FENCE: &str = "```";

/// A reply split into its JSON candidate and the prose around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedReply {
    /// Text expected to parse as JSON; may be the untouched input when nothing was found
    pub json: String,
    /// Everything that is not part of the JSON candidate
    pub commentary: String,
}

/// Split `text` into a JSON candidate and commentary.
///
/// A `STARTJSON`..`ENDJSON` pair wins. Without one, the candidate starts at the
/// first `{` and loses any trailing code fence. If there is no brace either,
/// the input comes back unchanged and parsing is left to fail downstream.
pub fn extract_json(text: &str) -> ExtractedReply {
    if let Some(reply) = extract_between_sentinels(text) {
        return reply;
    }

    match text.find('{') {
        Some(start) => ExtractedReply {
            json: strip_trailing_fence(&text[start..]).to_string(),
            commentary: strip_opening_fence(&text[..start]).to_string(),
        },
        None => ExtractedReply {
            json: text.to_string(),
            commentary: String::new(),
        },
    }
}

fn extract_between_sentinels(text: &str) -> Option<ExtractedReply> {
    let start = text.find(START_SENTINEL)?;
    let body_start = start + START_SENTINEL.len();
    let end = body_start + text[body_start..].find(END_SENTINEL)?;
    let tail_start = end + END_SENTINEL.len();

    let mut commentary = String::with_capacity(start + text.len() - tail_start);
    commentary.push_str(&text[..start]);
    commentary.push_str(&text[tail_start..]);

    Some(ExtractedReply {
        json: text[body_start..end].to_string(),
        commentary,
    })
}

/// Drop trailing whitespace and one closing ``` fence if present.
fn strip_trailing_fence(candidate: &str) -> &str {
    let trimmed = candidate.trim_end();
    match trimmed.strip_suffix(CODE_FENCE) {
        Some(rest) => rest.trim_end(),
        None => trimmed,
    }
}

/// Drop a dangling opening fence (```` ``` ```` or ```` ```json ````) from the prose before the payload.
fn strip_opening_fence(prefix: &str) -> &str {
    let trimmed = prefix.trim_end();
    let Some(fence_at) = trimmed.rfind(CODE_FENCE) else {
        return prefix;
    };

    let language_tag = &trimmed[fence_at + CODE_FENCE.len()..];
    if language_tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        trimmed[..fence_at].trim_end()
    } else {
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_split_payload_from_commentary() {
        let reply = extract_json("Sure! STARTJSON{\"a\":1}ENDJSON Thanks.");
        assert_eq!(reply.json, "{\"a\":1}");
        assert_eq!(reply.commentary, "Sure!  Thanks.");
    }

    #[test]
    fn sentinels_excluded_from_commentary() {
        let reply = extract_json("STARTJSON[]ENDJSON");
        assert_eq!(reply.json, "[]");
        assert_eq!(reply.commentary, "");
        assert!(!reply.commentary.contains(START_SENTINEL));
        assert!(!reply.commentary.contains(END_SENTINEL));
    }

    #[test]
    fn end_sentinel_before_start_is_ignored() {
        let reply = extract_json("ENDJSON oops STARTJSON{\"a\":2}ENDJSON");
        assert_eq!(reply.json, "{\"a\":2}");
        assert_eq!(reply.commentary, "ENDJSON oops ");
    }

    #[test]
    fn unterminated_sentinel_falls_back_to_brace() {
        let reply = extract_json("STARTJSON {\"a\":3}");
        assert_eq!(reply.json, "{\"a\":3}");
        assert_eq!(reply.commentary, "STARTJSON ");
    }

    #[test]
    fn fenced_block_is_unwrapped() {
        let text = "Here is your plan:\n```json\n{\"trip\":{\"name\":\"x\"}}\n```\n";
        let reply = extract_json(text);
        assert_eq!(reply.json, "{\"trip\":{\"name\":\"x\"}}");
        assert_eq!(reply.commentary, "Here is your plan:");
    }

    #[test]
    fn unfenced_json_keeps_closing_brace() {
        let reply = extract_json("Plan: {\"a\":1}");
        assert_eq!(reply.json, "{\"a\":1}");
        assert_eq!(reply.commentary, "Plan: ");
    }

    #[test]
    fn bare_json_passes_through() {
        let reply = extract_json("{\"a\":1}\n");
        assert_eq!(reply.json, "{\"a\":1}");
        assert_eq!(reply.commentary, "");
    }

    #[test]
    fn text_without_json_is_returned_unchanged() {
        let text = "I could not plan this trip, sorry.";
        let reply = extract_json(text);
        assert_eq!(reply.json, text);
        assert_eq!(reply.commentary, "");
    }

    #[test]
    fn multibyte_text_around_sentinels() {
        let reply = extract_json("好的！STARTJSON{\"名\":\"東京\"}ENDJSON 祝旅途愉快");
        assert_eq!(reply.json, "{\"名\":\"東京\"}");
        assert_eq!(reply.commentary, "好的！ 祝旅途愉快");
    }
}
