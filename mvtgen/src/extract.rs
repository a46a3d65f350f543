//! Isolate the JSON payload from a model reply.
//!
//! Models are told to answer with bare JSON but often wrap it in a fenced code block or add
//! a sentence before or after. Extraction trusts the model's own fencing and does no brace
//! matching:
//!
//! 1. first ```` ```json ```` fence → text up to the next ```` ``` ````;
//! 2. else first generic ```` ``` ```` fence → text up to the next ```` ``` ````;
//! 3. else the whole reply.
//!
//! The result is always trimmed. Only the first block is used when a reply carries several.

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Returns the slice of `raw` believed to hold the JSON document.
///
/// An opening fence without a closing one yields everything after the opening marker.
pub fn extract_json(raw: &str) -> &str {
    let raw = raw.trim();

    let body = if let Some((_, rest)) = raw.split_once(JSON_FENCE) {
        until_fence(rest)
    } else if let Some((_, rest)) = raw.split_once(FENCE) {
        until_fence(rest)
    } else {
        return raw;
    };

    let blocks = count_blocks(raw);
    if blocks > 1 {
        tracing::debug!(blocks, "model reply has several fenced blocks, using the first");
    }
    body.trim()
}

fn until_fence(rest: &str) -> &str {
    rest.split_once(FENCE).map_or(rest, |(body, _)| body)
}

/// Number of opened fenced blocks, an unterminated trailing one included.
fn count_blocks(raw: &str) -> usize {
    let mut blocks = 0;
    let mut rest = raw;
    while let Some((_, after_open)) = rest.split_once(FENCE) {
        blocks += 1;
        match after_open.split_once(FENCE) {
            Some((_, after_close)) => rest = after_close,
            None => break,
        }
    }
    blocks
}
