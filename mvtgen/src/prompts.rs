//! Prompt text for the two model call shapes.
//!
//! Canonical source is `mvtgen/prompts/*.txt`, embedded at compile time. Templates use
//! `{name}` placeholders that are filled in a single pass, so user text containing braces
//! is never re-expanded.

use crate::llm::CompletionRequest;

macro_rules! embed_prompt {
    ($name:literal) => {
        include_str!(concat!("../prompts/", $name))
    };
}

/// System prompt for generation and update calls.
pub const GENERATION_SYSTEM_PROMPT: &str = embed_prompt!("generation_system.txt");
const UPDATE_TEMPLATE: &str = embed_prompt!("update.txt");
const EXPLANATION_TEMPLATE: &str = embed_prompt!("explanation.txt");

pub const GENERATION_MAX_TOKENS: u32 = 4096;
pub const GENERATION_TEMPERATURE: f32 = 0.3;
pub const EXPLANATION_MAX_TOKENS: u32 = 1024;
pub const EXPLANATION_TEMPERATURE: f32 = 0.5;

fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let replaced = tail.find('}').and_then(|end| {
            let name = &tail[1..end];
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v, end + 1))
        });
        match replaced {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// User message for update mode: existing JSON in a fenced block, then the instruction.
pub fn update_message(existing_json: &str, instruction: &str) -> String {
    fill(
        UPDATE_TEMPLATE,
        &[("existing_json", existing_json), ("instruction", instruction)],
    )
}

/// Fixed template asking for a five-sentence plain-language summary of `json`.
pub fn explanation_message(json: &str) -> String {
    fill(EXPLANATION_TEMPLATE, &[("json", json)])
}

/// Generation-mode request. `existing_json` switches to update mode.
pub fn generation_request(description: &str, existing_json: Option<&str>) -> CompletionRequest {
    let user_message = match existing_json {
        Some(existing) => update_message(existing, description),
        None => description.to_string(),
    };
    CompletionRequest {
        system: Some(GENERATION_SYSTEM_PROMPT.to_string()),
        user_message,
        max_tokens: GENERATION_MAX_TOKENS,
        temperature: GENERATION_TEMPERATURE,
    }
}

/// Explanation-mode request: no system prompt.
pub fn explanation_request(json: &str) -> CompletionRequest {
    CompletionRequest {
        system: None,
        user_message: explanation_message(json),
        max_tokens: EXPLANATION_MAX_TOKENS,
        temperature: EXPLANATION_TEMPERATURE,
    }
}
