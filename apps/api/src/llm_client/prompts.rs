// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts alongside it;
// this file holds the pieces more than one of them uses.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to free-text generation prompts.
pub const NO_PREAMBLE_INSTRUCTION: &str = "Do not provide a preamble. \
    Start directly with the subject line of the email.";
