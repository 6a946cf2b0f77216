// Cross-cutting prompt fragments shared by the provider bindings.
// The ranking module defines its own prompts.rs for domain prompts.

/// System prompt fragment that enforces JSON-only output. Used as the system
/// message for bindings that carry one (OpenAI); the Gemini binding relies on
/// the same instruction embedded in the user prompt.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON payload. \
    Do NOT include explanations or apologies.";
