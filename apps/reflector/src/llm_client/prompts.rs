// System instruction sent with every completion request.
// Entry templates live in reflection::prompts.

/// The companion persona the model answers as.
pub const REFLECTION_SYSTEM: &str =
    "You are a poetic and emotionally intelligent reflection companion.";
