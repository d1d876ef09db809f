// Shared prompt fragments for generation calls.
// Feature modules keep their own prompts.rs; this file holds cross-cutting pieces.

/// System message for every contract-drafting call.
pub const FORMAL_LEGAL_SYSTEM: &str =
    "You are a helpful assistant that provides legal advice in a formal tone.";
