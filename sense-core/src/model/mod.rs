//! Trigram model of token sequences.
//!
//! - Tokens and fixed-size contexts (`token`)
//! - Directional (context, target) windowing (`sentences`)
//! - Next-token counts per context (`transitions`, `frequency_table`)
//! - Learning and cross-entropy scoring (`trigram_model`)

/// Tokens, sentinels and the fixed-size `Context` key.
pub mod token;

/// Forwards/backwards windowing of token sequences into
/// (context, target) pairs.
pub mod sentences;

/// Occurrence counts of the tokens following one context.
pub mod transitions;

/// Context → transitions mapping filled during learning.
pub mod frequency_table;

/// Trigram model: learning, cross-entropy, scoring and merging.
pub mod trigram_model;
