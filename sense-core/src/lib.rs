//! Naturalness model of source code.
//!
//! This crate learns which tokens usually follow which in source code and
//! scores how surprising a token is in its context, the building block for
//! locating likely syntax errors:
//! - Forwards and backwards trigram windowing with sentinel padding
//! - Frequency tables of (context → next token) observations
//! - Cross-entropy scoring (`+inf` for anything never observed)
//! - A JavaScript tokenizer feeding the models

/// Trigram model and its building blocks.
pub mod model;

/// Source text → token sequences.
pub mod tokenizer;

/// Crate-wide error type.
pub mod error;

/// File helpers used to learn a corpus.
///
/// Not exposed
pub(crate) mod io;

pub use error::SenseError;
pub use model::sentences::Direction;
pub use model::token::{Context, Token};
pub use model::trigram_model::{TokenScore, TrigramModel};
pub use tokenizer::{JavaScriptTokenizer, Tokenizer};
