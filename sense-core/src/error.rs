use std::path::PathBuf;

use crate::model::sentences::Direction;

/// Errors produced while tokenizing, learning or scoring.
///
/// Unknown contexts and unseen transitions are *not* errors: they are
/// reported as an infinite cross-entropy by the model.
#[derive(Debug, thiserror::Error)]
pub enum SenseError {
	/// The tokenizer met a lexical category it does not model
	/// (numbers, strings, regular expressions, ...).
	#[error("unknown token {category}: {value}")]
	UnsupportedToken { category: String, value: String },

	/// A context passed to a query does not have exactly `N - 1` tokens.
	#[error("context must contain exactly {expected} tokens, got {actual}")]
	InvalidContext { expected: usize, actual: usize },

	/// Two models with different windowing directions cannot be merged.
	#[error("direction mismatch: self={this}, other={other}")]
	DirectionMismatch { this: Direction, other: Direction },

	/// The tree-sitter grammar could not be loaded.
	#[error("failed to load tokenizer grammar: {0}")]
	Language(#[from] tree_sitter::LanguageError),

	/// The parser gave up without producing a syntax tree.
	#[error("failed to parse source")]
	Parse,

	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("expected a directory, got: {0}")]
	NotADirectory(PathBuf),
}
