//! Source text → token sequences.
//!
//! The model only ever sees [`Token`]s, so any tokenizer can feed it. The
//! crate ships one for JavaScript that keeps keywords and punctuators
//! verbatim and collapses every identifier into `IDENTIFIER`.

use log::trace;
use tree_sitter::{Node, Parser};

use crate::error::SenseError;
use crate::model::token::Token;

/// Symbol every identifier is mapped to.
pub const IDENTIFIER: &str = "IDENTIFIER";

/// Turns source text into an ordered sequence of tokens.
pub trait Tokenizer: Send + Sync {
	/// # Errors
	/// Returns [`SenseError::UnsupportedToken`] when the source contains a
	/// lexical category this tokenizer does not model.
	fn tokenize(&self, source: &str) -> Result<Vec<Token>, SenseError>;
}

/// JavaScript tokenizer backed by tree-sitter.
///
/// Only keywords, punctuators and identifiers are modelled. Literals
/// (numbers, strings, templates, regular expressions, booleans, `null`)
/// are rejected with [`SenseError::UnsupportedToken`]. Comments are skipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct JavaScriptTokenizer;

impl JavaScriptTokenizer {
	pub fn new() -> Self {
		Self
	}
}

impl Tokenizer for JavaScriptTokenizer {
	fn tokenize(&self, source: &str) -> Result<Vec<Token>, SenseError> {
		let mut tokens = Vec::new();
		if source.trim().is_empty() {
			return Ok(tokens);
		}

		// Parser is neither Send nor Sync, so each call builds its own
		let mut parser = Parser::new();
		parser.set_language(&tree_sitter_javascript::LANGUAGE.into())?;
		let tree = parser.parse(source, None).ok_or(SenseError::Parse)?;

		collect_tokens(tree.root_node(), source.as_bytes(), &mut tokens)?;
		trace!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
		Ok(tokens)
	}
}

/// Walks the syntax tree depth-first and pushes one token per leaf.
///
/// Uses a tree cursor rather than recursion so deeply nested sources
/// cannot exhaust the stack.
fn collect_tokens(root: Node, source: &[u8], tokens: &mut Vec<Token>) -> Result<(), SenseError> {
	let mut cursor = root.walk();
	loop {
		let node = cursor.node();
		let kind = node.kind();

		// Missing nodes inserted by error recovery have no text
		let descend = if node.start_byte() == node.end_byte() || is_comment_node(kind) {
			false
		} else if is_literal_node(kind) {
			return Err(unsupported(&node, source));
		} else if node.child_count() == 0 {
			tokens.push(leaf_token(&node, source)?);
			false
		} else {
			true
		};

		if descend && cursor.goto_first_child() {
			continue;
		}
		while !cursor.goto_next_sibling() {
			if !cursor.goto_parent() {
				return Ok(());
			}
		}
	}
}

/// Maps a leaf node to its token.
fn leaf_token(node: &Node, source: &[u8]) -> Result<Token, SenseError> {
	let kind = node.kind();
	if is_identifier_node(kind) {
		return Ok(Token::from(IDENTIFIER));
	}
	if !node.is_named() && is_contextual_keyword(kind) {
		return Ok(Token::from(IDENTIFIER));
	}
	// Remaining anonymous leaves are keywords and punctuators; their kind is their text
	if !node.is_named() || matches!(kind, "this" | "super") {
		return Ok(Token::from(kind));
	}
	Err(unsupported(node, source))
}

fn unsupported(node: &Node, source: &[u8]) -> SenseError {
	SenseError::UnsupportedToken {
		category: node.kind().to_owned(),
		value: node.utf8_text(source).unwrap_or_default().to_owned(),
	}
}

fn is_comment_node(kind: &str) -> bool {
	matches!(kind, "comment" | "html_comment" | "hash_bang_line")
}

fn is_identifier_node(kind: &str) -> bool {
	matches!(
		kind,
		"identifier"
			| "property_identifier"
			| "shorthand_property_identifier"
			| "shorthand_property_identifier_pattern"
			| "statement_identifier"
			| "private_property_identifier"
			| "undefined"
	)
}

/// Words the grammar spells out as keywords although they are not reserved:
/// `for (a of b)`, `get x() {}`, `async`/`await`, `static`, `new.target`,
/// `import.meta`, `import x from "m"`, `export { a as b }`.
fn is_contextual_keyword(kind: &str) -> bool {
	matches!(kind, "of" | "get" | "set" | "async" | "await" | "static" | "target" | "meta" | "from" | "as")
}

/// Literal nodes whose inner structure must not be split into tokens.
fn is_literal_node(kind: &str) -> bool {
	matches!(kind, "number" | "string" | "template_string" | "regex" | "true" | "false" | "null")
}
