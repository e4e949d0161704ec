use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use crate::error::SenseError;

/// Order of the model: context tokens + the target token.
pub const ORDER: usize = 3;

/// Number of tokens in a context (`ORDER - 1`).
pub const CONTEXT_SIZE: usize = ORDER - 1;

/// Symbol used to print the start-of-sequence sentinel.
pub const START_SYMBOL: &str = "<s>";

/// Symbol used to print the end-of-sequence sentinel.
pub const END_SYMBOL: &str = "</s>";

/// Smallest symbolic unit of a token stream.
///
/// Sentinels are their own variants: an observed token whose text happens
/// to be `<s>` is still an observed token and never compares equal to
/// [`Token::Start`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
	/// Padding before the first token (forwards windows).
	Start,
	/// Padding after the last token (backwards windows).
	End,
	/// A token taken from real input.
	Observed(String),
}

impl Token {
	/// Creates an observed token.
	pub fn observed(text: impl Into<String>) -> Self {
		Token::Observed(text.into())
	}

	/// Reads a token written in symbol notation.
	///
	/// `<s>` and `</s>` map to the sentinels, anything else is observed.
	/// Only meant for text boundaries such as HTTP queries; tokenizers
	/// build observed tokens directly.
	pub fn from_symbol(symbol: &str) -> Self {
		match symbol {
			START_SYMBOL => Token::Start,
			END_SYMBOL => Token::End,
			text => Token::observed(text),
		}
	}

	/// Returns `true` for padding tokens.
	pub fn is_sentinel(&self) -> bool {
		!matches!(self, Token::Observed(_))
	}

	/// Symbol notation of the token.
	pub fn as_str(&self) -> &str {
		match self {
			Token::Start => START_SYMBOL,
			Token::End => END_SYMBOL,
			Token::Observed(text) => text,
		}
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for Token {
	fn from(text: &str) -> Self {
		Token::observed(text)
	}
}

impl From<String> for Token {
	fn from(text: String) -> Self {
		Token::Observed(text)
	}
}

impl Serialize for Token {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

/// The `CONTEXT_SIZE` tokens adjacent to a target token.
///
/// Used as the key of the frequency table. A `Context` can be looked up
/// with a plain `&[Token]` because it hashes exactly like the slice of its
/// tokens (see the `Borrow` impl).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context([Token; CONTEXT_SIZE]);

impl Context {
	pub fn new(tokens: [Token; CONTEXT_SIZE]) -> Self {
		Self(tokens)
	}

	pub fn tokens(&self) -> &[Token] {
		&self.0
	}
}

impl Hash for Context {
	fn hash<H: Hasher>(&self, state: &mut H) {
		// Must stay identical to `<[Token] as Hash>::hash`
		self.0.as_slice().hash(state);
	}
}

impl Borrow<[Token]> for Context {
	fn borrow(&self) -> &[Token] {
		&self.0
	}
}

impl TryFrom<&[Token]> for Context {
	type Error = SenseError;

	/// # Errors
	/// Returns [`SenseError::InvalidContext`] if the slice length is not
	/// `CONTEXT_SIZE`.
	fn try_from(tokens: &[Token]) -> Result<Self, Self::Error> {
		let tokens: [Token; CONTEXT_SIZE] = tokens
			.to_vec()
			.try_into()
			.map_err(|rejected: Vec<Token>| SenseError::InvalidContext {
				expected: CONTEXT_SIZE,
				actual: rejected.len(),
			})?;
		Ok(Self(tokens))
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (i, token) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{token}")?;
		}
		f.write_str("]")
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	#[test]
	fn sentinels_are_not_observed_tokens() {
		assert_ne!(Token::Start, Token::observed("<s>"));
		assert_ne!(Token::End, Token::observed("</s>"));
		assert!(Token::Start.is_sentinel());
		assert!(!Token::observed("<s>").is_sentinel());
		assert_eq!(Token::observed("<s>").to_string(), Token::Start.to_string());
	}

	#[test]
	fn symbol_notation() {
		assert_eq!(Token::from_symbol("<s>"), Token::Start);
		assert_eq!(Token::from_symbol("</s>"), Token::End);
		assert_eq!(Token::from_symbol("{"), Token::observed("{"));
	}

	#[test]
	fn context_is_found_through_a_slice() {
		let mut table = HashMap::new();
		table.insert(Context::new([Token::Start, Token::observed("a")]), 1);

		let key = [Token::Start, Token::observed("a")];
		assert_eq!(table.get(&key[..]), Some(&1));
		let other = [Token::observed("a"), Token::Start];
		assert_eq!(table.get(&other[..]), None);
	}

	#[test]
	fn context_arity_is_checked() {
		let short = [Token::observed("a")];
		match Context::try_from(&short[..]) {
			Err(SenseError::InvalidContext { expected, actual }) => {
				assert_eq!(expected, CONTEXT_SIZE);
				assert_eq!(actual, 1);
			}
			other => panic!("unexpected result: {other:?}"),
		}

		let exact = [Token::observed("a"), Token::observed("b")];
		let context = Context::try_from(&exact[..]).unwrap();
		assert_eq!(context.to_string(), "[a, b]");
	}
}
