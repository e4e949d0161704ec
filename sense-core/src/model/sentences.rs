use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::token::{CONTEXT_SIZE, Context, Token};

/// Scanning direction of a windower.
///
/// Both directions visit the input index-ascending; they only differ in
/// where the context is taken from and which sentinel pads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
	/// Context = the tokens before the target, left-padded with `<s>`.
	Forwards,
	/// Context = the tokens after the target, right-padded with `</s>`.
	Backwards,
}

impl Direction {
	/// Padding token used at the sequence boundary.
	pub fn sentinel(self) -> Token {
		match self {
			Direction::Forwards => Token::Start,
			Direction::Backwards => Token::End,
		}
	}

	/// Builds the context of `tokens[index]`.
	///
	/// Positions falling outside of `tokens` are filled with the sentinel.
	fn context_at(self, tokens: &[Token], index: usize) -> Context {
		Context::new(std::array::from_fn(|k| {
			let source = match self {
				// k = 0 is the farthest token before the target
				Direction::Forwards => (index + k).checked_sub(CONTEXT_SIZE),
				Direction::Backwards => Some(index + 1 + k),
			};
			source
				.and_then(|i| tokens.get(i))
				.cloned()
				.unwrap_or_else(|| self.sentinel())
		}))
	}

	/// Returns the (context, target) pairs of `tokens`, one per position.
	pub fn sentences(self, tokens: &[Token]) -> Sentences<'_> {
		Sentences { direction: self, tokens, index: 0 }
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Direction::Forwards => f.write_str("forwards"),
			Direction::Backwards => f.write_str("backwards"),
		}
	}
}

impl FromStr for Direction {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"forwards" | "forward" => Ok(Direction::Forwards),
			"backwards" | "backward" => Ok(Direction::Backwards),
			_ => Err(format!("invalid direction: {s:?} (expected \"forwards\" or \"backwards\")")),
		}
	}
}

/// Lazy sequence of (context, target) pairs over a token slice.
///
/// Finite (one item per input token) and restartable: clone it, or ask
/// the [`Direction`] for a new one.
#[derive(Clone, Debug)]
pub struct Sentences<'a> {
	direction: Direction,
	tokens: &'a [Token],
	index: usize,
}

impl<'a> Iterator for Sentences<'a> {
	type Item = (Context, &'a Token);

	fn next(&mut self) -> Option<Self::Item> {
		let target = self.tokens.get(self.index)?;
		let context = self.direction.context_at(self.tokens, self.index);
		self.index += 1;
		Some((context, target))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.tokens.len().saturating_sub(self.index);
		(remaining, Some(remaining))
	}
}

impl ExactSizeIterator for Sentences<'_> {}

impl FusedIterator for Sentences<'_> {}
