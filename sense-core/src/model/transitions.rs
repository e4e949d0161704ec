use std::collections::HashMap;

use super::token::Token;

/// Next-token counts observed after one context.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Give the empirical probability of a next token
/// - Merge with the transitions of the same context from another table
///
/// ## Invariants
/// - Each transition occurrence count is strictly positive
/// - `total` is the sum of all occurrence counts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transitions {
	/// Outgoing transitions indexed by the next token.
	/// Example: { "(" => 42, "=" => 3 }
	transitions: HashMap<Token, u64>,
	total: u64,
}

impl Transitions {
	/// Creates an empty set of transitions.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records an occurrence of a transition toward `next`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn add_transition(&mut self, next: Token) {
		*self.transitions.entry(next).or_insert(0) += 1;
		self.total += 1;
	}

	/// Number of times `next` followed the context; 0 if never.
	pub fn count(&self, next: &Token) -> u64 {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> u64 {
		self.total
	}

	/// Empirical probability `count(next) / total`.
	///
	/// Returns 0.0 for an empty set of transitions.
	pub fn probability(&self, next: &Token) -> f64 {
		if self.total == 0 {
			return 0.0;
		}
		self.count(next) as f64 / self.total as f64
	}

	/// Number of distinct next tokens.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(next token, count)` in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&Token, u64)> {
		self.transitions.iter().map(|(token, count)| (token, *count))
	}

	/// Merges another set of transitions into this one.
	///
	/// Both must have been observed after the same context; occurrence
	/// counts are summed.
	pub fn merge(&mut self, other: &Self) {
		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(next.clone()).or_insert(0) += *occurrence;
		}
		self.total += other.total;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_and_total() {
		let mut transitions = Transitions::new();
		transitions.add_transition(Token::from("("));
		transitions.add_transition(Token::from("("));
		transitions.add_transition(Token::from("="));

		assert_eq!(transitions.count(&Token::from("(")), 2);
		assert_eq!(transitions.count(&Token::from("=")), 1);
		assert_eq!(transitions.count(&Token::from(";")), 0);
		assert_eq!(transitions.total(), 3);
		assert_eq!(transitions.len(), 2);
	}

	#[test]
	fn probability_is_relative_frequency() {
		let mut transitions = Transitions::new();
		for _ in 0..3 {
			transitions.add_transition(Token::from("a"));
		}
		transitions.add_transition(Token::from("b"));

		assert_eq!(transitions.probability(&Token::from("a")), 0.75);
		assert_eq!(transitions.probability(&Token::from("b")), 0.25);
		assert_eq!(transitions.probability(&Token::from("c")), 0.0);
		assert_eq!(Transitions::new().probability(&Token::from("a")), 0.0);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = Transitions::new();
		left.add_transition(Token::from("a"));
		let mut right = Transitions::new();
		right.add_transition(Token::from("a"));
		right.add_transition(Token::End);

		left.merge(&right);
		assert_eq!(left.count(&Token::from("a")), 2);
		assert_eq!(left.count(&Token::End), 1);
		assert_eq!(left.total(), 3);
	}
}
