use std::collections::HashMap;

use super::token::{Context, Token};
use super::transitions::Transitions;

/// Counts of (context → next token) observations.
///
/// A context missing from the table was never observed. A context present
/// in the table has at least one recorded transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	contexts: HashMap<Context, Transitions>,
}

impl FrequencyTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Increments the count of `token` under `context`, creating the
	/// context entry if needed.
	pub fn record(&mut self, context: Context, token: Token) {
		self.contexts.entry(context).or_default().add_transition(token);
	}

	/// Returns the transitions observed after `context`, or `None` if the
	/// context was never recorded.
	pub fn lookup(&self, context: &[Token]) -> Option<&Transitions> {
		self.contexts.get(context)
	}

	/// Number of distinct contexts recorded.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Context, &Transitions)> {
		self.contexts.iter()
	}

	/// Merges another table into this one, summing the counts of shared
	/// contexts and cloning the others.
	pub fn merge(&mut self, other: &Self) {
		for (context, transitions) in &other.contexts {
			if let Some(existing) = self.contexts.get_mut(context) {
				existing.merge(transitions);
			} else {
				self.contexts.insert(context.clone(), transitions.clone());
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn context(a: &str, b: &str) -> Context {
		Context::new([Token::from_symbol(a), Token::from_symbol(b)])
	}

	#[test]
	fn record_creates_then_increments() {
		let mut table = FrequencyTable::new();
		assert!(table.is_empty());

		table.record(context("<s>", "<s>"), Token::from("function"));
		table.record(context("<s>", "<s>"), Token::from("function"));
		table.record(context("<s>", "function"), Token::from("IDENTIFIER"));

		assert_eq!(table.len(), 2);
		let transitions = table.lookup(context("<s>", "<s>").tokens()).unwrap();
		assert_eq!(transitions.count(&Token::from("function")), 2);
	}

	#[test]
	fn unseen_context_is_distinct_from_unseen_token() {
		let mut table = FrequencyTable::new();
		table.record(context("a", "b"), Token::from("c"));

		assert!(table.lookup(context("b", "a").tokens()).is_none());
		let known = table.lookup(context("a", "b").tokens()).unwrap();
		assert_eq!(known.count(&Token::from("z")), 0);
		assert!(known.total() > 0);
	}

	#[test]
	fn merge_keeps_disjoint_contexts_and_sums_shared_ones() {
		let mut left = FrequencyTable::new();
		left.record(context("a", "b"), Token::from("c"));
		let mut right = FrequencyTable::new();
		right.record(context("a", "b"), Token::from("c"));
		right.record(context("x", "y"), Token::from("z"));

		left.merge(&right);
		assert_eq!(left.len(), 2);
		assert_eq!(left.lookup(context("a", "b").tokens()).unwrap().total(), 2);
		assert_eq!(left.lookup(context("x", "y").tokens()).unwrap().total(), 1);
	}
}
