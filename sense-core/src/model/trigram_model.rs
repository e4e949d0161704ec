use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::Serialize;

use super::frequency_table::FrequencyTable;
use super::sentences::Direction;
use super::token::{CONTEXT_SIZE, Token};
use crate::error::SenseError;
use crate::io::{list_files, read_source};
use crate::tokenizer::Tokenizer;

/// Cross-entropy of one token of a scored sequence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenScore {
	/// Position of the token in the scored sequence.
	pub index: usize,
	pub token: Token,
	/// `-log2 P(token | context)`, `+inf` if the model has no basis for it.
	pub cross_entropy: f64,
}

/// Trigram model of token sequences.
///
/// The model windows every learned sequence in a fixed [`Direction`] and
/// counts which token follows each two-token context. It then scores how
/// surprising a token is after a context.
///
/// # Responsibilities
/// - Build the frequency table from token sequences
/// - Compute the cross-entropy of a token given a context
/// - Merge with another model of the same direction
///
/// # Concurrency
/// Learning takes `&mut self` and queries take `&self`: training needs
/// exclusive access, a trained model can be shared by any number of readers.
///
/// # Invariants
/// - The direction never changes after construction
/// - The table only grows
#[derive(Clone, Debug)]
pub struct TrigramModel {
	direction: Direction,
	table: FrequencyTable,
	/// Number of completed `learn` calls (including merged ones).
	sequences: usize,
}

impl TrigramModel {
	/// Creates an untrained model windowing in `direction`.
	pub fn new(direction: Direction) -> Self {
		Self { direction, table: FrequencyTable::new(), sequences: 0 }
	}

	pub fn forwards() -> Self {
		Self::new(Direction::Forwards)
	}

	pub fn backwards() -> Self {
		Self::new(Direction::Backwards)
	}

	/// Learns a corpus of source files.
	///
	/// Lists every file of `dir` ending with `extension`, splits them into
	/// chunks learned by partial models on worker threads, and merges the
	/// partial models into one.
	///
	/// # Errors
	/// - Returns an error if `dir` is not a directory or a file cannot be read.
	///
	/// # Notes
	/// - Files rejected by the tokenizer are skipped and logged.
	/// - Uses MPSC channels to collect models from threads.
	pub fn from_directory<P, T>(dir: P, direction: Direction, tokenizer: &T, extension: &str) -> Result<Self, SenseError>
	where
		P: AsRef<Path>,
		T: Tokenizer,
	{
		let [model] = Self::learn_corpus(dir, [direction], tokenizer, extension)?;
		Ok(model)
	}

	/// Learns a corpus in both directions at once.
	///
	/// Same as two calls to [`TrigramModel::from_directory`], but every file
	/// is read and tokenized only once. Returns `(forwards, backwards)`.
	pub fn pair_from_directory<P, T>(dir: P, tokenizer: &T, extension: &str) -> Result<(Self, Self), SenseError>
	where
		P: AsRef<Path>,
		T: Tokenizer,
	{
		let [forwards, backwards] =
			Self::learn_corpus(dir, [Direction::Forwards, Direction::Backwards], tokenizer, extension)?;
		Ok((forwards, backwards))
	}

	/// Learns every file of a corpus into one model per direction.
	fn learn_corpus<P, T, const N: usize>(
		dir: P,
		directions: [Direction; N],
		tokenizer: &T,
		extension: &str,
	) -> Result<[Self; N], SenseError>
	where
		P: AsRef<Path>,
		T: Tokenizer,
	{
		let files = list_files(&dir, extension)?;
		let mut models = directions.map(Self::new);
		if files.is_empty() {
			warn!("no .{extension} file in {}", dir.as_ref().display());
			return Ok(models);
		}

		let cpus = num_cpus::get();
		let chunk_size = files.len().div_ceil(cpus);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in files.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					tx.send(Self::learn_chunk(chunk, directions, tokenizer))
						.expect("Failed to send from thread");
				});
			}
		});
		drop(tx);

		let mut skipped = 0;
		for partial in rx.iter() {
			let (partial_models, partial_skipped) = partial?;
			for (model, partial_model) in models.iter_mut().zip(&partial_models) {
				model.merge(partial_model)?;
			}
			skipped += partial_skipped;
		}

		for model in &models {
			info!(
				"learned {} {} sequences from {} ({} contexts, {skipped} files skipped)",
				model.sequences,
				model.direction,
				dir.as_ref().display(),
				model.table.len()
			);
		}
		Ok(models)
	}

	/// Learns a chunk of files into one partial model per direction.
	///
	/// Each file is tokenized once. Returns the models and the number of
	/// files the tokenizer rejected.
	fn learn_chunk<T: Tokenizer, const N: usize>(
		files: &[PathBuf],
		directions: [Direction; N],
		tokenizer: &T,
	) -> Result<([Self; N], usize), SenseError> {
		let mut partial_models = directions.map(Self::new);
		let mut skipped = 0;
		for path in files {
			let source = read_source(path)?;
			match tokenizer.tokenize(&source) {
				Ok(tokens) => {
					for model in &mut partial_models {
						model.learn(&tokens);
					}
				}
				Err(error @ SenseError::UnsupportedToken { .. }) => {
					warn!("skipping {}: {error}", path.display());
					skipped += 1;
				}
				Err(error) => return Err(error),
			}
		}
		Ok((partial_models, skipped))
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}

	/// Returns `true` once at least one sequence has been learned.
	pub fn is_trained(&self) -> bool {
		self.sequences > 0
	}

	pub fn sequences_learned(&self) -> usize {
		self.sequences
	}

	pub fn table(&self) -> &FrequencyTable {
		&self.table
	}

	/// Adds a token sequence to the model.
	///
	/// Every (context, target) pair of the sequence is recorded. An empty
	/// sequence records nothing but still counts as learned.
	pub fn learn(&mut self, tokens: &[Token]) {
		for (context, target) in self.direction.sentences(tokens) {
			self.table.record(context, target.clone());
		}
		self.sequences += 1;
		debug!(
			"learned {} {} tokens, {} contexts",
			tokens.len(),
			self.direction,
			self.table.len()
		);
	}

	/// Tokenizes `source` and learns the result.
	///
	/// # Errors
	/// Propagates tokenizer errors; the model is left untouched in that case.
	pub fn learn_source<T: Tokenizer + ?Sized>(&mut self, tokenizer: &T, source: &str) -> Result<(), SenseError> {
		let tokens = tokenizer.tokenize(source)?;
		self.learn(&tokens);
		Ok(())
	}

	/// Cross-entropy of `token` following `context`, in bits.
	///
	/// Returns `+inf` if the context was never observed, or if it was but
	/// never followed by `token`. Otherwise returns
	/// `-log2(count(token) / total(context))`.
	///
	/// # Errors
	/// Returns [`SenseError::InvalidContext`] if `context` does not have
	/// exactly `CONTEXT_SIZE` tokens.
	pub fn cross_entropy(&self, context: &[Token], token: &Token) -> Result<f64, SenseError> {
		if context.len() != CONTEXT_SIZE {
			return Err(SenseError::InvalidContext { expected: CONTEXT_SIZE, actual: context.len() });
		}

		Ok(self.surprise(context, token))
	}

	/// Cross-entropy of a context of the right size.
	fn surprise(&self, context: &[Token], token: &Token) -> f64 {
		let Some(transitions) = self.table.lookup(context) else {
			return f64::INFINITY;
		};

		let probability = transitions.probability(token);
		if probability == 0.0 {
			return f64::INFINITY;
		}
		if probability == 1.0 {
			// Negating log2(1) would give -0
			return 0.0;
		}
		-probability.log2()
	}

	/// Scores every token of a sequence against its context in this
	/// model's direction.
	pub fn score(&self, tokens: &[Token]) -> Vec<TokenScore> {
		self.direction
			.sentences(tokens)
			.enumerate()
			.map(|(index, (context, token))| {
				let cross_entropy = self.surprise(context.tokens(), token);
				TokenScore { index, token: token.clone(), cross_entropy }
			})
			.collect()
	}

	/// Merges another model into this one.
	///
	/// # Notes
	/// - Both models must window in the same direction.
	/// - Occurrence counts for matching contexts and transitions are summed.
	///
	/// # Errors
	/// Returns an error if the directions do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), SenseError> {
		if self.direction != other.direction {
			return Err(SenseError::DirectionMismatch { this: self.direction, other: other.direction });
		}

		self.table.merge(&other.table);
		self.sequences += other.sequences;
		debug!("merged {} sequences, {} contexts", other.sequences, self.table.len());
		Ok(())
	}
}
