use std::path::PathBuf;

use clap::Parser;
use sense_core::{JavaScriptTokenizer, Tokenizer, TrigramModel};

/// Train on a directory of sources, then show where a file looks least natural.
#[derive(Parser, Debug)]
struct Args {
    /// Directory of training sources
    #[arg(long, default_value = "./data")]
    corpus: PathBuf,

    /// File to score
    file: PathBuf,

    /// Extension of the training sources
    #[arg(long, default_value = "js")]
    extension: String,

    /// Number of tokens to report
    #[arg(long, default_value_t = 5)]
    top: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let tokenizer = JavaScriptTokenizer::new();

    // Learn the corpus in both directions (files are learned in parallel)
    let (forwards, backwards) = TrigramModel::pair_from_directory(&args.corpus, &tokenizer, &args.extension)?;

    // Unsupported tokens in the scored file are reported as an error
    let source = std::fs::read_to_string(&args.file)?;
    let tokens = tokenizer.tokenize(&source)?;

    // A token is suspicious when it surprises the model from both sides
    let forwards_scores = forwards.score(&tokens);
    let backwards_scores = backwards.score(&tokens);
    let mut combined: Vec<(usize, f64)> = forwards_scores
        .iter()
        .zip(&backwards_scores)
        .map(|(f, b)| (f.index, f.cross_entropy + b.cross_entropy))
        .collect();
    combined.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("{} tokens in {}", tokens.len(), args.file.display());
    for (index, h) in combined.into_iter().take(args.top) {
        let context = forwards_scores
            .get(index.saturating_sub(2)..index)
            .unwrap_or_default()
            .iter()
            .map(|s| s.token.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!("#{index:<5} {:<12} {h:>8.3} bits   (after: {context})", tokens[index].as_str());
    }

    Ok(())
}
