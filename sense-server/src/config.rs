use std::path::PathBuf;

use clap::Parser;

/// Command line / environment configuration of the server.
#[derive(Parser, Debug, Clone)]
#[command(name = "sense-server", about = "Serve trigram naturalness scores over HTTP")]
pub struct ServerConfig {
	/// Address to bind.
	#[arg(long, env = "SENSE_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind.
	#[arg(long, env = "SENSE_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Directory of source files learned at start-up.
	#[arg(long, env = "SENSE_CORPUS")]
	pub corpus: Option<PathBuf>,

	/// Extension of the corpus files.
	#[arg(long, env = "SENSE_EXTENSION", default_value = "js")]
	pub extension: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = ServerConfig::try_parse_from(["sense-server"]).unwrap();
		assert_eq!(config.port, 5000);
		assert_eq!(config.extension, "js");
		assert!(config.corpus.is_none());
	}

	#[test]
	fn flags_override_defaults() {
		let config = ServerConfig::try_parse_from(["sense-server", "--port", "8080", "--corpus", "./data"]).unwrap();
		assert_eq!(config.port, 8080);
		assert_eq!(config.corpus, Some(PathBuf::from("./data")));
	}
}
