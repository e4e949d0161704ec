use std::sync::RwLock;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};

use sense_core::{Direction, JavaScriptTokenizer, Token, Tokenizer, TrigramModel};

mod config;

use config::ServerConfig;

/// Query parameters of the `/v1/cross_entropy` endpoint
#[derive(Deserialize)]
struct CrossEntropyParams {
	direction: Option<Direction>,
	/// Space separated context tokens, in symbol notation (`<s>`, `</s>`)
	context: String,
	token: String,
}

#[derive(Deserialize)]
struct ScoreParams {
	direction: Option<Direction>,
}

#[derive(Serialize)]
struct ModelStats {
	direction: Direction,
	sequences: usize,
	contexts: usize,
}

/// Both directional models. Learning takes the write lock, every other
/// endpoint only reads.
struct SharedData {
	forwards: TrigramModel,
	backwards: TrigramModel,
}

impl SharedData {
	fn new() -> Self {
		Self { forwards: TrigramModel::forwards(), backwards: TrigramModel::backwards() }
	}

	fn model(&self, direction: Direction) -> &TrigramModel {
		match direction {
			Direction::Forwards => &self.forwards,
			Direction::Backwards => &self.backwards,
		}
	}
}

/// HTTP PUT endpoint `/v1/learn`
///
/// Tokenizes the request body and learns it in both directions.
#[put("/v1/learn")]
async fn put_learn(data: web::Data<RwLock<SharedData>>, body: String) -> impl Responder {
	// Tokenize before locking so readers are not blocked by the parser
	let tokens = match JavaScriptTokenizer::new().tokenize(&body) {
		Ok(tokens) => tokens,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.forwards.learn(&tokens);
	shared_data.backwards.learn(&tokens);

	HttpResponse::Ok().body(format!("Learned {} tokens", tokens.len()))
}

/// HTTP GET endpoint `/v1/cross_entropy`
///
/// Returns the cross-entropy of `token` after `context` as plain text
/// (`inf` when the model never saw it). Defaults to the forwards model.
///
/// Context tokens are separated by spaces (`+` in a query string), since
/// `,` is itself a token: `?context=IDENTIFIER+,&token=IDENTIFIER`.
#[get("/v1/cross_entropy")]
async fn get_cross_entropy(data: web::Data<RwLock<SharedData>>, query: web::Query<CrossEntropyParams>) -> impl Responder {
	let direction = query.direction.unwrap_or(Direction::Forwards);
	let context: Vec<Token> = query.context.split_whitespace().map(Token::from_symbol).collect();
	let token = Token::from_symbol(query.token.trim());

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model(direction).cross_entropy(&context, &token) {
		Ok(h) => HttpResponse::Ok().body(h.to_string()),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP PUT endpoint `/v1/score`
///
/// Scores every token of the request body. JSON has no infinity, so
/// unknown contexts and transitions come back as `null`.
#[put("/v1/score")]
async fn put_score(data: web::Data<RwLock<SharedData>>, query: web::Query<ScoreParams>, body: String) -> impl Responder {
	let direction = query.direction.unwrap_or(Direction::Forwards);
	let tokens = match JavaScriptTokenizer::new().tokenize(&body) {
		Ok(tokens) => tokens,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().json(shared_data.model(direction).score(&tokens))
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let stats: Vec<ModelStats> = [&shared_data.forwards, &shared_data.backwards]
		.into_iter()
		.map(|model| ModelStats {
			direction: model.direction(),
			sequences: model.sequences_learned(),
			contexts: model.table().len(),
		})
		.collect();
	HttpResponse::Ok().json(stats)
}

/// Main entry point for the server.
///
/// Optionally learns a corpus directory in both directions, wraps the
/// models in a `RwLock` and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let config = ServerConfig::parse();

	let mut shared_data = SharedData::new();
	if let Some(corpus) = &config.corpus {
		let (forwards, backwards) = TrigramModel::pair_from_directory(corpus, &JavaScriptTokenizer::new(), &config.extension)?;
		shared_data.forwards = forwards;
		shared_data.backwards = backwards;
	}
	let shared_model = web::Data::new(RwLock::new(shared_data));

	info!("listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.service(put_learn)
			.service(get_cross_entropy)
			.service(put_score)
			.service(get_stats)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await?;

	Ok(())
}
