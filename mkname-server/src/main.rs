use std::path::Path;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mkname_core::io::list_files;
use mkname_core::{ConfigLoader, Dice, Generator, ModKind, NameConfig, NameError, NameFilter, NamePool};

/// Directory the `/v1/pools` endpoints work in.
const DATA_DIR: &str = "./data";

/// Query parameters shared by the generating endpoints.
#[derive(Deserialize)]
struct GenerateParams {
	count: Option<usize>,
	syllables: Option<usize>,
	modifier: Option<String>,
	source: Option<String>,
	culture: Option<String>,
	date: Option<i32>,
	gender: Option<String>,
	kind: Option<String>,
}

#[derive(Deserialize)]
struct ModifyQuery {
	name: Option<String>,
	modifier: Option<String>,
}

#[derive(Deserialize)]
struct PoolQuery {
	name: Option<String>,
}

struct SharedData {
	config: NameConfig,
	pool: NamePool,
	dice: Dice,
}

#[derive(Clone, Copy)]
enum Method {
	Compound,
	Syllable,
	Pick,
}

impl GenerateParams {
	fn filter(&self) -> NameFilter {
		NameFilter {
			source: self.source.clone(),
			culture: self.culture.clone(),
			date: self.date,
			gender: self.gender.clone(),
			kind: self.kind.clone(),
		}
	}

	/// Parses the optional mod name.
	fn modifier(&self) -> Result<Option<ModKind>, NameError> {
		self.modifier.as_deref().filter(|s| !s.is_empty()).map(str::parse::<ModKind>).transpose()
	}
}

/// Maps a library error to a response: caller mistakes are 400, the rest 500.
fn error_response(e: NameError) -> HttpResponse {
	if e.is_input_error() {
		HttpResponse::BadRequest().body(e.to_string())
	} else {
		warn!(error = %e, "request failed");
		HttpResponse::InternalServerError().body(e.to_string())
	}
}

/// Runs one batch against the shared pool and dice.
fn generate(data: &Mutex<SharedData>, query: &GenerateParams, method: Method) -> HttpResponse {
	let modifier = match query.modifier() {
		Ok(m) => m,
		Err(e) => return error_response(e),
	};
	let count = query.count.unwrap_or(1);
	let syllables = query.syllables.unwrap_or(2);

	let mut guard = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Pool lock failed"),
	};
	let shared = &mut *guard;

	let result = Generator::from_pool(shared.config.clone(), &shared.pool, &query.filter(), &mut shared.dice).and_then(
		|mut generator| match method {
			Method::Compound => generator.compound(count, modifier),
			Method::Syllable => generator.syllable(syllables, count, modifier),
			Method::Pick => generator.pick(count, modifier),
		},
	);

	match result {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => error_response(e),
	}
}

/// HTTP GET endpoint `/v1/compound`
///
/// Returns `count` compound names, one per line.
#[get("/v1/compound")]
async fn get_compound(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	generate(&data, &query, Method::Compound)
}

/// HTTP GET endpoint `/v1/syllable`
///
/// Returns `count` names of `syllables` syllables (default 2), one per line.
#[get("/v1/syllable")]
async fn get_syllable(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	generate(&data, &query, Method::Syllable)
}

#[get("/v1/pick")]
async fn get_pick(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	generate(&data, &query, Method::Pick)
}

#[get("/v1/modify")]
async fn get_modify(data: web::Data<Mutex<SharedData>>, query: web::Query<ModifyQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty name"),
	};
	let kind = match query.modifier.as_deref().map(str::parse::<ModKind>) {
		Some(Ok(kind)) => kind,
		Some(Err(e)) => return error_response(e),
		None => return HttpResponse::BadRequest().body("Missing modifier"),
	};

	let mut guard = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Pool lock failed"),
	};
	let shared = &mut *guard;

	match kind.to_mod(&shared.config).apply(name, &shared.config, &mut shared.dice) {
		Ok(modified) => HttpResponse::Ok().body(modified),
		Err(e) => error_response(e),
	}
}

#[get("/v1/mods")]
async fn get_mods() -> impl Responder {
	let names: Vec<&str> = ModKind::ALL.iter().map(|kind| kind.name()).collect();
	HttpResponse::Ok().body(names.join("\n"))
}

#[get("/v1/pools")]
async fn get_pools() -> impl Responder {
	match list_files(DATA_DIR, &["json", "txt"]) {
		Ok(files) => HttpResponse::Ok().body(files.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list pools"),
	}
}

#[put("/v1/load_pool")]
async fn put_pool(data: web::Data<Mutex<SharedData>>, query: web::Query<PoolQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty pool name"),
	};
	// Only files directly inside the data directory can be loaded.
	if Path::new(name).file_name().and_then(|f| f.to_str()) != Some(name) {
		return HttpResponse::BadRequest().body("Pool name must be a file name");
	}

	let pool = match NamePool::load(Path::new(DATA_DIR).join(name)) {
		Ok(p) => p,
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load pool: {e}")),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Pool lock failed"),
	};
	info!(pool = name, names = pool.len(), "pool loaded");
	shared_data.pool = pool;

	HttpResponse::Ok().body("Pool loaded successfully")
}

/// Main entry point for the server.
///
/// Loads the configuration and the default pool the same way the CLI does,
/// wraps them in a `Mutex` and serves the endpoints above.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Logging follows `RUST_LOG`, defaulting to `info`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

	let config = ConfigLoader::load(None).map_err(std::io::Error::other)?;
	let pool = ConfigLoader::resolve_pool(None, &config)
		.and_then(|source| source.load())
		.map_err(std::io::Error::other)?;
	info!(names = pool.len(), "default pool loaded");

	let shared_data = SharedData { config, pool, dice: Dice::from_entropy() };
	let shared_pool = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_pool.clone())
			.service(get_compound)
			.service(get_syllable)
			.service(get_pick)
			.service(get_modify)
			.service(get_mods)
			.service(get_pools)
			.service(put_pool)
	})
	.bind(("127.0.0.1", 5000))?
	.run()
	.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};

	fn state(names: &[&str]) -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData {
			config: NameConfig::default(),
			pool: NamePool::from_names(names.iter().copied()),
			dice: Dice::seeded(7),
		}))
	}

	#[actix_web::test]
	async fn pick_returns_pool_names() {
		let app = test::init_service(App::new().app_data(state(&["spam", "eggs"])).service(get_pick)).await;
		let req = test::TestRequest::get().uri("/v1/pick?count=3").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let body = String::from_utf8(body.to_vec()).unwrap();
		assert_eq!(body.lines().count(), 3);
		assert!(body.lines().all(|line| line == "spam" || line == "eggs"));
	}

	#[actix_web::test]
	async fn unknown_mod_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(state(&["spam"])).service(get_compound)).await;
		let req = test::TestRequest::get().uri("/v1/compound?modifier=sparkle").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn empty_filter_result_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(state(&["spam"])).service(get_syllable)).await;
		let req = test::TestRequest::get().uri("/v1/syllable?kind=surname").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn modify_applies_the_mod() {
		let app = test::init_service(App::new().app_data(state(&["spam"])).service(get_modify)).await;
		let req = test::TestRequest::get().uri("/v1/modify?name=Bacon&modifier=double_letter").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body.len(), "Bacon".len() + 1);
	}

	#[actix_web::test]
	async fn pool_names_cannot_escape_the_data_dir() {
		let app = test::init_service(App::new().app_data(state(&["spam"])).service(put_pool)).await;
		let req = test::TestRequest::put().uri("/v1/load_pool?name=../secret.json").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}
}
