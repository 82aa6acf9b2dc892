use axum::Json;
use axum::{
    extract::{Path, Query},
    http::{HeaderValue, Method, StatusCode},
    response::Html,
    routing::get,
    Router,
};
use log::{error, info};
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use cubesolver::constants::SCRAMBLE_LENGTH;
use cubesolver::facelet::FaceCube;
use cubesolver::moves::Move;
use cubesolver::scramble;
use cubesolver::solver::{self, SolveResult, SolverConfig};

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin("http://127.0.0.1:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET]);
    let app = Router::new()
        .route("/", get(index))
        .route("/solve/:puzzle", get(solve))
        .route("/scramble", get(scramble))
        .layer(cors);

    let app = app.fallback(index);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:32125")
        .await
        .unwrap();
    info!("listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn index() -> Html<&'static str> {
    Html("<p>Solve a cube: http://localhost:32125/solve/<Facelet String></p>
    Example: <a href=\"http://localhost:32125/solve/rrrrrrrrroooooooooggyggyggywbbwbbwbbwwwwwwgggbbbyyyyyy\">
    http://localhost:32125/solve/rrrrrrrrroooooooooggyggyggywbbwbbwbbwwwwwwgggbbbyyyyyy</a>
    <p>Get a scramble: <a href=\"http://localhost:32125/scramble\">http://localhost:32125/scramble</a>
    (optional <code>?length=25&seed=7</code>)</p>")
}

#[derive(Deserialize)]
struct ScrambleParams {
    length: Option<usize>,
    seed: Option<u64>,
}

#[derive(Serialize)]
struct ScrambleResult {
    scramble: Vec<Move>,
    facelet: FaceCube,
}

async fn scramble(Query(params): Query<ScrambleParams>) -> Json<ScrambleResult> {
    let length = params.length.unwrap_or(SCRAMBLE_LENGTH);
    let solved = FaceCube::default();
    let (facelet, scramble) = match params.seed {
        Some(seed) => scramble::scramble(&solved, length, &mut StdRng::seed_from_u64(seed)),
        None => scramble::scramble(&solved, length, &mut thread_rng()),
    };
    Json(ScrambleResult { scramble, facelet })
}

/// Solving is CPU bound, so it runs on the blocking pool and the result comes back once.
async fn solve(Path(puzzle): Path<String>) -> Result<Json<SolveResult>, (StatusCode, String)> {
    let cube = FaceCube::try_from(puzzle.as_str())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let result = tokio::task::spawn_blocking(move || solver::solver(&cube, SolverConfig::default()))
        .await
        .map_err(|e| {
            error!("solver task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    info!(
        "solved {} in {} moves ({:?}, solved: {})",
        puzzle,
        result.solution.len(),
        result.method,
        result.solved
    );
    Ok(Json(result))
}
