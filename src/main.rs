use axum::http::HeaderValue;
use axum::{Extension, Router, routing::get};
use clap::Parser;
use film_catalog::catalog::handlers::{
    handle_actor, handle_director, handle_home, handle_month_count, handle_title_score,
    handle_title_votes, handle_weekday_count,
};
use film_catalog::config::{Cli, Command, ServeArgs};
use film_catalog::ingestion::pipeline;
use film_catalog::search::handlers::handle_recommendations;
use film_catalog::snapshot::Snapshot;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Etl(args) => {
            let options = args.options();
            let report = tokio::task::spawn_blocking(move || pipeline::run(&options)).await??;
            tracing::info!("ETL report: {:?}", report);
            Ok(())
        }
        Command::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    // 1. Snapshot + term index (a failed load aborts startup):
    let path = args.snapshot.clone();
    let snapshot = tokio::task::spawn_blocking(move || Snapshot::load(&path)).await??;
    tracing::info!(
        "Snapshot ready: {} films, {} terms",
        snapshot.catalog.len(),
        snapshot.index.vocabulary_size()
    );
    let snapshot = Arc::new(snapshot);

    // 2. HTTP Router:
    let app = Router::new()
        .route("/", get(handle_home))
        .route("/cantidad_filmaciones_mes/:mes", get(handle_month_count))
        .route("/cantidad_filmaciones_dia/:dia", get(handle_weekday_count))
        .route("/score_titulo/:titulo", get(handle_title_score))
        .route("/votos_titulo/:titulo", get(handle_title_votes))
        .route("/get_actor/:nombre_actor", get(handle_actor))
        .route("/get_director/:nombre_director", get(handle_director))
        .route("/recomendaciones/:titulo", get(handle_recommendations))
        .layer(Extension(snapshot))
        .layer(cors_layer(&args.cors_origins)?)
        .layer(TraceLayer::new_for_http());

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", args.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| HeaderValue::from_str(o))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(origins))
}
