use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::config::Config;
use api::gql::build_schema;
use api::state::AppState;
use infra::db::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let db = Db::new();
    if config.seed_data {
        infra::seed::seed(&db)?;
    } else {
        tracing::info!("Starting with an empty store (SEED_DATA=false)");
    }

    let state = AppState::new(db);

    // Build GraphQL schema from the gql module
    let schema = build_schema(state, &config.gql);

    let app = build_router(schema, &config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
