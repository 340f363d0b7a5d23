use std::time::Duration;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLProtocol, GraphQLWebSocket};
use axum::{
    extract::{Request, WebSocketUpgrade},
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::error::AppError;
use crate::gql::AppSchema;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Build the Axum router with health endpoint and GraphQL
pub fn build_router(schema: AppSchema, config: &Config) -> Router {
    let mut router = Router::new()
        // Simple liveness check
        .route("/health", get(health))
        // GraphQL over HTTP (POST) and websockets (GET upgrade)
        .route(
            "/graphql",
            get({
                let schema = schema.clone();
                move |protocol, upgrade| graphql_ws_handler(protocol, upgrade, schema)
            })
            .post({
                let schema = schema.clone();
                move |req| graphql_handler(req, schema)
            }),
        );

    // The IDE is only useful when clients may introspect the schema.
    if config.gql.introspection {
        router = router.route("/graphiql", get(graphiql));
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    router
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([CONTENT_TYPE])
                .allow_credentials(true),
        )
}

/// Execute a single GraphQL request sent as JSON.
async fn graphql_handler(req: Request, schema: AppSchema) -> Result<Response, AppError> {
    let body_bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))?;

    let gql_request: async_graphql::Request = serde_json::from_slice(&body_bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid GraphQL request: {e}")))?;

    let gql_response = schema.execute(gql_request).await;
    if gql_response.is_err() {
        tracing::debug!(errors = ?gql_response.errors, "GraphQL request failed");
    }

    Ok(Json(gql_response).into_response())
}

/// WebSocket handler for GraphQL subscriptions.
async fn graphql_ws_handler(
    protocol: GraphQLProtocol,
    upgrade: WebSocketUpgrade,
    schema: AppSchema,
) -> Response {
    upgrade
        .protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |stream| GraphQLWebSocket::new(stream, schema, protocol).serve())
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/graphql")
            .finish(),
    )
}

async fn health() -> &'static str {
    "ok"
}
