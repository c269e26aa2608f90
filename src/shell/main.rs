use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use study_together::shared::core::primitives::SystemClock;
use study_together::shared::infrastructure::local_store::json_file::JsonFileLocalStore;
use study_together::shell::config::AppConfig;
use study_together::shell::graphql::{AppSchema, build_schema};
use study_together::shell::http::router;
use study_together::shell::state::{AppState, InMemoryAdapters};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();

    // In-memory store for now; preferences persist to a JSON file.
    let state = AppState::new(
        InMemoryAdapters::default(),
        Arc::new(JsonFileLocalStore::open(&config.preferences_path)),
        Arc::new(SystemClock),
        config.tick_period,
        config.session_history,
    );

    let schema = build_schema(state.clone());

    let app = Router::new()
        .route("/gql", get(graphiql).post(graphql))
        .route_service("/gql/ws", GraphQLSubscription::new(schema.clone()))
        .layer(Extension(schema))
        .merge(router(state))
        .layer(TraceLayer::new_for_http());

    tracing::info!("HTTP API: http://{}", config.addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.addr);
    tracing::info!("GraphQL subscriptions: ws://{}/gql/ws", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> axum::response::Html<String> {
    use async_graphql::http::GraphiQLSource;
    axum::response::Html(
        GraphiQLSource::build()
            .endpoint("/gql")
            .subscription_endpoint("/gql/ws")
            .finish(),
    )
}
