use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use assistant_common::load_profile_env;
use assistant_service_api::{
    calculator_routes, compound_routes, cors_layer, element_routes, embedding_routes, math_routes, misc_routes,
    predict_routes, setup_tracing, GlobalState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = load_profile_env("config");
    setup_tracing();
    tracing::info!("[main] Loaded env files {:?}", loaded);

    let global_state = GlobalState::new().await?;
    let settings = global_state.settings.clone();

    let app = Router::new()
        .merge(misc_routes())
        .merge(calculator_routes())
        .merge(element_routes())
        .merge(compound_routes())
        .merge(math_routes())
        .merge(embedding_routes())
        .merge(predict_routes())
        .layer(TimeoutLayer::new(Duration::from_secs(300)))
        .layer(cors_layer(&settings))
        .layer(TraceLayer::new_for_http())
        .with_state(global_state);

    let listener = tokio::net::TcpListener::bind(format!(":::{}", settings.port))
        .await
        .with_context(|| format!("Failed to bind port {}", settings.port))?;

    tracing::info!("{} {} LISTENING ON {}", settings.app_name, settings.version, settings.port);
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
