use crate::routes;
use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayerBuilder;
use http::{Method, header};
use sea_orm::DatabaseConnection;
use sentry_tower::NewSentryLayer;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Routes of the service without metrics and sentry layers.
pub(crate) fn create_router(seaorm_pool: DatabaseConnection) -> Router {
    Router::new()
        .merge(routes::swagger::create_router())
        .nest("/exams", routes::exams::create_router())
        .nest(
            "/api/v0",
            Router::new().nest("/status", routes::api::v0::status::create_router()),
        )
        .layer(Extension(seaorm_pool))
}

pub(crate) fn create_app(origins: &[String], seaorm_pool: DatabaseConnection) -> anyhow::Result<Router> {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("api")
        .with_default_metrics()
        .build_pair();

    if !origins.is_empty() {
        tracing::info!(?origins, "allowing origins");
    }

    let cors = CorsLayer::new()
        .allow_origin(
            origins
                .iter()
                .map(|origin| origin.parse())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600));

    let app = create_router(seaorm_pool)
        .layer(cors)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(
            // Router layers are called bottom to top
            // ServiceBuilder layers are called top to bottom
            ServiceBuilder::new()
                .layer(NewSentryLayer::new_from_top())
                .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
                .layer(prometheus_layer),
        )
        .with_state(());
    Ok(app)
}
