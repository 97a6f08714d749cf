//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::availability::RoomAvailabilityService;
use crate::application::rates::{
    PeakSeasonRateService, PricingService, RateSettingsReconciler, RateSettingsService,
};
use crate::domain::RepositoryProvider;

use super::modules::availability::{self, AvailabilityAppState};
use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::rate_settings::{self, RateSettingsAppState};
use super::modules::rates::{self, RatesAppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Rates
        rates::handlers::room_rates,
        rates::handlers::daily_rates,
        rates::handlers::cumulative_daily_rates,
        rates::handlers::create_rate,
        rates::handlers::update_rate,
        rates::handlers::delete_rate,
        // Rate settings
        rate_settings::handlers::get_rate_setting,
        rate_settings::handlers::update_rate_setting,
        // Availability
        availability::handlers::room_windows,
        availability::handlers::block_dates,
        availability::handlers::unblock_dates,
    ),
    tags(
        (name = "Rates", description = "Adjusted prices and manual peak-season rates"),
        (name = "Rate Settings", description = "Automatic holiday/long-weekend rate configuration"),
        (name = "Availability", description = "Tenant-initiated room blocks"),
        (name = "Health", description = "Service health"),
    )
)]
struct ApiDoc;

/// Build the full application router.
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    reconciler: Arc<RateSettingsReconciler>,
    db: DatabaseConnection,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let rates_state = RatesAppState {
        pricing: Arc::new(PricingService::new(repos.clone())),
        rate_service: Arc::new(PeakSeasonRateService::new(repos.clone())),
    };
    let settings_state = RateSettingsAppState {
        settings: Arc::new(RateSettingsService::new(repos.clone(), reconciler)),
    };
    let availability_state = AvailabilityAppState {
        availability: Arc::new(RoomAvailabilityService::new(repos)),
    };
    let health_state = HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = MetricsState {
        handle: prometheus_handle,
    };

    let rates_routes = Router::new()
        .route(
            "/rates/{id}",
            get(rates::handlers::room_rates)
                .put(rates::handlers::update_rate)
                .delete(rates::handlers::delete_rate),
        )
        .route("/rates/{id}/daily", get(rates::handlers::daily_rates))
        .route(
            "/rates/{id}/daily/cumulative",
            get(rates::handlers::cumulative_daily_rates),
        )
        .route(
            "/rates/properties/{property_id}",
            post(rates::handlers::create_rate),
        )
        .with_state(rates_state);

    let settings_routes = Router::new()
        .route(
            "/rate-settings/{property_id}",
            get(rate_settings::handlers::get_rate_setting)
                .put(rate_settings::handlers::update_rate_setting),
        )
        .with_state(settings_state);

    let availability_routes = Router::new()
        .route(
            "/availability/rooms/{room_id}",
            get(availability::handlers::room_windows),
        )
        .route(
            "/availability/rooms/{room_id}/block",
            post(availability::handlers::block_dates),
        )
        .route(
            "/availability/{availability_id}",
            axum::routing::delete(availability::handlers::unblock_dates),
        )
        .with_state(availability_state);

    let api = Router::new()
        .merge(rates_routes)
        .merge(settings_routes)
        .merge(availability_routes);

    Router::new()
        .nest("/api/v1", api)
        .route(
            "/health",
            get(health::handlers::health_check).with_state(health_state),
        )
        .route(
            "/metrics",
            get(metrics::handlers::prometheus_metrics).with_state(metrics_state),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
