//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::http::{HeaderValue, Method};
use axum::{middleware, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::carriers::{
    self, carrier_routes, AddressDto, AddressTypeDto, CarrierDto, CarrierHandlerState,
    CarrierStatusDto, CreateCarrierRequest, IdentificationCodeDto, IdentificationCodeTypeDto,
    InsuranceDto, UpdateCarrierRequest, CARRIERS_PATH,
};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use crate::application::CarrierService;
use crate::config::CorsConfig;
use crate::shared::PaginatedResult;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        carriers::list_carriers,
        carriers::get_carrier,
        carriers::create_carrier,
        carriers::update_carrier,
        carriers::delete_carrier,
    ),
    components(
        schemas(
            ApiResponse<String>,
            ApiResponse<CarrierDto>,
            PaginatedResult<CarrierDto>,
            CarrierDto,
            CarrierStatusDto,
            AddressDto,
            AddressTypeDto,
            InsuranceDto,
            IdentificationCodeDto,
            IdentificationCodeTypeDto,
            CreateCarrierRequest,
            UpdateCarrierRequest,
            HealthResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Service and storage health"),
        (name = "Carriers", description = "Freight carrier records: paginated listing and CRUD"),
    ),
    info(
        title = "FreightCMS Carriers API",
        version = "1.0.0",
        description = "REST API for managing freight carriers",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the outside
pub struct RouterConfig {
    pub service: Arc<CarrierService>,
    /// Storage backend name reported by `/health`
    pub backend: &'static str,
    pub cors: CorsConfig,
    /// `None` disables `/metrics` and the request metrics middleware
    pub metrics: Option<MetricsState>,
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Create the API router with all routes
pub fn create_api_router(config: RouterConfig) -> Router {
    let health_state = HealthState {
        service: config.service.clone(),
        backend: config.backend,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let carrier_state = CarrierHandlerState {
        service: config.service,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest(CARRIERS_PATH, carrier_routes(carrier_state));

    if let Some(metrics_state) = config.metrics {
        router = router
            .route("/metrics", get(prometheus_metrics).with_state(metrics_state))
            .layer(middleware::from_fn(http_metrics_middleware));
    }

    router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
}
