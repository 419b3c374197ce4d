use crate::{
    db::{self, ClimateDatabase, ObservationStore},
    health, index_handler, precipitation, routes, stations, temperature_between,
    temperature_since, tobs, Cli, WindowResolver,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use climate_api_core::path_exists;
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub store: Arc<dyn ObservationStore>,
    pub window: WindowResolver,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::api::precipitation::precipitation,
        routes::api::stations::stations,
        routes::api::tobs::tobs,
        routes::api::temperature::temperature_since,
        routes::api::temperature::temperature_between,
        routes::api::health::health,
    ),
    components(
        schemas(
                db::Station,
                routes::ErrorResponse,
                routes::PrecipitationSeries,
                routes::TemperatureSeries,
                routes::TemperatureSummary,
        )
    ),
    tags(
        (name = "climate api", description = "a read-only RESTful api over daily station precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(cli: &Cli) -> Result<AppState, anyhow::Error> {
    let db_path = cli.db_path();
    if !path_exists(&db_path) {
        return Err(anyhow!("dataset not found at {}", db_path));
    }
    let store = ClimateDatabase::new(&db_path, cli.max_connections(), cli.query_timeout())
        .await
        .map_err(|e| anyhow!("error opening dataset {}: {:#}", db_path, e))?;

    Ok(AppState {
        remote_url: cli.remote_url(),
        store: Arc::new(store),
        window: WindowResolver::new(cli.window_days()),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(temperature_since))
        .route("/api/v1.0/{start}/{end}", get(temperature_between))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default()
        .to_owned();
    info!(target: "http_request", "new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, path: {}, time: {}", response.status().as_str(), path, response_time);

    response
}
