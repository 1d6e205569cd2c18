//! REST API for the shipping service.
//!
//! Exposes package calculation to the checkout system and the package
//! catalog operations to the admin console. Uses Axum as the web framework
//! and supports CORS.

use std::sync::{Arc, OnceLock};

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};

use crate::config::{ApiConfig, ShippingConfig};
use crate::model::{PackageDefinition, PackageDraft};
use crate::planner::{DecomposedPackage, PlanEvent, ShippingPlan, calculate_packages_with_progress};
use crate::ranges::RangeValidation;
use crate::selector::{SelectionTier, select_with_tier};
use crate::store::{MemoryBackend, PackageStore, StoreError};
use crate::types::{QuantityRange, validation};

pub type SharedStore = Arc<Mutex<PackageStore<MemoryBackend>>>;

#[derive(Clone)]
pub struct ApiState {
    store: SharedStore,
    shipping: ShippingConfig,
}

impl ApiState {
    pub fn new(store: PackageStore<MemoryBackend>, shipping: ShippingConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            shipping,
        }
    }
}

static OPENAPI_DOC: OnceLock<utoipa::openapi::OpenApi> = OnceLock::new();

// SRI hashes verified against https://unpkg.com/swagger-ui-dist@5.17.14/ on 2025-10-29.
const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
    <head>
        <meta charset="utf-8" />
        <title>nursery-shipping API Docs</title>
        <link
            rel="stylesheet"
            href="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css"
            integrity="sha384-wxLW6kwyHktdDGr6Pv1zgm/VGJh99lfUbzSn6HNHBENZlCN7W602k9VkGdxuFvPn"
            crossorigin="anonymous"
        />
    </head>
    <body>
        <div id="swagger-ui"></div>
        <script
            src="https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js"
            integrity="sha384-wmyclcVGX/WhUkdkATwhaK1X1JtiNrr2EoYJ+diV3vj4v6OC5yCeSu+yW13SYJep"
            crossorigin="anonymous"
        ></script>
        <script>
            window.onload = function () {
                window.ui = SwaggerUIBundle({
                    url: "/docs/openapi.json",
                    dom_id: "#swagger-ui",
                });
            };
        </script>
    </body>
    </html>"##;

fn openapi_doc() -> &'static utoipa::openapi::OpenApi {
    OPENAPI_DOC.get_or_init(ApiDoc::openapi)
}

/// Request body for `POST /shipping/calculate`.
#[derive(Deserialize, ToSchema)]
#[schema(example = json!({ "total_quantity": 25, "weight_per_item": 0.5 }))]
pub struct CalculateRequest {
    /// Items in the order. Values above the configured maximum are rejected.
    pub total_quantity: i64,
    /// Pounds per item; the configured default is used when omitted.
    #[serde(default)]
    #[schema(nullable = true)]
    pub weight_per_item: Option<f64>,
}

/// Request body for `POST /shipping/select`.
#[derive(Deserialize, ToSchema)]
pub struct SelectRequest {
    pub quantity: u64,
}

#[derive(Serialize, ToSchema)]
pub struct SelectResponse {
    pub package: Option<PackageDefinition>,
    pub tier: Option<SelectionTier>,
}

#[derive(Deserialize, ToSchema)]
pub struct ActiveRequest {
    pub is_active: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct ReorderRequest {
    pub ids: Vec<String>,
}

/// Request body for `POST /packages/validate-range`.
#[derive(Deserialize, ToSchema)]
#[schema(example = json!({ "min_quantity": 3, "max_quantity": 6 }))]
pub struct RangeRequest {
    pub min_quantity: u32,
    pub max_quantity: u32,
    #[serde(default)]
    #[schema(nullable = true)]
    pub exclude_id: Option<String>,
}

#[derive(Serialize, ToSchema)]
struct ErrorResponse {
    error: String,
    details: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

fn error_response(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

fn json_deserialize_error(err: JsonRejection) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid JSON data",
        err.to_string(),
    )
}

fn validation_error(details: impl Into<String>) -> Response {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        "Invalid input data",
        details,
    )
}

fn store_error(err: StoreError) -> Response {
    match err {
        StoreError::Validation(err) => validation_error(err.to_string()),
        StoreError::RangeConflict { message, .. } => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Overlapping quantity range",
            message,
        ),
        StoreError::NotFound(id) => error_response(
            StatusCode::NOT_FOUND,
            "Package not found",
            format!("No package with id {}", id),
        ),
        StoreError::InvalidOrder(details) => validation_error(details),
        err @ (StoreError::Backend(_) | StoreError::Seed(_)) => {
            tracing::error!(error = %err, "Package store failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Package store failure",
                err.to_string(),
            )
        }
    }
}

fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    payload.map(|Json(value)| value).map_err(json_deserialize_error)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handle_calculate,
        handle_select,
        handle_list_packages,
        handle_create_package,
        handle_update_package,
        handle_delete_package,
        handle_set_default,
        handle_set_active,
        handle_reorder,
        handle_validate_range
    ),
    components(
        schemas(
            CalculateRequest,
            SelectRequest,
            SelectResponse,
            ActiveRequest,
            ReorderRequest,
            RangeRequest,
            ErrorResponse,
            ShippingPlan,
            DecomposedPackage,
            PackageDefinition,
            PackageDraft,
            RangeValidation,
            SelectionTier
        )
    ),
    tags(
        (name = "shipping", description = "Package calculation for orders"),
        (name = "packages", description = "Package catalog administration")
    )
)]
struct ApiDoc;

/// Builds the application router.
pub fn router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/shipping/calculate", post(handle_calculate))
        .route("/shipping/select", post(handle_select))
        .route(
            "/packages",
            get(handle_list_packages).post(handle_create_package),
        )
        .route("/packages/reorder", post(handle_reorder))
        .route("/packages/validate-range", post(handle_validate_range))
        .route(
            "/packages/{id}",
            put(handle_update_package).delete(handle_delete_package),
        )
        .route("/packages/{id}/default", post(handle_set_default))
        .route("/packages/{id}/active", post(handle_set_active))
        .route("/docs/openapi.json", get(serve_openapi_json))
        .route("/docs", get(serve_openapi_ui))
        .layer(cors)
        .with_state(state)
}

/// Starts the API server and blocks until it terminates.
pub async fn start_api_server(config: ApiConfig, state: ApiState) -> std::io::Result<()> {
    let app = router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        "Server running on http://{}:{}",
        config.display_host(),
        config.port()
    );
    if config.binds_to_all_interfaces() {
        tracing::info!("Local access: http://localhost:{}", config.port());
    }
    tracing::info!("Documentation: http://{}:{}/docs", config.display_host(), config.port());

    axum::serve(listener, app).await
}

/// Handler for POST /shipping/calculate.
///
/// Splits the order quantity across the active package catalog.
#[utoipa::path(
    post,
    path = "/shipping/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Package plan for the order", body = ShippingPlan),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Calculation failed", body = ErrorResponse)
    ),
    tag = "shipping"
)]
async fn handle_calculate(
    State(state): State<ApiState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let max_quantity = state.shipping.max_quantity();
    if u64::try_from(request.total_quantity).is_ok_and(|quantity| quantity > max_quantity) {
        return validation_error(format!(
            "Total quantity must not exceed {}, got: {}",
            max_quantity, request.total_quantity
        ));
    }

    let weight_per_item = request
        .weight_per_item
        .unwrap_or_else(|| state.shipping.default_weight_per_item());
    if let Err(details) = validation::validate_weight(weight_per_item, "Weight per item") {
        return validation_error(details);
    }

    let active = state.store.lock().await.active();
    let total_quantity = request.total_quantity;
    let planned = tokio::task::spawn_blocking(move || {
        calculate_packages_with_progress(total_quantity, weight_per_item, &active, |evt| match evt {
            PlanEvent::PackageAssigned {
                index,
                package_name,
                tier,
                item_count,
                remaining,
                ..
            } => tracing::debug!(
                index,
                package = %package_name,
                tier = tier.code(),
                item_count,
                remaining,
                "Package assigned"
            ),
            PlanEvent::Finished {
                packages,
                total_weight,
            } => tracing::debug!(packages, total_weight, "Plan finished"),
        })
    })
    .await;
    let plan = match planned {
        Ok(plan) => plan,
        Err(err) => {
            tracing::error!(error = %err, "Package calculation task failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Calculation failed",
                err.to_string(),
            );
        }
    };

    if plan.is_empty() {
        tracing::info!(total_quantity, "{}", plan.summary);
    } else {
        tracing::info!(
            total_quantity,
            items = plan.total_items(),
            packages = plan.total_packages,
            "{}",
            plan.summary
        );
    }

    (StatusCode::OK, Json(plan)).into_response()
}

/// Handler for POST /shipping/select.
#[utoipa::path(
    post,
    path = "/shipping/select",
    request_body = SelectRequest,
    responses(
        (status = 200, description = "Best package for the quantity, if any", body = SelectResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "shipping"
)]
async fn handle_select(
    State(state): State<ApiState>,
    payload: Result<Json<SelectRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let store = state.store.lock().await;
    let selection = select_with_tier(request.quantity, store.list());
    let response = SelectResponse {
        package: selection.map(|(package, _)| package.clone()),
        tier: selection.map(|(_, tier)| tier),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for GET /packages.
#[utoipa::path(
    get,
    path = "/packages",
    responses(
        (status = 200, description = "All package definitions by sort order", body = [PackageDefinition])
    ),
    tag = "packages"
)]
async fn handle_list_packages(State(state): State<ApiState>) -> Response {
    let packages = state.store.lock().await.list().to_vec();
    (StatusCode::OK, Json(packages)).into_response()
}

/// Handler for POST /packages.
#[utoipa::path(
    post,
    path = "/packages",
    request_body = PackageDraft,
    responses(
        (status = 201, description = "Package created", body = PackageDefinition),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid fields or overlapping range", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_create_package(
    State(state): State<ApiState>,
    payload: Result<Json<PackageDraft>, JsonRejection>,
) -> Response {
    let draft = match parse_json(payload) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match state.store.lock().await.create(draft) {
        Ok(package) => (StatusCode::CREATED, Json(package)).into_response(),
        Err(err) => store_error(err),
    }
}

/// Handler for PUT /packages/{id}.
#[utoipa::path(
    put,
    path = "/packages/{id}",
    params(("id" = String, Path, description = "Package id")),
    request_body = PackageDraft,
    responses(
        (status = 200, description = "Package updated", body = PackageDefinition),
        (status = NOT_FOUND, description = "Unknown package", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid fields or overlapping range", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_update_package(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<PackageDraft>, JsonRejection>,
) -> Response {
    let draft = match parse_json(payload) {
        Ok(draft) => draft,
        Err(response) => return response,
    };

    match state.store.lock().await.update(&id, draft) {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => store_error(err),
    }
}

/// Handler for DELETE /packages/{id}.
#[utoipa::path(
    delete,
    path = "/packages/{id}",
    params(("id" = String, Path, description = "Package id")),
    responses(
        (status = 204, description = "Package deleted"),
        (status = NOT_FOUND, description = "Unknown package", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_delete_package(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.lock().await.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => store_error(err),
    }
}

/// Handler for POST /packages/{id}/default.
#[utoipa::path(
    post,
    path = "/packages/{id}/default",
    params(("id" = String, Path, description = "Package id")),
    responses(
        (status = 200, description = "Package is now the only default", body = PackageDefinition),
        (status = NOT_FOUND, description = "Unknown package", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_set_default(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    match state.store.lock().await.set_default(&id) {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => store_error(err),
    }
}

/// Handler for POST /packages/{id}/active.
#[utoipa::path(
    post,
    path = "/packages/{id}/active",
    params(("id" = String, Path, description = "Package id")),
    request_body = ActiveRequest,
    responses(
        (status = 200, description = "Activation changed", body = PackageDefinition),
        (status = NOT_FOUND, description = "Unknown package", body = ErrorResponse),
        (status = UNPROCESSABLE_ENTITY, description = "Range overlaps an active package", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_set_active(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<ActiveRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.store.lock().await.set_active(&id, request.is_active) {
        Ok(package) => (StatusCode::OK, Json(package)).into_response(),
        Err(err) => store_error(err),
    }
}

/// Handler for POST /packages/reorder.
///
/// Reorder is best-effort: on failure the catalog is reloaded, and callers
/// should re-read it with `GET /packages`.
#[utoipa::path(
    post,
    path = "/packages/reorder",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Catalog in its new order", body = [PackageDefinition]),
        (status = UNPROCESSABLE_ENTITY, description = "Ids do not match the catalog", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_reorder(
    State(state): State<ApiState>,
    payload: Result<Json<ReorderRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let mut store = state.store.lock().await;
    match store.reorder(&request.ids) {
        Ok(()) => (StatusCode::OK, Json(store.list().to_vec())).into_response(),
        Err(err) => store_error(err),
    }
}

/// Handler for POST /packages/validate-range.
#[utoipa::path(
    post,
    path = "/packages/validate-range",
    request_body = RangeRequest,
    responses(
        (status = 200, description = "Whether the range can be saved", body = RangeValidation),
        (status = UNPROCESSABLE_ENTITY, description = "Invalid request", body = ErrorResponse)
    ),
    tag = "packages"
)]
async fn handle_validate_range(
    State(state): State<ApiState>,
    payload: Result<Json<RangeRequest>, JsonRejection>,
) -> Response {
    let request = match parse_json(payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let candidate = QuantityRange::new(request.min_quantity, request.max_quantity);
    if !candidate.is_well_formed() {
        let result = RangeValidation {
            valid: false,
            conflicting_name: None,
            message: Some(format!(
                "Quantity range {} must satisfy 1 <= minimum <= maximum",
                candidate
            )),
        };
        return (StatusCode::OK, Json(result)).into_response();
    }

    let result = state
        .store
        .lock()
        .await
        .validate_range(candidate, request.exclude_id.as_deref());
    (StatusCode::OK, Json(result)).into_response()
}

async fn serve_openapi_json() -> impl IntoResponse {
    Json(openapi_doc())
}

async fn serve_openapi_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}
