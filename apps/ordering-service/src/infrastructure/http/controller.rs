//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::dto::{
    LoginRequestDto, PlaceOrderDto, UpdateOrderDto, VerifyResponseDto,
};
use crate::application::ports::{EventPublisherPort, PasswordHasherPort, TokenPort};
use crate::application::services::AdminAuthGate;
use crate::application::use_cases::{ManageOrdersUseCase, PlaceOrderUseCase, TrackOrderUseCase};
use crate::domain::identity::{AdminRepository, AuthError, Principal};
use crate::domain::ordering::{OrderStore, StatusFilter};
use crate::domain::shared::Timestamp;

use super::error::ApiError;
use super::request::{ListOrdersQuery, bearer_token, idempotency_key};
use super::response::{ErrorResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState<S, E, A, T, H>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    /// Use case for checkout.
    pub place_order: Arc<PlaceOrderUseCase<S, E>>,
    /// Use case for public tracking.
    pub track_order: Arc<TrackOrderUseCase<S>>,
    /// Use case for the admin console.
    pub manage_orders: Arc<ManageOrdersUseCase<S, E>>,
    /// Credential gate for admin routes.
    pub auth: Arc<AdminAuthGate<A, T, H>>,
    /// Application version.
    pub version: String,
}

impl<S, E, A, T, H> Clone for AppState<S, E, A, T, H>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    fn clone(&self) -> Self {
        Self {
            place_order: Arc::clone(&self.place_order),
            track_order: Arc::clone(&self.track_order),
            manage_orders: Arc::clone(&self.manage_orders),
            auth: Arc::clone(&self.auth),
            version: self.version.clone(),
        }
    }
}

impl<S, E, A, T, H> AppState<S, E, A, T, H>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    fn authorize(&self, headers: &HeaderMap) -> Result<Principal, ApiError> {
        let token = bearer_token(headers)
            .ok_or_else(|| AuthError::unauthenticated("missing bearer token"))?;
        self.auth.verify(token).map_err(|e| {
            tracing::warn!(error = %e, "Admin credential rejected");
            ApiError::from(e)
        })
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<S, E, A, T, H>(state: AppState<S, E, A, T, H>) -> Router
where
    S: OrderStore + 'static,
    E: EventPublisherPort + 'static,
    A: AdminRepository + 'static,
    T: TokenPort + 'static,
    H: PasswordHasherPort + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/orders", post(place_order))
        .route("/orders/{id}", get(track_order))
        .route("/admin/login", post(login))
        .route("/admin/verify", get(verify))
        .route("/admin/orders", get(list_orders))
        .route("/admin/orders/stats", get(order_stats))
        .route("/admin/orders/{id}", get(get_order).put(update_order))
        .route("/admin/orders/{id}/advance", post(advance_order))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
) -> impl IntoResponse
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Timestamp::now(),
        version: state.version.clone(),
    })
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Not found")))
}

// ============================================================================
// Public
// ============================================================================

/// Checkout endpoint.
async fn place_order<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
    payload: Result<Json<PlaceOrderDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    let Json(dto) = payload?;
    let placed = state
        .place_order
        .execute(dto, idempotency_key(&headers))
        .await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

/// Public tracking endpoint.
async fn track_order<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    Ok(Json(state.track_order.execute(&id).await?))
}

// ============================================================================
// Admin auth
// ============================================================================

/// Admin login endpoint.
async fn login<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    payload: Result<Json<LoginRequestDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    let Json(request) = payload?;
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let response = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(response))
}

/// Token check used by the admin console on load.
async fn verify<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    match state.authorize(&headers) {
        Ok(principal) => (
            StatusCode::OK,
            Json(VerifyResponseDto {
                valid: true,
                email: Some(principal.email().to_string()),
            }),
        ),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(VerifyResponseDto {
                valid: false,
                email: None,
            }),
        ),
    }
}

// ============================================================================
// Admin orders
// ============================================================================

/// List orders, newest first.
async fn list_orders<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    let principal = state.authorize(&headers)?;
    let filter: StatusFilter = query.status.as_deref().unwrap_or_default().trim().parse()?;
    let orders = state.manage_orders.list_orders(&principal, filter).await?;
    Ok(Json(orders))
}

/// Dashboard counters.
async fn order_stats<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    let principal = state.authorize(&headers)?;
    let stats = state
        .manage_orders
        .stats(&principal, Timestamp::now())
        .await?;
    Ok(Json(stats))
}

/// Single order for the admin console.
async fn get_order<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    let principal = state.authorize(&headers)?;
    Ok(Json(state.manage_orders.get_order(&principal, &id).await?))
}

/// Status change and/or estimate override.
async fn update_order<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    payload: Result<Json<UpdateOrderDto>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    // Credentials are checked before the body is looked at.
    let principal = state.authorize(&headers)?;
    let Json(dto) = payload?;
    let order = state
        .manage_orders
        .update_order(&principal, &id, dto)
        .await?;
    Ok(Json(order))
}

/// One-tap progression to the next canonical stage.
async fn advance_order<S, E, A, T, H>(
    State(state): State<AppState<S, E, A, T, H>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    S: OrderStore,
    E: EventPublisherPort,
    A: AdminRepository,
    T: TokenPort,
    H: PasswordHasherPort,
{
    let principal = state.authorize(&headers)?;
    let order = state.manage_orders.advance_order(&principal, &id).await?;
    Ok(Json(order))
}
