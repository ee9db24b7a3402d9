//! HTTP/JSON API server implementation.
//!
//! A thin presentation surface over the application services: it
//! parses requests, delegates, and maps [`ServiceError`] to HTTP
//! status codes. No business logic lives here.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{ClientService, OrderService, ProductService, ServiceError};
use crate::domain::{Bill, Client, Order, Product};
use crate::infrastructure::persistence::StoreError;

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Client management service.
    pub clients: Arc<ClientService>,
    /// Product management service.
    pub products: Arc<ProductService>,
    /// Order placement workflow.
    pub orders: Arc<OrderService>,
}

/// Create the Axum router with all endpoints.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/clients", get(list_clients).post(create_client))
        .route(
            "/v1/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .route("/v1/products", get(list_products).post(create_product))
        .route(
            "/v1/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/v1/orders", get(list_orders).post(place_order))
        .route("/v1/bills", get(list_bills))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

// ============================================================================
// Clients
// ============================================================================

/// Client fields supplied by the caller; the id is backend-assigned.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClientRequest {
    /// Full name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact email.
    pub email: String,
    /// Age in years.
    pub age: i64,
}

impl ClientRequest {
    fn into_client(self, id: i64) -> Client {
        Client {
            id,
            name: self.name,
            address: self.address,
            email: self.email,
            age: self.age,
        }
    }
}

async fn list_clients(State(state): State<AppState>) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.clients.find_all().await?))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Client>, ApiError> {
    state
        .clients
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("client", id))
}

async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<ClientRequest>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let mut client = req.into_client(0);
    client.id = state.clients.insert(&client).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ClientRequest>,
) -> Result<Json<Client>, ApiError> {
    let client = req.into_client(id);
    state.clients.update(&client).await?;
    Ok(Json(client))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Products
// ============================================================================

/// Product fields supplied by the caller; the id is backend-assigned.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductRequest {
    /// Display name.
    pub name: String,
    /// Unit price as a decimal string.
    pub price: Decimal,
    /// Quantity on hand.
    pub quantity: i64,
}

impl ProductRequest {
    fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_all().await?))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("product", id))
}

async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let mut product = req.into_product(0);
    product.id = state.products.insert(&product).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = req.into_product(id);
    state.products.update(&product).await?;
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Orders and bills
// ============================================================================

/// Request to place an order.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Client placing the order.
    pub client_id: i64,
    /// Product being ordered.
    pub product_id: i64,
    /// Requested quantity.
    pub quantity: i64,
}

/// Response from a successful placement.
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    /// The persisted order's id.
    pub order_id: i64,
    /// The audit-log entry for the purchase.
    pub bill: Bill,
}

async fn place_order(
    State(state): State<AppState>,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), ApiError> {
    tracing::info!(
        client_id = req.client_id,
        product_id = req.product_id,
        quantity = req.quantity,
        "placing order"
    );
    let receipt = state
        .orders
        .place_order(req.client_id, req.product_id, req.quantity)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            order_id: receipt.order_id,
            bill: receipt.bill,
        }),
    ))
}

async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.find_all().await?))
}

async fn list_bills(State(state): State<AppState>) -> Result<Json<Vec<Bill>>, ApiError> {
    Ok(Json(state.orders.bill_history().await?))
}

// ============================================================================
// Error mapping
// ============================================================================

/// HTTP-compatible error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

/// Service failure translated to an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(kind: &str, id: i64) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("no {kind} with id {id}"),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
