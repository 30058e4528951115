use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use billing::{BillingError, BillingStore};
use chrono::{DateTime, Utc};
use model::{Bill, BillStatus, Payment, PaymentStatus, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use utoipa::{OpenApi, ToSchema};

use crate::config::Settings;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// In-memory billing store
    pub store: Arc<BillingStore>,
    /// Loaded service settings
    pub settings: Arc<Settings>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Time the check was answered
    pub timestamp: DateTime<Utc>,
    /// Service version
    pub version: String,
    /// Direct dependencies of the service
    pub dependencies: Vec<String>,
}

/// Errors surfaced by handlers, rendered as [`ErrorResponse`] bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Route not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Billing(BillingError::Validation) | ApiError::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Billing(BillingError::BillNotFound(_)) | ApiError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::Billing(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::Billing(BillingError::Validation) => {
                ErrorResponse::new("Missing required fields", "VALIDATION_ERROR")
            }
            ApiError::Billing(BillingError::BillNotFound(_)) => {
                ErrorResponse::new("Bill not found", "BILL_NOT_FOUND")
            }
            ApiError::MalformedBody(_) => {
                ErrorResponse::new("Malformed request body", "INVALID_BODY")
            }
            ApiError::RouteNotFound => ErrorResponse::new("Route not found", "ROUTE_NOT_FOUND"),
            ApiError::Billing(_) | ApiError::Task(_) => {
                ErrorResponse::new("Internal server error", "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Billing(err) if err.is_client_error() => warn!("Request rejected: {}", err),
            ApiError::MalformedBody(_) => warn!("Request rejected: {}", self),
            ApiError::RouteNotFound => debug!("No route or static file matched"),
            _ => error!("Request failed: {}", self),
        }
        (status, Json(self.body())).into_response()
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::bills::create_bill,
        crate::handlers::bills::get_bills,
        crate::handlers::payments::create_payment,
        crate::handlers::payments::get_payments,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            UserProfile,
            Bill,
            BillStatus,
            Payment,
            PaymentStatus,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::bills::CreateBillRequest,
            crate::handlers::payments::CreatePaymentRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User registration and listing"),
        (name = "bills", description = "Bill issuing and listing"),
        (name = "payments", description = "Payment recording and listing"),
    ),
    info(
        title = "Octo Billing API",
        description = "Billing demo service - users, bills and payments held in process memory",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
