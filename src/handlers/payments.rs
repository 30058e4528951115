use axum::{extract::State, http::StatusCode, response::Json};
use billing::{FieldValue, NewPayment};
use model::Payment;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::extract::Fields;
use crate::schemas::{ApiError, AppState};

/// Request body for recording a payment
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    /// Bill being paid
    #[schema(value_type = Option<i64>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<FieldValue>,
    /// Amount paid; settles the bill when it covers the bill amount
    #[schema(value_type = Option<f64>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<FieldValue>,
    /// Free-form method label, e.g. "credit_card"
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<FieldValue>,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(request: CreatePaymentRequest) -> Self {
        Self {
            bill_id: request.bill_id,
            amount: request.amount,
            payment_method: request.payment_method,
        }
    }
}

/// Record a payment against a bill
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 400, description = "Missing required fields or malformed body", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Bill not found", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_payment(
    State(state): State<AppState>,
    Fields(request): Fields<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    trace!("Entering create_payment function");
    let payment = state.store.create_payment(request.into())?;
    info!(
        "Payment recorded with ID: {} for bill {}",
        payment.id, payment.bill_id
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get all payments
#[utoipa::path(
    get,
    path = "/api/payments",
    tag = "payments",
    responses(
        (status = 200, description = "Payments retrieved successfully", body = Vec<Payment>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_payments(State(state): State<AppState>) -> Result<Json<Vec<Payment>>, ApiError> {
    trace!("Entering get_payments function");
    let payments = state.store.list_payments()?;
    debug!("Retrieved {} payments", payments.len());
    Ok(Json(payments))
}
