use axum::{extract::State, http::StatusCode, response::Json};
use billing::{FieldValue, NewBill};
use model::Bill;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use crate::extract::Fields;
use crate::schemas::{ApiError, AppState};

/// Request body for creating a new bill
///
/// Numeric fields may also be sent as numeric strings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillRequest {
    /// Identifier of the billed user (not checked for existence)
    #[schema(value_type = Option<i64>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<FieldValue>,
    /// Amount due
    #[schema(value_type = Option<f64>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<FieldValue>,
    /// What the bill is for
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldValue>,
}

impl From<CreateBillRequest> for NewBill {
    fn from(request: CreateBillRequest) -> Self {
        Self {
            user_id: request.user_id,
            amount: request.amount,
            description: request.description,
        }
    }
}

/// Create a new bill
#[utoipa::path(
    post,
    path = "/api/bills",
    tag = "bills",
    request_body = CreateBillRequest,
    responses(
        (status = 201, description = "Bill created successfully", body = Bill),
        (status = 400, description = "Missing required fields or malformed body", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_bill(
    State(state): State<AppState>,
    Fields(request): Fields<CreateBillRequest>,
) -> Result<(StatusCode, Json<Bill>), ApiError> {
    trace!("Entering create_bill function");
    let bill = state.store.create_bill(request.into())?;
    info!("Bill created successfully with ID: {}", bill.id);
    Ok((StatusCode::CREATED, Json(bill)))
}

/// Get all bills
#[utoipa::path(
    get,
    path = "/api/bills",
    tag = "bills",
    responses(
        (status = 200, description = "Bills retrieved successfully", body = Vec<Bill>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_bills(State(state): State<AppState>) -> Result<Json<Vec<Bill>>, ApiError> {
    trace!("Entering get_bills function");
    let bills = state.store.list_bills()?;
    debug!("Retrieved {} bills", bills.len());
    Ok(Json(bills))
}
