use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payments are recorded as completed the moment they are accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Completed,
}

/// A payment recorded against a bill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub bill_id: i64,
    pub amount: f64,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub processed_at: DateTime<Utc>,
}

impl Payment {
    pub fn completed(
        id: i64,
        bill_id: i64,
        amount: f64,
        payment_method: String,
        processed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            bill_id,
            amount,
            payment_method,
            status: PaymentStatus::Completed,
            processed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_serializes_camel_case() {
        let payment = Payment::completed(1, 2, 50.0, "card".to_string(), Utc::now());
        let json = serde_json::to_value(&payment).unwrap();

        assert_eq!(json["billId"], 2);
        assert_eq!(json["paymentMethod"], "card");
        assert_eq!(json["status"], "completed");
        assert!(json.get("processedAt").is_some());
    }
}
