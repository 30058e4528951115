use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;
use utoipa::ToSchema;

/// Days between a bill's creation and its due date.
pub const BILL_DUE_DAYS: i64 = 30;

/// Lifecycle of a bill. `Paid` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Paid,
}

/// A bill issued against a user identifier.
///
/// `user_id` is stored as given; nothing checks that the user exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub description: String,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Bill {
    /// Build a pending bill due [`BILL_DUE_DAYS`] after `created_at`.
    pub fn pending(
        id: i64,
        user_id: i64,
        amount: f64,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            amount,
            description,
            status: BillStatus::Pending,
            created_at,
            due_date: created_at + Duration::days(BILL_DUE_DAYS),
            paid_at: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == BillStatus::Paid
    }

    /// Transition `pending -> paid`. Returns `false` and leaves the bill
    /// untouched when it is already paid.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_paid() {
            trace!(bill_id = self.id, "Bill already paid, keeping original paid_at");
            return false;
        }
        self.status = BillStatus::Paid;
        self.paid_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_bill_is_due_thirty_days_later() {
        let now = Utc::now();
        let bill = Bill::pending(1, 7, 100.0, "Internet".to_string(), now);

        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.due_date - bill.created_at, Duration::days(30));
        assert!(bill.paid_at.is_none());
    }

    #[test]
    fn mark_paid_is_terminal() {
        let created = Utc::now();
        let mut bill = Bill::pending(1, 7, 100.0, "Internet".to_string(), created);

        let first = created + Duration::hours(1);
        assert!(bill.mark_paid(first));
        assert_eq!(bill.status, BillStatus::Paid);
        assert_eq!(bill.paid_at, Some(first));

        assert!(!bill.mark_paid(first + Duration::hours(1)));
        assert_eq!(bill.paid_at, Some(first));
    }

    #[test]
    fn pending_bill_omits_paid_at_in_json() {
        let bill = Bill::pending(3, 1, 42.5, "Water".to_string(), Utc::now());
        let json = serde_json::to_value(&bill).unwrap();

        assert_eq!(json["status"], "pending");
        assert_eq!(json["userId"], 1);
        assert_eq!(json["amount"], 42.5);
        assert!(json.get("dueDate").is_some());
        assert!(json.get("paidAt").is_none());
    }
}
