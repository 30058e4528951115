//! Billing ledger: bill creation, lookup and listing.

use model::Bill;
use tracing::{debug, info, instrument, trace};

use crate::error::{BillingError, Result};
use crate::input::FieldValue;
use crate::store::{next_id, now, BillingStore};

/// Fields for a new bill, as received.
#[derive(Clone, Debug, Default)]
pub struct NewBill {
    pub user_id: Option<FieldValue>,
    pub amount: Option<FieldValue>,
    pub description: Option<FieldValue>,
}

impl BillingStore {
    /// Issue a pending bill against `user_id`.
    ///
    /// The user identifier is not checked against the identity store.
    #[instrument(skip(self))]
    pub fn create_bill(&self, input: NewBill) -> Result<Bill> {
        trace!("Entering create_bill");
        self.require_all(&[
            input.user_id.as_ref(),
            input.amount.as_ref(),
            input.description.as_ref(),
        ])?;

        let user_id = input
            .user_id
            .as_ref()
            .and_then(FieldValue::to_integer)
            .ok_or(BillingError::Validation)?;
        let amount = input
            .amount
            .as_ref()
            .and_then(FieldValue::to_float)
            .ok_or(BillingError::Validation)?;
        let description = input
            .description
            .as_ref()
            .and_then(FieldValue::to_text)
            .ok_or(BillingError::Validation)?;

        let mut state = self.write()?;
        let bill = Bill::pending(
            next_id(state.bills.len()),
            user_id,
            amount,
            description,
            now(),
        );
        state.bills.push(bill.clone());

        info!(
            "Bill created with ID: {}, user_id: {}, amount: {}",
            bill.id, bill.user_id, bill.amount
        );
        Ok(bill)
    }

    /// All bills in insertion order.
    pub fn list_bills(&self) -> Result<Vec<Bill>> {
        let state = self.read()?;
        debug!("Listing {} bills", state.bills.len());
        Ok(state.bills.clone())
    }

    pub fn find_bill(&self, bill_id: i64) -> Result<Option<Bill>> {
        let state = self.read()?;
        Ok(state.bills.iter().find(|bill| bill.id == bill_id).cloned())
    }
}
