//! Payment processor: payment recording and the settlement rule.

use model::Payment;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{BillingError, Result};
use crate::input::FieldValue;
use crate::store::{next_id, now, BillingStore};

/// Fields for a new payment, as received.
#[derive(Clone, Debug, Default)]
pub struct NewPayment {
    pub bill_id: Option<FieldValue>,
    pub amount: Option<FieldValue>,
    pub payment_method: Option<FieldValue>,
}

impl BillingStore {
    /// Record a payment against an existing bill.
    ///
    /// The payment is always recorded as completed. The bill moves to `paid`
    /// only when this single payment covers the full bill amount; partial
    /// payments are recorded but never accumulated. Lookup, append and
    /// settlement happen under one write lock.
    #[instrument(skip(self))]
    pub fn create_payment(&self, input: NewPayment) -> Result<Payment> {
        trace!("Entering create_payment");
        self.require_all(&[
            input.bill_id.as_ref(),
            input.amount.as_ref(),
            input.payment_method.as_ref(),
        ])?;

        let amount = input
            .amount
            .as_ref()
            .and_then(FieldValue::to_float)
            .ok_or(BillingError::Validation)?;
        let payment_method = input
            .payment_method
            .as_ref()
            .and_then(FieldValue::to_text)
            .ok_or(BillingError::Validation)?;
        // An identifier that does not read as an integer cannot match a bill.
        let bill_id = input
            .bill_id
            .as_ref()
            .and_then(FieldValue::to_integer)
            .ok_or(BillingError::BillNotFound(None))?;

        let mut state = self.write()?;
        let payment_id = next_id(state.payments.len());

        let Some(bill) = state.bills.iter_mut().find(|bill| bill.id == bill_id) else {
            warn!("Payment rejected, bill {} not found", bill_id);
            return Err(BillingError::BillNotFound(Some(bill_id)));
        };

        let processed_at = now();
        let payment = Payment::completed(payment_id, bill_id, amount, payment_method, processed_at);

        if payment.amount >= bill.amount {
            if bill.mark_paid(processed_at) {
                info!("Bill {} settled by payment {}", bill.id, payment.id);
            }
        } else {
            debug!(
                "Payment {} of {} does not cover bill {} amount {}, bill stays {:?}",
                payment.id, payment.amount, bill.id, bill.amount, bill.status
            );
        }

        state.payments.push(payment.clone());
        info!(
            "Payment created with ID: {}, bill_id: {}, amount: {}",
            payment.id, payment.bill_id, payment.amount
        );
        Ok(payment)
    }

    /// All payments in insertion order.
    pub fn list_payments(&self) -> Result<Vec<Payment>> {
        let state = self.read()?;
        debug!("Listing {} payments", state.payments.len());
        Ok(state.payments.clone())
    }
}
