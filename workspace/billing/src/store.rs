use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, SubsecRound, Utc};
use model::{Bill, Payment, User};
use tracing::error;

use crate::error::{BillingError, Result};
use crate::input::{FieldValue, ValidationMode};

/// The three append-only collections.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub(crate) users: Vec<User>,
    pub(crate) bills: Vec<Bill>,
    pub(crate) payments: Vec<Payment>,
}

/// Collection sizes at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub users: usize,
    pub bills: usize,
    pub payments: usize,
}

/// Process-local owner of all billing state.
///
/// Every mutation takes the write lock for the whole of identifier
/// assignment and append, so identifiers stay dense and unique when the store
/// is shared across request-handling threads.
#[derive(Debug, Default)]
pub struct BillingStore {
    state: RwLock<Collections>,
    validation: ValidationMode,
}

impl BillingStore {
    pub fn new(validation: ValidationMode) -> Self {
        Self {
            state: RwLock::new(Collections::default()),
            validation,
        }
    }

    pub fn validation_mode(&self) -> ValidationMode {
        self.validation
    }

    pub fn summary(&self) -> Result<StoreSummary> {
        let state = self.read()?;
        Ok(StoreSummary {
            users: state.users.len(),
            bills: state.bills.len(),
            payments: state.payments.len(),
        })
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.state.read().map_err(|_| {
            error!("Billing state lock poisoned on read");
            BillingError::StatePoisoned
        })
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.state.write().map_err(|_| {
            error!("Billing state lock poisoned on write");
            BillingError::StatePoisoned
        })
    }

    /// Fail with [`BillingError::Validation`] unless every field is supplied.
    pub(crate) fn require_all(&self, fields: &[Option<&FieldValue>]) -> Result<()> {
        if fields.iter().all(|field| self.validation.accepts(*field)) {
            Ok(())
        } else {
            Err(BillingError::Validation)
        }
    }
}

/// Identifier for the next record appended to a collection of `len` records.
pub(crate) fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

/// Current time at millisecond precision, so records survive a JSON
/// round-trip unchanged.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
