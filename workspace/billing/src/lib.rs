//! In-memory billing core: users, bills and payments.
//!
//! [`BillingStore`] owns the three append-only collections. Its operations
//! are split by concern:
//!
//! - [`identity`]: user creation and listing,
//! - [`ledger`]: bill creation, lookup and listing,
//! - [`payments`]: payment recording and the settlement rule.
//!
//! Request fields arrive as loosely typed [`FieldValue`]s; validation and
//! coercion happen here rather than at the HTTP boundary.

pub mod error;
pub mod identity;
pub mod input;
pub mod ledger;
pub mod password;
pub mod payments;
pub mod store;

pub use error::{BillingError, Result};
pub use identity::NewUser;
pub use input::{FieldValue, ValidationMode};
pub use ledger::NewBill;
pub use payments::NewPayment;
pub use store::{BillingStore, StoreSummary};
