//! Records held by the billing store.
//!
//! All three collections are append-only. `Bill` is the only record with a
//! post-creation mutation (`status` and `paid_at`, via [`Bill::mark_paid`]).

pub mod bill;
pub mod payment;
pub mod user;

pub use bill::{Bill, BillStatus, BILL_DUE_DAYS};
pub use payment::{Payment, PaymentStatus};
pub use user::{User, UserProfile};
