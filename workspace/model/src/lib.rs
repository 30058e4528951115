pub mod entities;

pub use entities::{Bill, BillStatus, Payment, PaymentStatus, User, UserProfile, BILL_DUE_DAYS};
