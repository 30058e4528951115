pub mod bills;
pub mod health;
pub mod pages;
pub mod payments;
pub mod users;
