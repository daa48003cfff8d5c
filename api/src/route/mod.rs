pub mod checkout;
pub mod event;
pub mod health;
pub mod v1;
pub mod webhook;
