pub mod checkout;
pub mod enrollment;
pub mod health;
pub mod webhook;
