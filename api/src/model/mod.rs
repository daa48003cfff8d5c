pub mod checkout;
pub mod enrollment;
pub mod webhook;
