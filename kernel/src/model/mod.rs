pub mod checkout;
pub mod enrollment;
pub mod event;
pub mod id;
pub mod payment;
pub mod role;
