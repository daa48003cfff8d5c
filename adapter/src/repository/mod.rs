pub mod enrollment;
pub mod event;
pub mod health;
pub mod payment;
