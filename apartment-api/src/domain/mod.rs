pub mod models;
pub mod payment;
pub mod repositories;
pub mod services;
