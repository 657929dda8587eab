pub mod common;
pub mod dashboard;
pub mod heart_rate;
pub mod query;
pub mod respiratory;
pub mod sleep;
pub mod steps;
pub mod vitals;
