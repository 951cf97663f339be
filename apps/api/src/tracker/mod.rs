pub mod dashboard;
pub mod handlers;
pub mod readiness;
