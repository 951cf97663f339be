pub mod application;
pub mod checklist;
pub mod identity;
pub mod opportunity;
pub mod profile;
pub mod record;
