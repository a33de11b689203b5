pub mod auth;
pub mod backup_exchange;
pub mod core;
pub mod courses;
pub mod ledger;
pub mod users;
