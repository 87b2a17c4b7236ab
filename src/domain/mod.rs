pub mod account;
pub mod address;
pub mod coordinator;
pub mod error;
pub mod error_map;
pub mod payment;
pub mod transaction;
