pub mod api;
pub mod notifier;
pub mod refresh;
pub mod signer;
pub mod store;
