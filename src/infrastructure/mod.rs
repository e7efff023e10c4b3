pub mod collectors;
pub mod core;
pub mod factory;
pub mod history_store;

pub use factory::CollectorFactory;
pub use history_store::JsonHistoryStore;
