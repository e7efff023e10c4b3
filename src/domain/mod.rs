pub mod errors;
pub mod metrics;
pub mod ports;

pub use errors::CollectorError;
pub use metrics::{Batch, CollectionOutcome, History, Record};
