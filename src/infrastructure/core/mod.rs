pub mod http_client_factory;

pub use http_client_factory::{HttpClientFactory, fetch_json, fetch_text};
