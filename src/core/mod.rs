pub mod credentials;
pub mod error;
pub mod http_client;
