pub mod api;
pub mod client;

pub use api::ScannerApi;
pub use client::ZapClient;
