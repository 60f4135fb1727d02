// File: ./src/client/mod.rs
pub mod core;
pub mod middleware;
pub mod provider;
pub mod redirect;
pub mod text;

pub use crate::client::core::BibleClient;
pub use crate::client::provider::{BOLLS_VERSIONS, FHL_VERSIONS, Provider, VersionInfo};
pub use crate::client::text::clean_text;
