pub mod client;
pub mod model;

pub use client::{RegistryClient, DEFAULT_API_BASE, DEFAULT_SEARCH_LIMIT};
pub use model::{ModSummary, ModVersion, VersionFile};
