pub mod loader;
pub mod query;

pub use loader::LoaderType;
pub use query::{filter_compatible, CompatibilityQuery};
