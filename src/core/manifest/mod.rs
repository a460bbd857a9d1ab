pub mod entry;
pub mod store;

pub use entry::InstalledMod;
pub use store::{Manifest, ManifestStore, DEFAULT_MANIFEST_PATH};
