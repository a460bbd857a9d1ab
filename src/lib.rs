pub mod commands;
pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::client::{ModClient, Resolution, UpdatedMod};
pub use crate::core::compat::{CompatibilityQuery, LoaderType};
pub use crate::core::config::ClientConfig;
pub use crate::core::error::{ErrorKind, ModError, ModResult};
pub use crate::core::manifest::{InstalledMod, ManifestStore};
pub use crate::core::registry::{ModSummary, ModVersion, RegistryClient};

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
///
/// Call once from the binary; the library itself never installs one.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,modfetch_lib=debug")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
