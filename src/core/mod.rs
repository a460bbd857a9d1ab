// ─── modfetch core ───
// Client for a Minecraft mod registry: search, download, update.
//
// Architecture:
//   core/
//     registry/    Search / version endpoints + response models
//     compat/      Loader types + compatibility query and filter
//     downloader/  Streamed artifact fetch into scoped staging dirs
//     manifest/    mods.json: installed mod name -> version
//     client       Download / update orchestration
//     config       Client settings (API base, paths, defaults)

pub mod client;
pub mod compat;
pub mod config;
pub mod downloader;
pub mod error;
pub mod http;
pub mod manifest;
pub mod registry;
