pub mod client;
pub mod staged;

pub use client::Downloader;
pub use staged::StagedArtifact;
