//! Command handlers behind the `modfetch` binary. Each prints a short,
//! human-readable report to stdout and leaves error reporting to the caller.

use std::path::Path;

use tracing::info;

use crate::core::client::ModClient;
use crate::core::compat::LoaderType;
use crate::core::error::ModResult;

pub async fn info(client: &ModClient, name: &str) -> ModResult<()> {
    let summary = client.get_info_by_name(name).await?;
    println!("{} ({})", summary.title, summary.project_id);
    if let Some(slug) = &summary.slug {
        println!("  slug: {slug}");
    }
    if let Some(description) = summary.raw.get("description").and_then(|d| d.as_str()) {
        println!("  {description}");
    }
    Ok(())
}

pub async fn versions(
    client: &ModClient,
    name: &str,
    target: &str,
    loader: LoaderType,
) -> ModResult<()> {
    let versions = client.get_compatible_versions(name, target, loader).await?;
    for version in &versions {
        println!(
            "{:<24} game: {:<20} loaders: {}",
            version.version_number,
            version.game_versions.join(","),
            version.loaders.join(",")
        );
    }
    Ok(())
}

pub async fn download(
    client: &ModClient,
    name: &str,
    target: &str,
    loader: LoaderType,
    mods_dir: &Path,
) -> ModResult<()> {
    let entry = client.download(name, target, loader, mods_dir).await?;
    println!(
        "Installed {} {} into {}",
        name,
        entry.version,
        mods_dir.display()
    );
    Ok(())
}

pub async fn update(client: &ModClient, game_version: &str, mods_dir: &Path) -> ModResult<()> {
    let updated = client.update_all(mods_dir, game_version).await?;
    if updated.is_empty() {
        println!("All mods are up to date");
    }
    for m in &updated {
        println!("{}: {} -> {}", m.name, m.from, m.to);
    }
    Ok(())
}

pub async fn list(client: &ModClient) -> ModResult<()> {
    let manifest = client.manifest().load().await?;
    info!(
        "{} entries in {:?}",
        manifest.len(),
        client.manifest().path()
    );
    for (name, entry) in &manifest {
        match entry.loader {
            Some(loader) => println!("{name} {} ({loader})", entry.version),
            None => println!("{name} {}", entry.version),
        }
    }
    Ok(())
}
