use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use modfetch_lib::{commands, init_logging, ClientConfig, LoaderType, ModClient, ModResult};

#[derive(Debug, Parser)]
#[command(name = "modfetch", version, about = "Search, download and update Minecraft mods")]
struct Cli {
    /// Manifest recording installed mods
    #[arg(long, global = true, env = "MODFETCH_MANIFEST")]
    manifest: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, global = true, env = "MODFETCH_CONFIG")]
    config: Option<PathBuf>,

    /// Registry API base URL
    #[arg(long, global = true, env = "MODFETCH_API_BASE")]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the top search hit for a mod name
    Info { name: String },
    /// List versions matching a game version or exact version number
    Versions {
        name: String,
        target: String,
        #[arg(long, default_value = "forge")]
        loader: LoaderType,
    },
    /// Install the newest matching version
    Download {
        name: String,
        target: String,
        #[arg(long, default_value = "forge")]
        loader: LoaderType,
        #[arg(long, default_value = "./mods")]
        mods_dir: PathBuf,
    },
    /// Update every installed mod for a game version
    Update {
        game_version: String,
        #[arg(long, default_value = "./mods")]
        mods_dir: PathBuf,
    },
    /// Print the manifest
    List,
}

fn build_client(cli: &Cli) -> ModResult<ModClient> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };
    if let Some(path) = &cli.manifest {
        config = config.with_manifest_path(path);
    }
    if let Some(api_base) = &cli.api_base {
        config = config.with_api_base(api_base);
    }
    ModClient::new(config)
}

async fn run(cli: Cli) -> ModResult<()> {
    let client = build_client(&cli)?;
    match &cli.command {
        Command::Info { name } => commands::info(&client, name).await,
        Command::Versions {
            name,
            target,
            loader,
        } => commands::versions(&client, name, target, *loader).await,
        Command::Download {
            name,
            target,
            loader,
            mods_dir,
        } => commands::download(&client, name, target, *loader, mods_dir).await,
        Command::Update {
            game_version,
            mods_dir,
        } => commands::update(&client, game_version, mods_dir).await,
        Command::List => commands::list(&client).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
