use std::path::PathBuf;
use std::process::ExitCode;

use catalog::{CatalogService, Config, StartupError};
use clap::Parser;
use log::error;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, short, default_value_t = 3)]
    verbosity: usize,
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
    /// JSON configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// SQLite database file, overrides the configuration
    #[arg(long, short)]
    database: Option<PathBuf>,
    #[arg(long, short)]
    port: Option<u16>,
}

async fn run(args: Args) -> Result<(), StartupError> {
    let config = Config::load(args.config.as_deref())?.with_overrides(args.database, args.port);
    let service = CatalogService::connect(config).await?;
    service.serve().await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = stderrlog::new()
        .verbosity(args.verbosity)
        .quiet(args.quiet)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
    {
        eprintln!("Error setting up logging: {}", err);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
