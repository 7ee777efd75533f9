use clap::Parser;
use tracing_subscriber::EnvFilter;

use dungeon_client::{Args, ClientConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dungeon_client=info")),
        )
        .init();

    let args = Args::parse();
    let result = ClientConfig::resolve(&args).and_then(dungeon_client::run);
    if let Err(e) = result {
        eprintln!("dungeon-client: {e}");
        std::process::exit(1);
    }
}
