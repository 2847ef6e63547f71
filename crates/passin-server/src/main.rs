use clap::Parser;
use passin_server::{telemetry, AppConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "config/passin.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(&args.config)?;
    telemetry::init(&config.logging)?;

    tracing::info!("Starting pass.in server with config: {}", args.config);

    passin_server::run(config).await
}
