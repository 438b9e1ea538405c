//! SRA CLI - Command line tool for querying a solar resource atlas backend.

use clap::Parser;
use sra_cmd::VariantArg;

#[derive(Parser)]
#[command(
    name = "sra-cli",
    version,
    about = "Solar resource atlas dashboard pipelines from the terminal"
)]
struct Cli {
    /// Backend origin serving the dashboard API
    #[arg(long, env = "SRA_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Dashboard variant whose feature set and classification to use
    #[arg(long, value_enum, default_value_t = VariantArg::Extended)]
    variant: VariantArg,

    #[command(subcommand)]
    command: sra_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("base url {}", cli.base_url);
    sra_cmd::run(&cli.base_url, cli.variant, cli.command).await
}
