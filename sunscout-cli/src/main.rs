//! Binary entry point for the sunscout CLI.

use eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    sunscout_cli::run().await
}
