use clap::Parser;
use tidystring::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tidystring::tracing::init(cli.verbose);

    run(cli).await.inspect_err(|e| {
        tracing::error!("Command failed: {:#}", e);
    })
}
