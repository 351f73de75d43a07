use clap::Parser;
use contract_review_rag::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ingest(args) => cli::ingest::run(args).await,
        Command::Review(args) => cli::review::run(args).await,
    }
}
