/// ShelfMark - Goodreads to Audiobookshelf progress migration
use clap::Parser;
use shelfmark_cli::{config::RunConfig, runner, Cli, EXIT_FATAL};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match execute(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn execute(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = RunConfig::from_cli(cli)?;

    println!("{}", runner::banner(config.options.mode));
    println!();

    let report = runner::run(&config).await?;
    print!("{}", report);

    Ok(runner::exit_code(&report))
}
