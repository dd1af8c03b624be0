use clap::Parser;

use view_my_startup_lib::bootstrap::{self, config::BASE_URL_ENV};
use view_my_startup_lib::cli::Cli;
use view_my_startup_lib::shell::Shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    bootstrap::tracing::init_tracing_subscriber(cli.log_file)?;

    let config = bootstrap::resolve_config(cli.config.as_deref())?;
    let config = bootstrap::apply_overrides(config, cli.base_url, std::env::var(BASE_URL_ENV).ok());
    let use_cases = bootstrap::wire_use_cases(&config)?;

    Shell::new(use_cases, config.ui.locale).run().await
}
