use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use job_portal::cli::{self, Cli};
use job_portal::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = args.base_url.as_deref() {
        config = config.with_base_url(url)?;
    }

    // stdout carries command output; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("job_portal={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("job-portal v{} using {}", env!("CARGO_PKG_VERSION"), config.api_base_url);

    cli::run(args, &config).await
}
