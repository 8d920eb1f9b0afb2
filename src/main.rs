use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storefront::config::Config;
use storefront::shell::{OutputFormat, Shell};
use storefront::store::Stores;
use storefront::Storefront;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG wins over --log-filter. Logs go to stderr so stdout stays
    // clean for command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!(seeded = !config.no_seed, json = config.json, "Starting storefront");

    let stores = if config.no_seed {
        Stores::in_memory()
    } else {
        Stores::seeded()
    };
    let app = Storefront::new(stores)?;

    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match &config.script {
        Some(path) => {
            tracing::info!(script = %path.display(), "Running script");
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            Shell::new(app.session(), format).run(BufReader::new(file), &mut output)?;
        }
        None => {
            Shell::new(app.session(), format)
                .with_prompt(config.prompt.clone())
                .run(io::stdin().lock(), &mut output)?;
        }
    }

    Ok(())
}
