use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use runprof::ProfileConfig;

fn setup_tracing() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    tracing_subscriber::fmt()
        .event_format(fmt::format::Format::default().pretty())
        .with_env_filter(EnvFilter::from_default_env())
        .with_timer(fmt::time::ChronoLocal::rfc3339())
        .with_writer(std::io::stderr)
        .finish()
        .with(ErrorLayer::default())
        .init();
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = match ProfileConfig::try_parse() {
        Ok(config) => config,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprint!("{}", err);
            process::exit(1);
        }
    };

    runprof::run(&config)
        .with_context(|| format!("failed to profile {}", config.target.display()))?;

    Ok(())
}
