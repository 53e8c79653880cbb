//! Loads the todo page from the configured service and prints it as HTML.
//!
//! `TODO_API_URL` selects the service (the public placeholder API by
//! default); point it at a local `mock-api` to work offline. Logs go to
//! stderr so the page can be redirected to a file.
//!
//! The binary only runs startup. There is no command-line surface for
//! adding, toggling or deleting todos; those go through
//! `Controller::dispatch` from an embedding host or the tests.

use anyhow::Context;
use todolist_core::{Config, Controller, UreqTransport};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("invalid configuration")?;
    info!(api_url = %config.api_url, "loading todos");

    let mut controller = Controller::from_config(&config, UreqTransport::new());
    controller.startup().context("startup failed")?;

    print!("{}", controller.view().to_html());
    Ok(())
}
