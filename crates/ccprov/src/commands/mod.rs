//! Command dispatch and helpers shared by the handlers.

mod create;
mod delete;
mod status;

use std::time::Duration;

use clap::CommandFactory;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use ccprov_core::{ControllerConfig, Provisioner};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;
use crate::output::Printer;

pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Create => create::handle(&cli.global).await,
        Command::Delete(args) => delete::handle(&args, &cli.global).await,
        Command::Status => status::handle(&cli.global).await,
        Command::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "ccprov", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load the controller configuration and apply flag overrides.
fn load_config(global: &GlobalOpts, command: &'static str) -> Result<ControllerConfig, CliError> {
    let path = global
        .config
        .as_deref()
        .ok_or(CliError::MissingConfigFlag { command })?;
    let mut config = ccprov_config::load(path)?;
    if let Some(secs) = global.poll_interval {
        config.polling.interval = Duration::from_secs(secs);
    }
    info!(url = %config.url, user = %config.username, "configuration loaded");
    Ok(config)
}

/// Authenticate, giving up early if the user interrupts.
async fn connect(
    config: &ControllerConfig,
    cancel: &CancellationToken,
) -> Result<Provisioner, CliError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(CliError::Interrupted),
        result = Provisioner::connect(config, cancel.clone()) => Ok(result?),
    }
}

/// Token cancelled on the first Ctrl-C.
fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("interrupt received, stopping after the current request");
                trigger.cancel();
            }
            Err(e) => warn!(error = %e, "could not install Ctrl-C handler"),
        }
    });
    cancel
}

/// Per-phase spinner on stderr; hidden in quiet mode.
fn spinner(printer: &Printer, message: String) -> ProgressBar {
    if printer.quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
