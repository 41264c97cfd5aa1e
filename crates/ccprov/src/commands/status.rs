//! `ccprov status`: read-only view of pools, sites and reservations.

use super::{cancel_on_ctrl_c, connect, load_config};
use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{Printer, render_status};

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = load_config(global, "status")?;
    let cancel = cancel_on_ctrl_c();
    let provisioner = connect(&config, &cancel).await?;

    let report = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(CliError::Interrupted),
        report = provisioner.status_report() => report,
    };

    Printer::new(global.quiet).line(&render_status(global.output, &report)?);
    Ok(())
}
