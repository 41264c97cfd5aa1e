//! `ccprov create`: build the demo topology, skipping what exists.

use tracing::info;

use ccprov_core::{CoreError, Phase, StepReport, Topology};

use super::{cancel_on_ctrl_c, connect, load_config, spinner};
use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{Printer, Tally};

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let config = load_config(global, "create")?;
    let topology = Topology::demo()?;
    let printer = Printer::new(global.quiet);
    let cancel = cancel_on_ctrl_c();

    let mut provisioner = connect(&config, &cancel).await?;
    info!(url = %config.url, "authenticated");

    let mut all: Vec<StepReport> = Vec::new();
    for phase in Phase::CREATE_ORDER {
        printer.heading(&format!("Creating {phase}"));
        let bar = spinner(&printer, format!("creating {phase}"));
        let result = {
            let on_step = |step: &StepReport| {
                bar.suspend(|| printer.line(&printer.format_step(step)));
            };
            tokio::select! {
                biased;
                () = cancel.cancelled() => Err(CoreError::Cancelled),
                r = provisioner.run_create_phase(&topology, phase, on_step) => r,
            }
        };
        bar.finish_and_clear();
        all.extend(result?);
    }

    printer.summary("create", &all);
    match Tally::of(&all).failed {
        0 => Ok(()),
        failed => Err(CliError::StepsFailed {
            command: "create",
            failed,
        }),
    }
}
