//! `ccprov delete`: tear the demo topology down in reverse order.

use std::io::IsTerminal;

use tracing::info;

use ccprov_core::{CoreError, Phase, StepReport, Topology};

use super::{cancel_on_ctrl_c, connect, load_config, spinner};
use crate::cli::{DeleteArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{Printer, Tally};

const CONFIRM_WORD: &str = "DELETE";

pub async fn handle(args: &DeleteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let config = load_config(global, "delete")?;
    let topology = Topology::demo()?;
    let printer = Printer::new(global.quiet);

    confirm(args.include_pools, global.yes)?;

    let cancel = cancel_on_ctrl_c();
    let mut provisioner = connect(&config, &cancel).await?;
    info!(url = %config.url, "authenticated");

    let mut all: Vec<StepReport> = Vec::new();
    for phase in Phase::delete_order(args.include_pools) {
        printer.heading(&format!("Deleting {phase}"));
        let bar = spinner(&printer, format!("deleting {phase}"));
        let result = {
            let on_step = |step: &StepReport| {
                bar.suspend(|| printer.line(&printer.format_step(step)));
            };
            tokio::select! {
                biased;
                () = cancel.cancelled() => Err(CoreError::Cancelled),
                r = provisioner.run_delete_phase(&topology, phase, on_step) => r,
            }
        };
        bar.finish_and_clear();
        all.extend(result?);
    }

    if !args.include_pools {
        printer.line("Global pools were kept; pass --include-pools to remove them too.");
    }
    printer.summary("delete", &all);
    match Tally::of(&all).failed {
        0 => Ok(()),
        failed => Err(CliError::StepsFailed {
            command: "delete",
            failed,
        }),
    }
}

/// Require the user to type `DELETE`, unless `--yes` was passed.
fn confirm(include_pools: bool, yes: bool) -> Result<(), CliError> {
    if yes {
        return Ok(());
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes { action: "delete" });
    }

    let scope = if include_pools {
        "reservations, floors, buildings, areas and global pools"
    } else {
        "reservations, floors, buildings and areas"
    };
    let typed = dialoguer::Input::<String>::new()
        .with_prompt(format!("This removes all demo {scope}. Type {CONFIRM_WORD} to continue"))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    if typed.trim() == CONFIRM_WORD {
        Ok(())
    } else {
        Err(CliError::Aborted)
    }
}
