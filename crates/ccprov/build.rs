use std::error::Error;
use std::fs;
use std::path::Path;

use clap::CommandFactory;

#[path = "src/cli.rs"]
mod cli;

/// Render `ccprov.1` plus one page per visible subcommand into
/// `$OUT_DIR/man`.
fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").ok_or("OUT_DIR is unset")?;
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir)?;

    let root = cli::Cli::command();
    write_page(&root, &man_dir)?;
    for sub in root.get_subcommands().filter(|s| !s.is_hide_set()) {
        let page = sub.clone().name(format!("ccprov-{}", sub.get_name()));
        write_page(&page, &man_dir)?;
    }
    Ok(())
}

fn write_page(cmd: &clap::Command, dir: &Path) -> Result<(), Box<dyn Error>> {
    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
    fs::write(dir.join(format!("{}.1", cmd.get_name())), page)?;
    Ok(())
}
