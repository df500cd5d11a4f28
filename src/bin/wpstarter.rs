use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use wpstarter::{args::Args, config::PreferencesStore, error, preflight, scaffold, trace};

fn app(args: &Args) -> Result<()> {
    preflight::ensure_tools_installed()?;

    let target_dir = scaffold::resolve_target_dir(&args.directory)?;
    scaffold::ensure_target_available(&target_dir, &args.directory)?;

    let store = PreferencesStore::default_paths()?;

    trace!("Target directory: {}", target_dir.display());
    trace!("Preferences file: {}", store.config_file().display());

    let stored = store.load()?;

    scaffold::run(&target_dir, &args.directory, &store, &stored)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}",);
            ExitCode::FAILURE
        }
    }
}
