use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::debug;

use crate::{
    cli::{Cli, Commands},
    error::{AppError, Scope},
    git::Git,
    storage::ProfileStore,
};

mod cli;
mod commands;
mod error;
mod git;
mod logging;
mod menu;
mod origin;
mod profile;
mod prompt;
mod resolve;
mod storage;
mod validation;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}", e.to_string().red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let store_path: PathBuf = match cli.config {
        Some(path) => path,
        None => storage::default_store_path()?,
    };
    let mut store = ProfileStore::open(store_path)?;
    debug!(path = %store.path().display(), "using profiles file");

    let mut git = Git::new(cli.git);
    if let Some(dir) = cli.directory {
        git = git.in_dir(dir);
    }

    match cli.command {
        Some(Commands::Init) => commands::init(&mut store, &git),
        Some(Commands::Add { profile_name, fields }) => commands::add(&mut store, &git, &profile_name, fields),
        Some(Commands::Update { profile_name, fields, rename }) =>
            commands::update(&mut store, &git, &profile_name, fields, rename),
        Some(Commands::Rm { profile_name, all, filter }) =>
            commands::remove(&mut store, profile_name.as_deref(), all, filter.into()),
        Some(Commands::List { profile_name, filter }) =>
            commands::list(&store, profile_name.as_deref(), &filter.into()),
        Some(Commands::Set { profile_name, global }) =>
            commands::set(&mut store, &git, &profile_name, Scope::from_global(global)),
        Some(Commands::Tempset { name, email, global }) =>
            commands::tempset(&git, name, email, Scope::from_global(global)),
        Some(Commands::Unset { global }) => commands::unset(&git, Scope::from_global(global)),
        Some(Commands::Check { global }) => commands::check(&git, Scope::from_global(global)),
        None => menu::run_menu(&mut store, &git),
    }
}
