mod aggregate;
mod bucket;
mod cli;
mod compare;
mod config;
mod db;
mod format;
mod loader;
mod novels;
mod platform;
mod report;
mod report_helpers;
mod rookie;
mod series;
mod stats;
mod surge;

use std::error::Error;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, CommonArgs};
use config::Config;
use db::NovelDb;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Pick the database path: explicit flag, configured path, then the
/// default install location.
fn resolve_db_path(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf, Box<dyn Error>> {
    explicit
        .or_else(|| config.db_path.clone())
        .or_else(loader::default_db_path)
        .ok_or_else(|| "no database configured (run `np fetch <url-or-path>` first)".into())
}

fn open_db(common: &CommonArgs, config: &Config) -> Result<NovelDb, Box<dyn Error>> {
    NovelDb::open(&resolve_db_path(common.db.clone(), config)?)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load();

    match cli.command {
        Commands::Novels { common } => {
            let db = open_db(&common, &config)?;
            novels::run(&db, common.json)
        }
        Commands::Today { common } => {
            let db = open_db(&common, &config)?;
            report::run(&db, None, common.json)
        }
        Commands::Report {
            common,
            date,
            list,
            limit,
        } => {
            let db = open_db(&common, &config)?;
            if list {
                report::run_list(&db, limit, common.json)
            } else {
                report::run(&db, date, common.json)
            }
        }
        Commands::Stats { common, novel_id } => {
            let db = open_db(&common, &config)?;
            stats::run(&db, novel_id, common.json)
        }
        Commands::Aggregate {
            common,
            novel,
            bucket_days,
        } => {
            let db = open_db(&common, &config)?;
            let my_novel_id = novel.or(config.my_novel_id);
            aggregate::run(&db, my_novel_id, bucket_days, common.json)
        }
        Commands::Compare { common, novel_ids } => {
            let db = open_db(&common, &config)?;
            compare::run(&db, &novel_ids, common.json)
        }
        Commands::Rookie { common, date } => {
            let db = open_db(&common, &config)?;
            rookie::run(&db, date, common.json)
        }
        Commands::Fetch { source, out } => fetch(&source, out),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "np",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

fn fetch(source: &str, out: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load();
    let dest = match out.or_else(|| config.db_path.clone()) {
        Some(path) => path,
        None => loader::default_db_path().ok_or("cannot determine a data directory (HOME not set)")?,
    };

    let written = loader::fetch(source, &dest)?;
    println!("installed {} ({written} bytes)", dest.display());

    config.db_path = Some(dest);
    if source.starts_with("http://") || source.starts_with("https://") {
        config.db_url = Some(source.to_string());
    }
    if let Err(e) = config.save() {
        eprintln!("warning: could not save config: {e}");
    }
    Ok(())
}
