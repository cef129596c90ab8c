/// CLI argument definitions for the `np` command.
///
/// Defines all subcommands, their arguments, and help text using the
/// `clap` derive macros.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "np", version, about = "Web-novel analytics viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Common arguments shared by every report command.
#[derive(Args)]
pub struct CommonArgs {
    /// Snapshot database to read (default: the configured path)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List tracked novels grouped by platform
    Novels {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Report for the latest collection date (rankings + surge tables)
    Today {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Report for a specific collection date
    Report {
        #[command(flatten)]
        common: CommonArgs,

        /// Report date (YYYY-MM-DD; default: latest)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// List dates that have ranking data instead
        #[arg(long)]
        list: bool,

        /// How many dates to list (default: 60)
        #[arg(long, default_value = "60")]
        limit: usize,
    },

    /// One novel's growth series, surge summary and recent snapshots
    Stats {
        #[command(flatten)]
        common: CommonArgs,

        /// Novel id (see `np novels`)
        novel_id: i64,
    },

    /// Per-platform percentile-tier median growth
    #[command(long_about = "\
Per-platform percentile-tier median growth.

Novels are normalized onto a shared 'days since launch' axis, ranked by
total views inside their platform, and split into percentile tiers
(top20/top40/top60/top80). Each tier is summarized by the per-day median
of its members' cumulative views. With a designated novel (--novel or the
configured my_novel_id) its own series is overlaid and its percentile
standing is reported.")]
    Aggregate {
        #[command(flatten)]
        common: CommonArgs,

        /// Highlight this novel (default: configured my_novel_id)
        #[arg(long)]
        novel: Option<i64>,

        /// Day-bucket width for table rows (default: 30)
        #[arg(long, default_value = "30")]
        bucket_days: u32,
    },

    /// Compare novels on the days-since-launch axis
    Compare {
        #[command(flatten)]
        common: CommonArgs,

        /// Novel ids, comma separated (at least two)
        #[arg(value_delimiter = ',', required = true)]
        novel_ids: Vec<i64>,
    },

    /// Rookie monitor report (new board entries, per-section surge)
    Rookie {
        #[command(flatten)]
        common: CommonArgs,

        /// Monitor date (YYYY-MM-DD; default: latest run)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Download or copy a snapshot database and remember it
    Fetch {
        /// Local path or http(s) share link (Dropbox preview links are
        /// rewritten to direct downloads)
        source: String,

        /// Install location (default: the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
