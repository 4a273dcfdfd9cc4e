use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_DB_PATH: &str = ".data/sqlite.db";
pub const DEFAULT_SOURCES: [&str; 3] = [
    "upload/pasted_content_2.txt",
    "upload/pasted_content_3.txt",
    "upload/pasted_content_4.txt",
];
pub const DEFAULT_STANDARD_ORDER: i64 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "visit-evidence",
    version,
    about = "Import classroom exchange-visit records as evidences for a standard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Import(ImportArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    #[arg(long = "source", default_values = DEFAULT_SOURCES)]
    pub sources: Vec<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_STANDARD_ORDER)]
    pub standard_order: i64,

    /// Seed for placeholder image selection; OS entropy when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub summary_path: Option<PathBuf>,
}

impl Default for ImportArgs {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            sources: DEFAULT_SOURCES.iter().map(PathBuf::from).collect(),
            standard_order: DEFAULT_STANDARD_ORDER,
            seed: None,
            dry_run: false,
            json: false,
            summary_path: None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}
