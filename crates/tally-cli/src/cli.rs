use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tally: a minimal deposit/withdrawal ledger service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP ledger service
    Serve(ServeArgs),
    /// Run the sample deposit/withdrawal scenario against an in-memory ledger
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Bind address, e.g. 127.0.0.1:3000
    #[arg(long)]
    pub bind: Option<String>,
    /// Listen port (overrides the port of the bind address)
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Page size used when listing the history
    #[arg(short = 'n', long, default_value = "50")]
    pub limit: usize,
}
