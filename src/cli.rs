use std::path::PathBuf;

use clap::Parser;

use crate::features::ReportFormat;

/// Replays a script of account operations against an in-memory ledger and
/// prints the resulting accounts.
///
/// Script rows are `type, account, name, to, amount` where type is one of
/// create, deposit, withdraw, balance, list or transfer.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub(crate) struct Cli {
    /// Operation script in CSV; read from stdin when omitted
    #[clap(value_parser)]
    pub script: Option<PathBuf>,

    /// Format of the final account listing
    #[clap(long, value_enum, default_value = "csv")]
    pub format: ReportFormat,

    /// Do not print a line per operation
    #[clap(short, long, action)]
    pub quiet: bool,
}
