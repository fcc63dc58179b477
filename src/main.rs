use std::{fs::File, io, process};
#[macro_use]
extern crate log;

mod cli;
mod features;
use anyhow::Context;
use clap::Parser;
use cli::Cli;
use features::Session;

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut session = Session::new();

    let messages: Box<dyn io::Write> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stdout())
    };

    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            session.replay(io::BufReader::new(file), messages)?
        }
        None => session.replay(io::stdin().lock(), messages)?,
    };
    info!(
        "replayed {} operations: {} applied, {} rejected",
        summary.applied + summary.rejected,
        summary.applied,
        summary.rejected
    );

    session.report(io::stdout().lock(), cli.format)
}
