use std::io;

use anyhow::Context;

use super::ledger::Ledger;
use super::operation::Operation;

/// Layout of the final account listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
}

/// Counts of operations from one replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
}

/// One user session. The ledger lives exactly as long as the session.
#[derive(Debug, Default)]
pub struct Session {
    ledger: Ledger,
}

impl Session {
    pub fn new() -> Self {
        Self {
            ledger: Ledger::new(),
        }
    }

    /// Applies every operation in `script` in order, writing one result line per
    /// operation to `messages`. Rejected operations are reported and skipped; a
    /// row that is not a valid operation record aborts the replay.
    pub fn replay<R, W>(&mut self, script: R, mut messages: W) -> anyhow::Result<Summary>
    where
        R: io::Read,
        W: io::Write,
    {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(script);

        let mut summary = Summary::default();
        for (row, result) in rdr.deserialize().enumerate() {
            let operation: Operation =
                result.with_context(|| format!("malformed operation on row {}", row + 1))?;

            match operation.apply(&mut self.ledger) {
                Ok(outcome) => {
                    summary.applied += 1;
                    writeln!(messages, "ok: {outcome}")?;
                }
                Err(e) => {
                    warn!("row {}: {e}", row + 1);
                    summary.rejected += 1;
                    writeln!(messages, "error: {e}")?;
                }
            }
        }
        messages.flush()?;

        Ok(summary)
    }

    /// Writes every account in creation order.
    pub fn report<W: io::Write>(&self, mut writer: W, format: ReportFormat) -> anyhow::Result<()> {
        let accounts = self.ledger.list_accounts();

        match format {
            ReportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(writer);
                if accounts.is_empty() {
                    wtr.write_record(["id", "name", "balance"])?;
                }
                for account in accounts {
                    wtr.serialize(account)?;
                }
                wtr.flush()?;
            }
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, accounts)?;
                writeln!(writer)?;
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
