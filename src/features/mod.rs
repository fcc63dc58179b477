mod account;
mod ledger;
mod operation;
mod session;

pub use self::session::{ReportFormat, Session};
