use std::fmt;

use anyhow::{bail, Context};
use rust_decimal::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use super::account::{Account, AccountId};
use super::ledger::{Ledger, LedgerError};

/// Money inputs are whole cents
const CENT_SCALE: u32 = 2;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OperationType {
    /// Opens a new account with an initial balance
    Create,

    /// Credits an existing account
    Deposit,

    /// Debits an existing account. Fails without touching the balance when
    /// the account holds less than the requested amount
    Withdraw,

    /// Reads the balance of one account
    Balance,

    /// Lists every account in the order they were opened
    List,

    /// Moves money from `account` to `to`
    Transfer,
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use OperationType::*;

        f.write_str(match self {
            Create => "create",
            Deposit => "deposit",
            Withdraw => "withdraw",
            Balance => "balance",
            List => "list",
            Transfer => "transfer",
        })
    }
}

#[derive(Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Invalid input - {0:#}")]
    InvalidInput(#[from] anyhow::Error),
}

type OperationResult<T> = Result<T, OperationError>;

/// One row of an operation script
#[derive(Deserialize, Debug, Clone)]
pub struct Operation {
    #[serde(rename = "type")]
    operation_type: OperationType,

    /// Account acted on, or the sender of a transfer
    #[serde(default)]
    account: Option<AccountId>,

    /// Holder's name, only read by `create`
    #[serde(default)]
    name: Option<String>,

    /// Receiver of a transfer
    #[serde(rename = "to", default)]
    counterparty: Option<AccountId>,

    /// Kept raw so the decimal is parsed exactly
    #[serde(default)]
    amount: Option<String>,
}

/// What a successful operation produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Created(Account),
    Deposited {
        amount: Decimal,
        balance: Decimal,
    },
    Withdrew {
        amount: Decimal,
        balance: Decimal,
    },
    Balance(Decimal),
    Accounts(Vec<Account>),
    Transferred {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        from_balance: Decimal,
        to_balance: Decimal,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created(account) => write!(
                f,
                "Account created for {} with balance ${:.2}",
                account.name(),
                account.balance()
            ),
            Outcome::Deposited { amount, balance } => {
                write!(f, "Deposited ${amount:.2}. New balance: ${balance:.2}")
            }
            Outcome::Withdrew { amount, balance } => {
                write!(f, "Withdrew ${amount:.2}. New balance: ${balance:.2}")
            }
            Outcome::Balance(balance) => write!(f, "Account balance: ${balance:.2}"),
            Outcome::Accounts(accounts) if accounts.is_empty() => f.write_str("No accounts found."),
            Outcome::Accounts(accounts) => {
                f.write_str("All customer accounts:")?;
                for account in accounts {
                    write!(
                        f,
                        "\n  {} (Account #: {}) | Balance: ${:.2}",
                        account.name(),
                        account.id(),
                        account.balance()
                    )?;
                }
                Ok(())
            }
            Outcome::Transferred {
                from,
                to,
                amount,
                from_balance,
                to_balance,
            } => write!(
                f,
                "Sent ${amount:.2} from {from} to {to}. \
                 Sender's new balance: ${from_balance:.2}. \
                 Receiver's new balance: ${to_balance:.2}"
            ),
        }
    }
}

impl Operation {
    pub(crate) fn apply(&self, ledger: &mut Ledger) -> OperationResult<Outcome> {
        use OperationType::*;

        let outcome = match self.operation_type {
            Create => {
                let id = self.require_account()?.clone();
                let initial_balance = self.parse_amount()?;
                let name = self.name.clone().unwrap_or_default();
                Outcome::Created(ledger.create_account(name, id, initial_balance)?)
            }
            Deposit => {
                let amount = self.parse_amount()?;
                let balance = ledger.deposit(self.require_account()?, amount)?;
                Outcome::Deposited { amount, balance }
            }
            Withdraw => {
                let amount = self.parse_amount()?;
                let balance = ledger.withdraw(self.require_account()?, amount)?;
                Outcome::Withdrew { amount, balance }
            }
            Balance => Outcome::Balance(ledger.get_balance(self.require_account()?)?),
            List => Outcome::Accounts(ledger.list_accounts().to_vec()),
            Transfer => {
                let from = self.require_account()?;
                let to = self
                    .counterparty
                    .as_ref()
                    .with_context(|| "transfer requires a receiver account number")?;
                let amount = self.parse_amount()?;
                let receipt = ledger.transfer(from, to, amount)?;
                Outcome::Transferred {
                    from: from.clone(),
                    to: to.clone(),
                    amount,
                    from_balance: receipt.from_balance,
                    to_balance: receipt.to_balance,
                }
            }
        };

        Ok(outcome)
    }

    fn require_account(&self) -> anyhow::Result<&AccountId> {
        self.account
            .as_ref()
            .with_context(|| format!("{} requires an account number", self.operation_type))
    }

    fn parse_amount(&self) -> anyhow::Result<Decimal> {
        let raw = self
            .amount
            .as_deref()
            .with_context(|| format!("{} requires an amount", self.operation_type))?;
        let amount = Decimal::from_str(raw)
            .with_context(|| format!("`{raw}` is not a valid amount"))?
            .normalize();

        if amount.scale() > CENT_SCALE {
            bail!("`{raw}` has more than {CENT_SCALE} decimal places");
        }
        Ok(amount)
    }
}
