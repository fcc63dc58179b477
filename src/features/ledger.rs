use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use super::account::{Account, AccountError, AccountId};

/// Which side of an operation an account number was given for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Holder,
    Sender,
    Receiver,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Party::Holder => "Account",
            Party::Sender => "Sender account",
            Party::Receiver => "Receiver account",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {0} already exists")]
    DuplicateAccount(AccountId),

    #[error("{party} {id} not found")]
    AccountNotFound { id: AccountId, party: Party },

    #[error(transparent)]
    Account(#[from] AccountError),
}

pub(crate) type LedgerResult<T> = Result<T, LedgerError>;

/// Balances of both sides after a transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from_balance: Decimal,
    pub to_balance: Decimal,
}

/// Owns every account of a session, in creation order
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    index: HashMap<AccountId, usize>,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn find(&self, id: &AccountId, party: Party) -> LedgerResult<&Account> {
        self.index
            .get(id)
            .map(|&slot| &self.accounts[slot])
            .ok_or_else(|| LedgerError::AccountNotFound {
                id: id.clone(),
                party,
            })
    }

    /// Replaces the stored state of an existing account.
    fn update(&mut self, account: Account) {
        if let Some(&slot) = self.index.get(account.id()) {
            self.accounts[slot] = account;
        }
    }

    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        id: AccountId,
        initial_balance: Decimal,
    ) -> LedgerResult<Account> {
        if self.index.contains_key(&id) {
            return Err(LedgerError::DuplicateAccount(id));
        }

        let account = Account::open(id, name, initial_balance)?;
        self.index.insert(account.id().clone(), self.accounts.len());
        self.accounts.push(account.clone());
        debug!("opened account {} for {}", account.id(), account.name());
        Ok(account)
    }

    pub fn deposit(&mut self, id: &AccountId, amount: Decimal) -> LedgerResult<Decimal> {
        let account = self.find(id, Party::Holder)?.clone().deposit(amount)?;
        let balance = account.balance();
        self.update(account);
        debug!("deposited {amount} into {id}, balance {balance}");
        Ok(balance)
    }

    pub fn withdraw(&mut self, id: &AccountId, amount: Decimal) -> LedgerResult<Decimal> {
        let account = self.find(id, Party::Holder)?.clone().withdraw(amount)?;
        let balance = account.balance();
        self.update(account);
        debug!("withdrew {amount} from {id}, balance {balance}");
        Ok(balance)
    }

    pub fn get_balance(&self, id: &AccountId) -> LedgerResult<Decimal> {
        Ok(self.find(id, Party::Holder)?.balance())
    }

    pub fn list_accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Moves `amount` from one account to another. Both balances are computed
    /// before either is stored, so a failed transfer changes nothing. A transfer
    /// to the same account succeeds without changing its balance.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Decimal,
    ) -> LedgerResult<TransferReceipt> {
        let sender = self.find(from, Party::Sender)?.clone();
        let receiver = self.find(to, Party::Receiver)?.clone();

        let debited = sender.withdraw(amount)?;
        if from == to {
            let balance = debited.deposit(amount)?.balance();
            return Ok(TransferReceipt {
                from_balance: balance,
                to_balance: balance,
            });
        }
        let credited = receiver.deposit(amount)?;

        let receipt = TransferReceipt {
            from_balance: debited.balance(),
            to_balance: credited.balance(),
        };
        self.update(debited);
        self.update(credited);
        debug!("transferred {amount} from {from} to {to}");
        Ok(receipt)
    }
}
