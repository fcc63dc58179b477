use std::fmt;

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Account number chosen by the customer at creation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds: requested ${requested:.2}, available ${available:.2}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid amount ${0:.2}: amounts cannot be negative")]
    InvalidAmount(Decimal),

    #[error("Balance overflow")]
    BalanceOverflow,
}

pub(crate) type AccountResult<T> = Result<T, AccountError>;

/// Customer account
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,

    /// Holder's display name, fixed at creation
    name: String,

    /// Never negative once an operation has completed
    #[serde(serialize_with = "round_serialize")]
    balance: Decimal,
}

fn round_serialize<S>(amount: &Decimal, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    // Serialize to 2 decimal
    let rounded_amount = format!("{amount:.2}");
    s.serialize_str(rounded_amount.as_str())
}

fn ensure_non_negative(amount: Decimal) -> AccountResult<Decimal> {
    if amount < dec!(0) {
        return Err(AccountError::InvalidAmount(amount));
    }
    Ok(amount)
}

impl Account {
    pub(crate) fn open(
        id: AccountId,
        name: impl Into<String>,
        initial_balance: Decimal,
    ) -> AccountResult<Self> {
        Ok(Self {
            id,
            name: name.into(),
            balance: ensure_non_negative(initial_balance)?,
        })
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub(crate) fn deposit(self, amount: Decimal) -> AccountResult<Self> {
        let amount = ensure_non_negative(amount)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;

        Ok(Self { balance, ..self })
    }

    pub(crate) fn withdraw(self, amount: Decimal) -> AccountResult<Self> {
        let amount = ensure_non_negative(amount)?;
        if self.balance < amount {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }

        Ok(Self {
            balance: self.balance - amount,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn alice(balance: Decimal) -> Account {
        Account::open(AccountId::from("001"), "Alice", balance).unwrap()
    }

    #[test]
    fn open_keeps_fields() {
        let account = alice(dec!(100.00));
        assert_eq!(account.id().as_str(), "001");
        assert_eq!(account.name(), "Alice");
        assert_eq!(account.balance(), dec!(100.00));
    }

    #[test]
    fn open_rejects_negative_initial_balance() {
        let err = Account::open(AccountId::from("001"), "Alice", dec!(-0.01)).unwrap_err();
        assert_eq!(err, AccountError::InvalidAmount(dec!(-0.01)));
    }

    #[test_case(dec!(0), dec!(10), dec!(10) ; "into empty account")]
    #[test_case(dec!(100.00), dec!(50.00), dec!(150.00) ; "adds to balance")]
    #[test_case(dec!(0.10), dec!(0.20), dec!(0.30) ; "exact cents")]
    #[test_case(dec!(5), dec!(0), dec!(5) ; "zero amount")]
    fn deposit_adds_amount(start: Decimal, amount: Decimal, expected: Decimal) {
        assert_eq!(alice(start).deposit(amount).unwrap().balance(), expected);
    }

    #[test_case(dec!(150), dec!(50), dec!(100) ; "partial")]
    #[test_case(dec!(150), dec!(150), dec!(0) ; "entire balance")]
    fn withdraw_subtracts_amount(start: Decimal, amount: Decimal, expected: Decimal) {
        assert_eq!(alice(start).withdraw(amount).unwrap().balance(), expected);
    }

    #[test]
    fn withdraw_more_than_balance_fails() {
        let err = alice(dec!(150.00)).withdraw(dec!(200.00)).unwrap_err();
        assert_eq!(
            err,
            AccountError::InsufficientFunds {
                requested: dec!(200.00),
                available: dec!(150.00),
            }
        );
        assert_eq!(
            err.to_string(),
            "Insufficient funds: requested $200.00, available $150.00"
        );
    }

    #[test_case(dec!(-1) ; "whole")]
    #[test_case(dec!(-0.5) ; "fraction")]
    fn negative_amounts_are_rejected(amount: Decimal) {
        assert_eq!(
            alice(dec!(10)).deposit(amount).unwrap_err(),
            AccountError::InvalidAmount(amount)
        );
        assert_eq!(
            alice(dec!(10)).withdraw(amount).unwrap_err(),
            AccountError::InvalidAmount(amount)
        );
    }

    #[test]
    fn deposit_overflow_is_reported() {
        let err = alice(Decimal::MAX).deposit(dec!(1)).unwrap_err();
        assert_eq!(err, AccountError::BalanceOverflow);
    }

    #[test]
    fn balance_serializes_with_two_decimals() {
        let json = serde_json::to_string(&alice(dec!(50))).unwrap();
        assert_eq!(json, r#"{"id":"001","name":"Alice","balance":"50.00"}"#);
    }
}
