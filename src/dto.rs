//! Wire types for the CSV surfaces and the public result types.
//!
//! Input rows ([`AccountSeed`], [`RateSeed`], [`Operation`]) deserialize from
//! the seed and operations files; [`AccountRow`] is the reporting row written
//! back out. Amounts are truncated to 2 decimal places on the way in.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::stores::Account;

pub type AccountId = u32;
pub type UserId = u32;
pub type TransactionId = u64;

/// Currencies the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Try,
    Usd,
    Eur,
}

impl Currency {
    /// ISO-style code, also used as the wire representation.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Try => "TRY",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Symbol shown next to balances in user-facing summaries.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Try => "₺",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Account number prefix for accounts held in this currency.
    pub fn prefix(&self) -> &'static str {
        match self {
            Currency::Try => "TR",
            Currency::Usd => "US",
            Currency::Eur => "EU",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Transfer,
    Deposit,
    Withdrawal,
}

/// One row of the operations file. Deposits have no source leg and
/// withdrawals no destination leg, so both account ids are optional.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub from: Option<AccountId>,
    pub to: Option<AccountId>,
    #[serde(deserialize_with = "deserialize_decimal_2dp")]
    pub amount: Decimal,
    pub description: Option<String>,
}

/// One row of the accounts seed file.
#[derive(Debug, Deserialize, PartialEq)]
pub struct AccountSeed {
    pub account: AccountId,
    pub user: UserId,
    pub number: String,
    pub currency: Currency,
    #[serde(deserialize_with = "deserialize_decimal_2dp")]
    pub balance: Decimal,
    pub active: bool,
}

impl From<AccountSeed> for Account {
    fn from(seed: AccountSeed) -> Self {
        Account {
            id: seed.account,
            user: seed.user,
            number: seed.number,
            currency: seed.currency,
            balance: seed.balance,
            opened_at: OffsetDateTime::now_utc(),
            active: seed.active,
        }
    }
}

/// One row of the rates seed file: a directed pair and its multiplier.
#[derive(Debug, Deserialize, PartialEq)]
pub struct RateSeed {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

/// Reporting row written by the runners, one per account.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountRow {
    pub account: AccountId,
    pub number: String,
    pub currency: Currency,
    pub balance: Decimal,
    pub active: bool,
}

impl From<&Account> for AccountRow {
    fn from(account: &Account) -> Self {
        Self {
            account: account.id,
            number: account.number.clone(),
            currency: account.currency,
            // Strip trailing zeros picked up from rate arithmetic
            balance: account.balance.normalize(),
            active: account.active,
        }
    }
}

/// Per-account summary returned by [`crate::Engine::user_accounts`].
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountBalance {
    pub account: AccountId,
    pub number: String,
    pub currency: Currency,
    pub balance: Decimal,
    pub symbol: &'static str,
}

impl From<&Account> for AccountBalance {
    fn from(account: &Account) -> Self {
        Self {
            account: account.id,
            number: account.number.clone(),
            currency: account.currency,
            balance: account.balance,
            symbol: account.currency.symbol(),
        }
    }
}

/// Result of a successfully executed operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub transaction: TransactionId,
    /// Amount credited to the destination, in the destination currency.
    pub converted_amount: Decimal,
    /// Rate applied; exactly 1 for same-currency movements.
    pub rate: Decimal,
}

fn deserialize_decimal_2dp<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer)
        .map(|dec| dec.round_dp_with_strategy(2, RoundingStrategy::ToZero))
}
