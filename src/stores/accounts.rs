use rust_decimal::Decimal;
use std::collections::HashMap;
use time::OffsetDateTime;

use crate::dto::{AccountId, Currency, UserId};
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub user: UserId,
    pub number: String,
    pub currency: Currency,
    pub balance: Decimal,
    pub opened_at: OffsetDateTime,
    pub active: bool,
}

#[derive(Default)]
pub struct AccountsStore {
    accounts: HashMap<AccountId, Account>,
}

impl AccountsStore {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Adds an account. Account ids are unique; reusing one is an error.
    pub fn open(&mut self, account: Account) -> Result<(), Error> {
        if self.accounts.contains_key(&account.id) {
            return Err(Error::DuplicateAccount(account.id));
        }
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Opens a fresh active account with a generated account number
    /// (`<currency prefix><id, zero padded to 6 digits>`).
    pub fn open_account(
        &mut self,
        id: AccountId,
        user: UserId,
        currency: Currency,
        opening_balance: Decimal,
    ) -> Result<&Account, Error> {
        self.open(Account {
            id,
            user,
            number: format!("{}{:06}", currency.prefix(), id),
            currency,
            balance: opening_balance,
            opened_at: OffsetDateTime::now_utc(),
            active: true,
        })?;
        Ok(&self.accounts[&id])
    }

    /// Gets an account, or returns an error if it doesn't exist.
    pub fn get(&self, id: AccountId) -> Result<&Account, Error> {
        self.accounts.get(&id).ok_or(Error::AccountNotFound(id))
    }

    /// Gets an account that must be able to take part in an operation.
    /// Inactive accounts can hold a balance but cannot transact.
    pub fn get_active(&self, id: AccountId) -> Result<&Account, Error> {
        let account = self.get(id)?;
        if !account.active {
            return Err(Error::AccountInactive(id));
        }
        Ok(account)
    }

    /// Adds to an account's balance.
    pub fn credit(&mut self, id: AccountId, amount: Decimal) -> Result<(), Error> {
        let account = self.get_mut(id)?;
        account.balance += amount;
        Ok(())
    }

    /// Subtracts from an account's balance. Refuses to overdraw, so a
    /// balance can never go negative through this store.
    pub fn debit(&mut self, id: AccountId, amount: Decimal) -> Result<(), Error> {
        let account = self.get_mut(id)?;
        if account.balance < amount {
            return Err(Error::InsufficientBalance {
                available: account.balance,
                requested: amount,
            });
        }
        account.balance -= amount;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Active accounts owned by the given user.
    pub fn for_user(&self, user: UserId) -> impl Iterator<Item = &Account> {
        self.accounts
            .values()
            .filter(move |account| account.user == user && account.active)
    }

    fn get_mut(&mut self, id: AccountId) -> Result<&mut Account, Error> {
        self.accounts.get_mut(&id).ok_or(Error::AccountNotFound(id))
    }
}
