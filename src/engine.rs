use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::dto::{AccountBalance, AccountId, Currency, Operation, OperationKind, Receipt, UserId};
use crate::limits::Limits;
use crate::stores::{
    Account, AccountsStore, ExchangeRate, RateTable, Transaction, TransactionStatus,
    TransactionsStore,
};
use crate::Error;

/// The banking engine: owns the account store, the transaction ledger and
/// the exchange rate table, and executes operations against them.
///
/// All validation happens before any balance is touched, so a rejected
/// operation leaves every account exactly as it was.
pub struct Engine {
    accounts: AccountsStore,
    transactions: TransactionsStore,
    rates: RateTable,
    limits: Limits,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            accounts: AccountsStore::new(),
            transactions: TransactionsStore::new(),
            rates: RateTable::new(),
            limits,
        }
    }

    /// Adds an existing account record, e.g. from a seed file.
    pub fn add_account(&mut self, account: Account) -> Result<(), Error> {
        self.accounts.open(account)
    }

    /// Opens a fresh active account with a generated account number.
    pub fn open_account(
        &mut self,
        id: AccountId,
        user: UserId,
        currency: Currency,
        opening_balance: Decimal,
    ) -> Result<&Account, Error> {
        self.accounts.open_account(id, user, currency, opening_balance)
    }

    /// Seeds or replaces the rate for a directed currency pair.
    pub fn set_rate(&mut self, from: Currency, to: Currency, rate: Decimal) {
        self.rates.set(from, to, rate);
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn exchange_rates(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.iter()
    }

    /// Balance summaries for a user's active accounts, sorted by account id.
    pub fn user_accounts(&self, user: UserId) -> Vec<AccountBalance> {
        let mut rows: Vec<_> = self.accounts.for_user(user).map(AccountBalance::from).collect();
        rows.sort_by_key(|row| row.account);
        rows
    }

    /// Executes one operation row, dispatching on its kind.
    pub fn process(&mut self, operation: Operation) -> Result<Receipt, Error> {
        match operation.kind {
            OperationKind::Transfer => {
                let from = operation.from.ok_or(Error::InvalidOperation)?;
                let to = operation.to.ok_or(Error::InvalidOperation)?;
                self.transfer(from, to, operation.amount, operation.description)
            }
            OperationKind::Deposit => {
                let to = operation.to.ok_or(Error::InvalidOperation)?;
                self.deposit(to, operation.amount, operation.description)
            }
            OperationKind::Withdrawal => {
                let from = operation.from.ok_or(Error::InvalidOperation)?;
                self.withdraw(from, operation.amount, operation.description)
            }
        }
    }

    /// Moves `amount` (in the source currency) from one account to another,
    /// converting through the rate table when the currencies differ.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Receipt, Error> {
        if from == to {
            return Err(Error::SameAccount);
        }

        let source = self.accounts.get_active(from)?;
        let destination = self.accounts.get_active(to)?;

        self.limits.check_amount(amount)?;

        if source.balance < amount {
            return Err(Error::InsufficientBalance {
                available: source.balance,
                requested: amount,
            });
        }

        let source_currency = source.currency;
        let destination_currency = destination.currency;

        // Daily limit is evaluated in the reference currency
        let now = OffsetDateTime::now_utc();
        let spent = self.transferred_on(from, now.date())?;
        let amount_in_reference =
            self.rates
                .convert(amount, source_currency, self.limits.reference_currency)?;
        if spent + amount_in_reference > self.limits.daily_transfer_limit {
            return Err(Error::DailyLimitExceeded {
                spent,
                limit: self.limits.daily_transfer_limit,
            });
        }

        let rate = self.rates.rate(source_currency, destination_currency)?;
        let converted = amount * rate;

        self.accounts.debit(from, amount)?;
        self.accounts.credit(to, converted)?;

        let id = self.transactions.record(Transaction {
            id: 0, // assigned by the ledger
            from: Some(from),
            to: Some(to),
            amount,
            currency: source_currency,
            rate,
            kind: OperationKind::Transfer,
            status: TransactionStatus::Completed,
            executed_at: now,
            description,
        });

        Ok(Receipt {
            transaction: id,
            converted_amount: converted,
            rate,
        })
    }

    /// Credits cash into an account.
    pub fn deposit(
        &mut self,
        to: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Receipt, Error> {
        let destination = self.accounts.get_active(to)?;
        self.limits.check_amount(amount)?;
        let currency = destination.currency;

        self.accounts.credit(to, amount)?;

        let id = self.transactions.record(Transaction {
            id: 0, // assigned by the ledger
            from: None,
            to: Some(to),
            amount,
            currency,
            rate: Decimal::ONE,
            kind: OperationKind::Deposit,
            status: TransactionStatus::Completed,
            executed_at: OffsetDateTime::now_utc(),
            description,
        });

        Ok(Receipt {
            transaction: id,
            converted_amount: amount,
            rate: Decimal::ONE,
        })
    }

    /// Debits cash out of an account.
    pub fn withdraw(
        &mut self,
        from: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Receipt, Error> {
        let source = self.accounts.get_active(from)?;
        self.limits.check_amount(amount)?;

        if source.balance < amount {
            return Err(Error::InsufficientBalance {
                available: source.balance,
                requested: amount,
            });
        }
        let currency = source.currency;

        self.accounts.debit(from, amount)?;

        let id = self.transactions.record(Transaction {
            id: 0, // assigned by the ledger
            from: Some(from),
            to: None,
            amount,
            currency,
            rate: Decimal::ONE,
            kind: OperationKind::Withdrawal,
            status: TransactionStatus::Completed,
            executed_at: OffsetDateTime::now_utc(),
            description,
        });

        Ok(Receipt {
            transaction: id,
            converted_amount: amount,
            rate: Decimal::ONE,
        })
    }

    /// Total of the account's completed transfers on `day`, in the reference
    /// currency.
    fn transferred_on(&self, account: AccountId, day: Date) -> Result<Decimal, Error> {
        let mut total = Decimal::ZERO;
        for transaction in self.transactions.completed_transfers_on(account, day) {
            total += self.rates.convert(
                transaction.amount,
                transaction.currency,
                self.limits.reference_currency,
            )?;
        }
        Ok(total)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
