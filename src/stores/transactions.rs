//! Append-only transaction ledger.
//!
//! Every successfully executed operation is recorded here with the exchange
//! rate applied at execution time, so cross-currency movements can be audited
//! later. The ledger also answers the "how much has this account transferred
//! today" query behind the daily limit check.

use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::dto::{AccountId, Currency, OperationKind, TransactionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    /// Source account; `None` for deposits (cash leg).
    pub from: Option<AccountId>,
    /// Destination account; `None` for withdrawals (cash leg).
    pub to: Option<AccountId>,
    /// Amount in the source currency.
    pub amount: Decimal,
    pub currency: Currency,
    /// Rate applied at execution time; exactly 1 for same-currency moves.
    pub rate: Decimal,
    pub kind: OperationKind,
    pub status: TransactionStatus,
    pub executed_at: OffsetDateTime,
    pub description: Option<String>,
}

#[derive(Default)]
pub struct TransactionsStore {
    entries: Vec<Transaction>,
}

impl TransactionsStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a transaction, assigning the next monotonic id (starting at
    /// 1). Any id on the passed record is overwritten; ids are handed out
    /// here and nowhere else.
    pub fn record(&mut self, mut transaction: Transaction) -> TransactionId {
        let id = self.entries.len() as TransactionId + 1;
        transaction.id = id;
        self.entries.push(transaction);
        id
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        // Ids are assigned densely from 1, so the ledger is indexable
        self.entries.get(id.checked_sub(1)? as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Completed transfers out of `account` executed on `day`. Deposits and
    /// withdrawals do not count against the daily transfer limit.
    pub fn completed_transfers_on(
        &self,
        account: AccountId,
        day: Date,
    ) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().filter(move |t| {
            t.from == Some(account)
                && t.kind == OperationKind::Transfer
                && t.status == TransactionStatus::Completed
                && t.executed_at.date() == day
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use time::macros::datetime;

    fn transfer(from: AccountId, amount: Decimal, executed_at: OffsetDateTime) -> Transaction {
        Transaction {
            id: 0,
            from: Some(from),
            to: Some(99),
            amount,
            currency: Currency::Try,
            rate: Decimal::ONE,
            kind: OperationKind::Transfer,
            status: TransactionStatus::Completed,
            executed_at,
            description: None,
        }
    }

    #[test]
    fn test_ids_are_monotonic_from_1() {
        let mut store = TransactionsStore::new();
        let now = OffsetDateTime::now_utc();

        assert_eq!(store.record(transfer(1, dec!(10), now)), 1);
        assert_eq!(store.record(transfer(1, dec!(20), now)), 2);
        assert_eq!(store.record(transfer(2, dec!(30), now)), 3);

        assert_eq!(store.get(2).unwrap().amount, dec!(20));
        assert!(store.get(4).is_none());
        assert!(store.get(0).is_none());
    }

    #[test]
    fn test_record_overwrites_caller_id() {
        let mut store = TransactionsStore::new();
        let mut tx = transfer(1, dec!(10), OffsetDateTime::now_utc());
        tx.id = 777;

        let id = store.record(tx);
        assert_eq!(id, 1);
        assert_eq!(store.get(1).unwrap().id, 1);
    }

    #[test]
    fn test_completed_transfers_filters_by_account_and_day() {
        let mut store = TransactionsStore::new();
        let today = datetime!(2026-08-20 10:00 UTC);
        let yesterday = datetime!(2026-08-19 23:59 UTC);

        store.record(transfer(1, dec!(100), today));
        store.record(transfer(1, dec!(50), yesterday));
        store.record(transfer(2, dec!(75), today));

        let amounts: Vec<_> = store
            .completed_transfers_on(1, today.date())
            .map(|t| t.amount)
            .collect();
        assert_eq!(amounts, vec![dec!(100)]);
    }

    #[test]
    fn test_completed_transfers_ignores_other_kinds() {
        let mut store = TransactionsStore::new();
        let now = datetime!(2026-08-20 10:00 UTC);

        let mut withdrawal = transfer(1, dec!(40), now);
        withdrawal.kind = OperationKind::Withdrawal;
        withdrawal.to = None;
        store.record(withdrawal);

        let mut pending = transfer(1, dec!(60), now);
        pending.status = TransactionStatus::Pending;
        store.record(pending);

        assert_eq!(store.completed_transfers_on(1, now.date()).count(), 0);
    }
}
