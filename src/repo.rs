//! The transaction repository: the in-memory list of transactions, written through to a
//! `RecordStore` on every change.

use crate::model::{NewTransaction, Transaction};
use crate::store::{RecordStore, TRANSACTIONS};
use crate::utils::generate_transaction_id;
use crate::Result;
use anyhow::Context;
use tracing::{debug, trace, warn};

/// Owns the ordered list of transactions (newest first) and the store that persists it.
///
/// Every mutating method persists the full list before it returns. The new list is only committed
/// to memory once the write has succeeded, so memory and the store never disagree.
#[derive(Debug)]
pub struct Repository<S>
where
    S: RecordStore,
{
    store: S,
    transactions: Vec<Transaction>,
}

impl<S> Repository<S>
where
    S: RecordStore,
{
    /// Reads the persisted transactions from `store`.
    ///
    /// A missing or malformed value is treated as "no data": the repository starts empty and a
    /// warning is logged. Loading never fails.
    pub fn load(store: S) -> Self {
        let transactions = match store.get(TRANSACTIONS) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Transaction>>(&json) {
                Ok(transactions) => transactions,
                Err(e) => {
                    warn!("The stored transactions could not be parsed and will be ignored: {e}");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("No stored transactions found, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!("Unable to read stored transactions, starting empty: {e:#}");
                Vec::new()
            }
        };
        debug!("Loaded {} transactions", transactions.len());
        Self {
            store,
            transactions,
        }
    }

    /// The transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives `new` a fresh ID, puts it at the front of the list and persists. Returns the stored
    /// record.
    pub fn add(&mut self, new: NewTransaction) -> Result<Transaction> {
        let mut id = generate_transaction_id();
        while self.get(&id).is_some() {
            id = generate_transaction_id();
        }
        let transaction = new.with_id(id);
        let mut next = Vec::with_capacity(self.transactions.len() + 1);
        next.push(transaction.clone());
        next.extend(self.transactions.iter().cloned());
        self.commit(next)?;
        debug!("Added transaction {}", transaction.id);
        Ok(transaction)
    }

    /// Removes the transaction with `id`. Returns it, or `None` if there was no such transaction.
    /// The list is persisted either way.
    pub fn delete(&mut self, id: &str) -> Result<Option<Transaction>> {
        let removed = self.get(id).cloned();
        let next: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        match &removed {
            Some(_) => debug!("Deleted transaction {id}"),
            None => debug!("No transaction with ID {id}, nothing deleted"),
        }
        Ok(removed)
    }

    /// Replaces the whole list with `transactions`, as given, and persists it.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<()> {
        let count = transactions.len();
        self.commit(transactions)?;
        debug!("Replaced all transactions with {count} records");
        Ok(())
    }

    /// Removes every transaction and persists the empty list.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())?;
        debug!("Cleared all transactions");
        Ok(())
    }

    /// Writes `next` to the store and, if that succeeds, makes it the current list.
    fn commit(&mut self, next: Vec<Transaction>) -> Result<()> {
        let json =
            serde_json::to_string(&next).context("Unable to serialize the transaction list")?;
        trace!("Persisting {} transactions", next.len());
        self.store
            .put(TRANSACTIONS, &json)
            .context("Unable to persist the transaction list")?;
        self.transactions = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, TransactionType};
    use crate::store::{FileStore, MemoryStore};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn new_txn(amount: Amount, t: TransactionType, category: &str) -> NewTransaction {
        NewTransaction::new(t, amount, category, "test", "2025-03-01")
    }

    fn seeded() -> Repository<MemoryStore> {
        let mut repo = Repository::load(MemoryStore::new());
        repo.add(new_txn(
            Amount::new(dec!(1000)),
            TransactionType::Income,
            "Salary",
        ))
        .unwrap();
        repo.add(new_txn(
            Amount::new(dec!(400)),
            TransactionType::Expense,
            "Rent/Mortgage",
        ))
        .unwrap();
        repo
    }

    fn stored(repo: &Repository<MemoryStore>) -> Vec<Transaction> {
        let json = repo.store().get(TRANSACTIONS).unwrap().unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_load_empty_store() {
        let repo = Repository::load(MemoryStore::new());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        let repo = Repository::load(MemoryStore::with_value(TRANSACTIONS, "{not json"));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_load_wrong_shape_is_empty() {
        let repo = Repository::load(MemoryStore::with_value(TRANSACTIONS, r#"{"a": 1}"#));
        assert!(repo.is_empty());
        let repo = Repository::load(MemoryStore::with_value(TRANSACTIONS, r#"[{"id": 1}]"#));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let repo = seeded();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.transactions()[0].category, "Rent/Mortgage");
        assert_eq!(repo.transactions()[1].category, "Salary");
        assert_ne!(repo.transactions()[0].id, repo.transactions()[1].id);
        assert_eq!(stored(&repo), repo.transactions());
    }

    #[test]
    fn test_add_then_delete_restores_prior_sequence() {
        let mut repo = seeded();
        let before = repo.transactions().to_vec();
        let added = repo
            .add(new_txn(
                Amount::new(dec!(12.5)),
                TransactionType::Expense,
                "Food & Dining",
            ))
            .unwrap();
        assert_eq!(repo.len(), 3);
        let removed = repo.delete(&added.id).unwrap();
        assert_eq!(removed, Some(added));
        assert_eq!(repo.transactions(), before.as_slice());
        assert_eq!(stored(&repo), before);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut repo = seeded();
        let before = repo.transactions().to_vec();
        assert_eq!(repo.delete("no-such-id").unwrap(), None);
        assert_eq!(repo.transactions(), before.as_slice());
    }

    #[test]
    fn test_replace_all_and_clear() {
        let mut repo = seeded();
        let replacement = vec![new_txn(Amount::new(dec!(5)), TransactionType::Expense, "Travel")
            .with_id("imported-1".to_string())];
        repo.replace_all(replacement.clone()).unwrap();
        assert_eq!(repo.transactions(), replacement.as_slice());
        assert_eq!(stored(&repo), replacement);

        repo.clear().unwrap();
        assert!(repo.is_empty());
        assert!(stored(&repo).is_empty());
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut repo = seeded();
        let before = repo.transactions().to_vec();
        repo.store.set_fail_writes(true);

        assert!(repo
            .add(new_txn(Amount::new(dec!(1)), TransactionType::Expense, "Travel"))
            .is_err());
        assert!(repo.delete(&before[0].id).is_err());
        let replacement = vec![new_txn(Amount::new(dec!(5)), TransactionType::Expense, "Travel")
            .with_id("imported-1".to_string())];
        assert!(repo.replace_all(replacement).is_err());
        assert!(repo.clear().is_err());
        assert_eq!(repo.transactions(), before.as_slice());
        assert_eq!(stored(&repo), before);
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let t = TempDir::new().unwrap();
        let mut repo = Repository::load(FileStore::open(t.path()).unwrap());
        repo.add(new_txn(
            Amount::new(dec!(1000)),
            TransactionType::Income,
            "Salary",
        ))
        .unwrap();
        repo.add(new_txn(
            Amount::new(dec!(19.99)),
            TransactionType::Expense,
            "Shopping",
        ))
        .unwrap();
        let expected = repo.transactions().to_vec();

        let reloaded = Repository::load(FileStore::open(t.path()).unwrap());
        assert_eq!(reloaded.transactions(), expected.as_slice());
    }
}
