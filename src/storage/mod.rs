//! Storage layer
//!
//! The rest of the crate talks to persistence through the [`Repository`]
//! port. The shipped implementation, [`KeyValueRepository`], lays the data
//! out as one JSON document per key:
//!
//! - `budgets`: category id -> amount, process-wide
//! - `transactions_<yyyy>_<mm>`: the transaction list of one calendar month
//! - `last_seen_month`: `<yyyy>_<mm>` marker of the last load
//!
//! Missing or malformed documents never fail a load: they fall back to an
//! empty list or the default budget table and the fallback is logged.

pub mod file_io;
pub mod store;

pub use file_io::{read_optional, write_atomic};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::paths::ZbbPaths;
use crate::error::{ZbbError, ZbbResult};
use crate::models::{Budgets, Catalog, MonthId, Transaction};

pub const BUDGETS_KEY: &str = "budgets";
pub const LAST_SEEN_MONTH_KEY: &str = "last_seen_month";
const TRANSACTIONS_KEY_PREFIX: &str = "transactions_";

/// Storage key holding a month's transactions
pub fn transactions_key(month: MonthId) -> String {
    format!("{}{}", TRANSACTIONS_KEY_PREFIX, month.key_suffix())
}

/// Inverse of [`transactions_key`]
pub fn month_from_key(key: &str) -> Option<MonthId> {
    key.strip_prefix(TRANSACTIONS_KEY_PREFIX)
        .and_then(|suffix| MonthId::parse(suffix).ok())
}

/// Persistence port for budgets and monthly transaction lists
pub trait Repository {
    /// Transactions stored for `month`; empty when missing or unreadable,
    /// with rows that fail validation skipped
    fn load_transactions(&self, month: MonthId) -> Vec<Transaction>;

    /// Replace the stored transactions of `month`
    fn save_transactions(&self, month: MonthId, transactions: &[Transaction]) -> ZbbResult<()>;

    /// Stored budgets; the default table when missing, unreadable or holding
    /// out-of-range allocations
    fn load_budgets(&self) -> Budgets;

    fn save_budgets(&self, budgets: &Budgets) -> ZbbResult<()>;

    /// The month recorded by the previous load, if any
    fn last_seen_month(&self) -> Option<MonthId>;

    /// Record `month` as the last seen month
    fn mark_seen(&self, month: MonthId) -> ZbbResult<()>;

    /// Months that have a stored transaction list, oldest first
    fn list_months(&self) -> Vec<MonthId>;
}

/// [`Repository`] over any [`KeyValueStore`]
#[derive(Debug)]
pub struct KeyValueRepository<S> {
    store: S,
}

/// Repository persisted as JSON files in the data directory
pub type JsonFileRepository = KeyValueRepository<FileStore>;

/// Repository kept entirely in memory
pub type MemoryRepository = KeyValueRepository<MemoryStore>;

impl<S: KeyValueStore> KeyValueRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read and decode a document, substituting `fallback` for anything
    /// missing or malformed
    fn read_or<T, F>(&self, key: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.store.read(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "malformed document, using fallback");
                    fallback()
                }
            },
            Ok(None) => {
                debug!(key, "no stored document, using fallback");
                fallback()
            }
            Err(e) => {
                warn!(key, error = %e, "failed to read document, using fallback");
                fallback()
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> ZbbResult<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| ZbbError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
        self.store.write(key, &json)
    }
}

impl JsonFileRepository {
    /// Open the repository in the configured data directory
    pub fn open(paths: &ZbbPaths) -> ZbbResult<Self> {
        paths.ensure_directories()?;
        Ok(Self::new(FileStore::new(paths.data_dir())))
    }
}

impl MemoryRepository {
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: KeyValueStore> Repository for KeyValueRepository<S> {
    fn load_transactions(&self, month: MonthId) -> Vec<Transaction> {
        let key = transactions_key(month);
        let stored: Vec<Transaction> = self.read_or(&key, Vec::new);

        // Stored rows may have been written with debt tracking on, so check
        // against the widest catalog.
        let catalog = Catalog::extended();
        stored
            .into_iter()
            .filter(|txn| match txn.validate(&catalog) {
                Ok(()) => true,
                Err(e) => {
                    warn!(key = %key, id = %txn.id, error = %e, "skipping invalid stored transaction");
                    false
                }
            })
            .collect()
    }

    fn save_transactions(&self, month: MonthId, transactions: &[Transaction]) -> ZbbResult<()> {
        self.write(&transactions_key(month), transactions)
    }

    fn load_budgets(&self) -> Budgets {
        let budgets: Budgets = self.read_or(BUDGETS_KEY, Budgets::default);
        match budgets.validate() {
            Ok(()) => budgets,
            Err(e) => {
                warn!(key = BUDGETS_KEY, error = %e, "invalid budget table, using defaults");
                Budgets::default()
            }
        }
    }

    fn save_budgets(&self, budgets: &Budgets) -> ZbbResult<()> {
        self.write(BUDGETS_KEY, budgets)
    }

    fn last_seen_month(&self) -> Option<MonthId> {
        let raw: Option<String> = self.read_or(LAST_SEEN_MONTH_KEY, || None);
        raw.and_then(|s| MonthId::parse(&s).ok())
    }

    fn mark_seen(&self, month: MonthId) -> ZbbResult<()> {
        self.write(LAST_SEEN_MONTH_KEY, &month.key_suffix())
    }

    fn list_months(&self) -> Vec<MonthId> {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "failed to list stored months");
                return Vec::new();
            }
        };

        let mut months: Vec<MonthId> = keys.iter().filter_map(|k| month_from_key(k)).collect();
        months.sort();
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, PaymentMethod, TransactionId, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn june() -> MonthId {
        MonthId::new(2025, 6).unwrap()
    }

    fn sample_transaction() -> Transaction {
        Transaction {
            id: TransactionId::new(1_718_000_000_000),
            kind: TransactionType::Expense,
            category: "groceries".into(),
            description: "Đi chợ".into(),
            amount: Money::new(250_000),
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            method: Some(PaymentMethod::Cash),
        }
    }

    #[test]
    fn test_key_format() {
        assert_eq!(transactions_key(june()), "transactions_2025_06");
        assert_eq!(month_from_key("transactions_2025_06"), Some(june()));
        assert_eq!(month_from_key("budgets"), None);
    }

    #[test]
    fn test_missing_data_falls_back() {
        let repo = MemoryRepository::in_memory();
        assert!(repo.load_transactions(june()).is_empty());
        assert_eq!(repo.load_budgets(), Budgets::default());
        assert_eq!(repo.last_seen_month(), None);
        assert!(repo.list_months().is_empty());
    }

    #[test]
    fn test_malformed_data_falls_back() {
        let repo = MemoryRepository::in_memory();
        repo.store().write("transactions_2025_06", "{not json").unwrap();
        repo.store().write(BUDGETS_KEY, "[1, 2, 3]").unwrap();
        repo.store().write(LAST_SEEN_MONTH_KEY, "\"garbage\"").unwrap();

        assert!(repo.load_transactions(june()).is_empty());
        assert_eq!(repo.load_budgets(), Budgets::default());
        assert_eq!(repo.last_seen_month(), None);
    }

    #[test]
    fn test_negative_stored_budget_falls_back_to_defaults() {
        let repo = MemoryRepository::in_memory();
        repo.store()
            .write(BUDGETS_KEY, r#"{"rent": -5, "groceries": 8000000}"#)
            .unwrap();

        assert_eq!(repo.load_budgets(), Budgets::default());
    }

    #[test]
    fn test_invalid_stored_transactions_are_skipped() {
        let repo = MemoryRepository::in_memory();
        let valid = sample_transaction();

        let mut zero = sample_transaction();
        zero.id = TransactionId::new(2);
        zero.amount = Money::zero();

        let mut mismatched = sample_transaction();
        mismatched.id = TransactionId::new(3);
        mismatched.kind = TransactionType::Income;

        let mut debt = sample_transaction();
        debt.id = TransactionId::new(4);
        debt.kind = TransactionType::Debt;
        debt.category = "bank_loan".into();
        debt.method = None;

        repo.save_transactions(june(), &[valid.clone(), zero, mismatched, debt.clone()])
            .unwrap();

        assert_eq!(repo.load_transactions(june()), vec![valid, debt]);
    }

    #[test]
    fn test_transactions_scoped_by_month() {
        let repo = MemoryRepository::in_memory();
        repo.save_transactions(june(), &[sample_transaction()]).unwrap();

        assert_eq!(repo.load_transactions(june()), vec![sample_transaction()]);
        assert!(repo.load_transactions(june().next()).is_empty());
        assert_eq!(repo.list_months(), vec![june()]);
    }

    #[test]
    fn test_last_seen_round_trip() {
        let repo = MemoryRepository::in_memory();
        repo.mark_seen(june()).unwrap();
        assert_eq!(repo.last_seen_month(), Some(june()));
        assert_eq!(
            repo.store().read(LAST_SEEN_MONTH_KEY).unwrap().as_deref(),
            Some("\"2025_06\"")
        );
    }

    #[test]
    fn test_json_file_repository_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ZbbPaths::with_base_dir(temp_dir.path().to_path_buf());

        let repo = JsonFileRepository::open(&paths).unwrap();
        let budgets = Budgets::from_pairs([("rent", 1_000)]);
        repo.save_budgets(&budgets).unwrap();
        repo.save_transactions(june(), &[sample_transaction()]).unwrap();

        let reopened = JsonFileRepository::open(&paths).unwrap();
        assert_eq!(reopened.load_budgets(), budgets);
        assert_eq!(reopened.load_transactions(june()).len(), 1);
        assert!(paths.data_dir().join("transactions_2025_06.json").exists());
    }
}
