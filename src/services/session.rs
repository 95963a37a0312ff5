//! Budget session
//!
//! Owns the active month's transactions and the process-wide budgets for the
//! lifetime of one user session. Every mutation is applied to the whole
//! collection in memory first and then written back through the
//! [`Repository`]. Persistence and audit writes are fire-and-forget: a failed
//! write is logged and the in-memory state stays authoritative.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::clock::Clock;
use crate::error::{ZbbError, ZbbResult};
use crate::models::{
    Budgets, Catalog, Money, MonthId, Transaction, TransactionDraft, TransactionId,
    TransactionType,
};
use crate::storage::{transactions_key, Repository};

use super::aggregator::{category_reports, CategoryReport, MonthSummary};
use super::filter::{filter_and_sort, SortDirection, SortField, TransactionFilter};

/// Read-only view of one month's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSnapshot {
    pub month: MonthId,
    pub transactions: Vec<Transaction>,
    pub budgets: Budgets,
}

impl MonthSnapshot {
    pub fn summary(&self) -> MonthSummary {
        MonthSummary::compute(&self.transactions, &self.budgets)
    }

    pub fn category_reports(&self, catalog: &Catalog) -> Vec<CategoryReport> {
        category_reports(&self.transactions, &self.budgets, catalog)
    }

    pub fn view(
        &self,
        filter: &TransactionFilter,
        field: SortField,
        direction: SortDirection,
    ) -> Vec<&Transaction> {
        filter_and_sort(&self.transactions, filter, field, direction)
    }
}

/// Load a month's data without opening a session
///
/// Budgets are process-wide, so past months are reported against the
/// current budget table.
pub fn load_month<R: Repository>(repo: &R, month: MonthId) -> MonthSnapshot {
    MonthSnapshot {
        month,
        transactions: repo.load_transactions(month),
        budgets: repo.load_budgets(),
    }
}

pub struct BudgetSession<R: Repository> {
    repo: R,
    catalog: Catalog,
    clock: Box<dyn Clock>,
    audit: Option<AuditLogger>,
    month: MonthId,
    transactions: Vec<Transaction>,
    budgets: Budgets,
    previous_month: Option<MonthId>,
}

impl<R: Repository> BudgetSession<R> {
    /// Load the current month and record it as seen
    ///
    /// When the last seen month differs from today's month the session
    /// starts on the new month's (normally empty) transaction list; earlier
    /// months stay untouched in storage.
    pub fn open(repo: R, catalog: Catalog, clock: impl Clock + 'static) -> Self {
        let month = MonthId::current(&clock);
        let last_seen = repo.last_seen_month();

        let previous_month = match last_seen {
            Some(last) if last != month => {
                info!(from = %last, to = %month, "new month detected, starting fresh");
                Some(last)
            }
            _ => None,
        };

        let transactions = repo.load_transactions(month);
        let budgets = repo.load_budgets();
        debug!(%month, count = transactions.len(), "session opened");

        if let Err(e) = repo.mark_seen(month) {
            warn!(error = %e, "failed to record last seen month");
        }

        Self {
            repo,
            catalog,
            clock: Box::new(clock),
            audit: None,
            month,
            transactions,
            budgets,
            previous_month,
        }
    }

    /// Record every mutation in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn month(&self) -> MonthId {
        self.month
    }

    /// Today according to the session clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The month seen before this session, when it rolled over
    pub fn previous_month(&self) -> Option<MonthId> {
        self.previous_month
    }

    /// Newest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn summary(&self) -> MonthSummary {
        MonthSummary::compute(&self.transactions, &self.budgets)
    }

    pub fn snapshot(&self) -> MonthSnapshot {
        MonthSnapshot {
            month: self.month,
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
        }
    }

    /// Snapshot of `month`, served from memory when it is the active month
    pub fn month_snapshot(&self, month: MonthId) -> MonthSnapshot {
        if month == self.month {
            self.snapshot()
        } else {
            load_month(&self.repo, month)
        }
    }

    /// Validate the draft and prepend the new transaction
    ///
    /// The transaction joins the active month's list whatever its date.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> ZbbResult<Transaction> {
        if draft.kind == TransactionType::Debt && !self.catalog.tracks_debt() {
            return Err(ZbbError::Validation(
                "Debt tracking is disabled; enable it with `zbb config --debt-tracking true`"
                    .into(),
            ));
        }

        let id = TransactionId::next_after(
            self.clock.now_millis(),
            self.transactions.iter().map(|t| &t.id),
        );
        let txn = draft.into_transaction(id, &self.catalog)?;

        if !self.month.contains(txn.date) {
            debug!(date = %txn.date, month = %self.month, "transaction dated outside the active month");
        }

        self.transactions.insert(0, txn.clone());
        self.persist_transactions();
        self.record(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        ));

        Ok(txn)
    }

    /// Remove a transaction; unknown ids leave the list untouched
    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        let Some(index) = self.transactions.iter().position(|t| t.id == id) else {
            debug!(%id, "delete ignored, no such transaction");
            return false;
        };

        let removed = self.transactions.remove(index);
        self.persist_transactions();
        self.record(AuditEntry::delete(
            EntityType::Transaction,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        ));

        true
    }

    /// Clear the active month's transactions, keeping budgets
    ///
    /// Returns how many transactions were removed.
    pub fn reset_month(&mut self) -> usize {
        let cleared = std::mem::take(&mut self.transactions);
        self.persist_transactions();
        self.record(AuditEntry::reset(transactions_key(self.month), &cleared));
        info!(month = %self.month, count = cleared.len(), "month reset");
        cleared.len()
    }

    /// Allocate `amount` to an expense category, returning the previous value
    pub fn set_budget(&mut self, category: &str, amount: Money) -> ZbbResult<Money> {
        let category = self
            .catalog
            .find(category)
            .ok_or_else(|| ZbbError::category_not_found(category.trim()))?;

        if category.group().is_none() {
            return Err(ZbbError::Validation(format!(
                "'{}' is not an expense category and cannot be budgeted",
                category.name()
            )));
        }

        let id = category.id().clone();
        let name = category.name().to_string();
        let previous = self.budgets.set(id.clone(), amount)?.unwrap_or_default();

        if let Err(e) = self.repo.save_budgets(&self.budgets) {
            warn!(error = %e, "failed to persist budgets");
        }
        self.record(AuditEntry::update(
            EntityType::Budget,
            id.as_str(),
            Some(name),
            &previous,
            &amount,
        ));

        Ok(previous)
    }

    fn persist_transactions(&self) {
        if let Err(e) = self.repo.save_transactions(self.month, &self.transactions) {
            warn!(month = %self.month, error = %e, "failed to persist transactions");
        }
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
