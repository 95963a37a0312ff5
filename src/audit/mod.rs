//! Audit logging
//!
//! Every mutation of the budget data (transaction create and delete, budget
//! updates, month resets) is appended to a line-delimited JSON log next to
//! the data directory.
//!
//! ```rust,ignore
//! use zbb_cli::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.to_string(),
//!     Some(txn.description.clone()),
//!     &txn,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
