//! Transaction model
//!
//! A transaction records money coming in (income), going out against a
//! budget category (expense), or, in the extended variant, debt. The stored
//! JSON shape is `{id, type, category, name, amount, date, method?}`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::category::Catalog;
use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use crate::error::{ZbbError, ZbbResult};

/// Kind of transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Debt,
}

impl TransactionType {
    /// Stable lowercase key, also used as the sort key
    pub fn key(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Debt => "debt",
        }
    }

    /// Label shown in lists and exports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Thu nhập",
            Self::Expense => "Chi tiêu",
            Self::Debt => "Nợ",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = ZbbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "thu" | "thu nhập" => Ok(Self::Income),
            "expense" | "chi" | "chi tiêu" => Ok(Self::Expense),
            "debt" | "nợ" => Ok(Self::Debt),
            other => Err(ZbbError::Validation(format!(
                "Invalid transaction type: '{}'. Use income, expense or debt",
                other
            ))),
        }
    }
}

/// How a transaction was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Tiền mặt")]
    Cash,
    #[serde(rename = "Chuyển khoản")]
    BankTransfer,
    #[serde(rename = "Thẻ tín dụng")]
    CreditCard,
}

impl PaymentMethod {
    pub fn all() -> &'static [Self] {
        &[Self::Cash, Self::BankTransfer, Self::CreditCard]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cash => "Tiền mặt",
            Self::BankTransfer => "Chuyển khoản",
            Self::CreditCard => "Thẻ tín dụng",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = ZbbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "cash" | "tiền mặt" => Ok(Self::Cash),
            "transfer" | "bank-transfer" | "bank_transfer" | "chuyển khoản" => {
                Ok(Self::BankTransfer)
            }
            "credit-card" | "credit_card" | "card" | "thẻ tín dụng" => Ok(Self::CreditCard),
            _ => Err(ZbbError::Validation(format!(
                "Invalid payment method: '{}'. Use cash, transfer or credit-card",
                s.trim()
            ))),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    pub category: CategoryId,

    /// Free-text description
    #[serde(rename = "name")]
    pub description: String,

    /// Always positive; the sign comes from `kind`
    pub amount: Money,

    pub date: NaiveDate,

    /// Absent for debt transactions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<PaymentMethod>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with income positive and expense negative
    ///
    /// Debt does not net against income or expense and keeps its
    /// unsigned amount.
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Expense => -self.amount,
            TransactionType::Income | TransactionType::Debt => self.amount,
        }
    }

    /// Check the transaction against the catalog
    pub fn validate(&self, catalog: &Catalog) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.units() > Money::MAX_AMOUNT {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        if !catalog.accepts(self.kind, &self.category) {
            return Err(TransactionValidationError::CategoryMismatch {
                kind: self.kind,
                category: self.category.clone(),
            });
        }
        if self.kind == TransactionType::Debt && self.method.is_some() {
            return Err(TransactionValidationError::DebtWithMethod);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Unvalidated input from the add-transaction form
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    /// Raw amount text as typed
    pub amount: String,
    pub date: NaiveDate,
    pub method: Option<PaymentMethod>,
}

impl TransactionDraft {
    /// Validate the form input and build a transaction with the given id
    pub fn into_transaction(
        self,
        id: TransactionId,
        catalog: &Catalog,
    ) -> ZbbResult<Transaction> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(ZbbError::Validation("Description is required".into()));
        }

        let amount = Money::parse_positive(&self.amount)
            .map_err(|e| ZbbError::Validation(e.to_string()))?;

        let category = catalog
            .find(&self.category)
            .map(|c| c.id().clone())
            .ok_or_else(|| ZbbError::category_not_found(self.category.trim()))?;

        let method = match self.kind {
            TransactionType::Debt => None,
            TransactionType::Income | TransactionType::Expense => {
                Some(self.method.unwrap_or(PaymentMethod::Cash))
            }
        };

        let txn = Transaction {
            id,
            kind: self.kind,
            category,
            description,
            amount,
            date: self.date,
            method,
        };

        txn.validate(catalog)
            .map_err(|e| ZbbError::Validation(e.to_string()))?;

        Ok(txn)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionValidationError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Money),

    #[error("Amount {0} exceeds the maximum of {max}", max = Money::new(Money::MAX_AMOUNT))]
    AmountTooLarge(Money),

    #[error("Category '{category}' is not a {} category", .kind.key())]
    CategoryMismatch {
        kind: TransactionType,
        category: CategoryId,
    },

    #[error("Debt transactions have no payment method")]
    DebtWithMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn draft(kind: TransactionType, category: &str, amount: &str) -> TransactionDraft {
        TransactionDraft {
            kind,
            category: category.to_string(),
            description: "Tiền phở".to_string(),
            amount: amount.to_string(),
            date: date(),
            method: None,
        }
    }

    #[test]
    fn test_draft_builds_expense_with_default_method() {
        let catalog = Catalog::standard();
        let txn = draft(TransactionType::Expense, "groceries", "150000")
            .into_transaction(TransactionId::new(1), &catalog)
            .unwrap();

        assert_eq!(txn.amount, Money::new(150_000));
        assert_eq!(txn.method, Some(PaymentMethod::Cash));
        assert_eq!(txn.signed_amount(), Money::new(-150_000));
    }

    #[test]
    fn test_draft_accepts_category_name() {
        let catalog = Catalog::standard();
        let txn = draft(TransactionType::Income, "Lương chính", "10000000")
            .into_transaction(TransactionId::new(1), &catalog)
            .unwrap();
        assert_eq!(txn.category.as_str(), "salary");
    }

    #[test]
    fn test_draft_rejects_missing_description() {
        let catalog = Catalog::standard();
        let mut input = draft(TransactionType::Expense, "groceries", "1000");
        input.description = "   ".to_string();
        let err = input
            .into_transaction(TransactionId::new(1), &catalog)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_draft_rejects_bad_amount() {
        let catalog = Catalog::standard();
        for amount in ["", "abc", "0", "-5"] {
            let err = draft(TransactionType::Expense, "groceries", amount)
                .into_transaction(TransactionId::new(1), &catalog)
                .unwrap_err();
            assert!(err.is_validation(), "amount {:?} should be rejected", amount);
        }
    }

    #[test]
    fn test_draft_rejects_category_of_wrong_type() {
        let catalog = Catalog::standard();
        let err = draft(TransactionType::Expense, "salary", "1000")
            .into_transaction(TransactionId::new(1), &catalog)
            .unwrap_err();
        assert!(err.is_validation());

        let err = draft(TransactionType::Expense, "nope", "1000")
            .into_transaction(TransactionId::new(1), &catalog)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_debt_drops_method_and_needs_extended_catalog() {
        let mut input = draft(TransactionType::Debt, "credit_card_debt", "500000");
        input.method = Some(PaymentMethod::CreditCard);

        assert!(input
            .clone()
            .into_transaction(TransactionId::new(1), &Catalog::standard())
            .is_err());

        let txn = input
            .into_transaction(TransactionId::new(1), &Catalog::extended())
            .unwrap();
        assert_eq!(txn.method, None);
        assert_eq!(txn.signed_amount(), Money::new(500_000));
    }

    #[test]
    fn test_validate_rejects_debt_with_method() {
        let txn = Transaction {
            id: TransactionId::new(1),
            kind: TransactionType::Debt,
            category: "bank_loan".into(),
            description: "x".into(),
            amount: Money::new(1),
            date: date(),
            method: Some(PaymentMethod::Cash),
        };
        assert_eq!(
            txn.validate(&Catalog::extended()),
            Err(TransactionValidationError::DebtWithMethod)
        );
    }

    #[test]
    fn test_stored_json_shape() {
        let txn = Transaction {
            id: TransactionId::new(1_718_000_000_000),
            kind: TransactionType::Expense,
            category: "groceries".into(),
            description: "Đi chợ".into(),
            amount: Money::new(250_000),
            date: date(),
            method: Some(PaymentMethod::CreditCard),
        };

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "expense");
        assert_eq!(value["name"], "Đi chợ");
        assert_eq!(value["method"], "Thẻ tín dụng");
        assert_eq!(value["date"], "2025-06-15");
        assert_eq!(value["amount"], 250_000);

        let back: Transaction = serde_json::from_value(value).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_parse_type_and_method() {
        assert_eq!("Income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert!("gift".parse::<TransactionType>().is_err());
        assert_eq!(
            "credit-card".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CreditCard
        );
        assert_eq!("Tiền mặt".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
    }
}
