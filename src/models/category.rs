//! Category reference data
//!
//! Categories are static: they are defined in code and never mutated at
//! runtime. Expense categories belong to one of the three 50/30/20 groups;
//! income and debt categories carry no group.

use std::fmt;

use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Categories whose expenses count as "paying yourself first"
pub const PAY_YOURSELF_FIRST: [&str; 2] = ["saving_fund", "debt_payoff"];

/// The three allocation groups of the 50/30/20 method
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExpenseGroup {
    Savings,
    Needs,
    Wants,
}

impl ExpenseGroup {
    /// All groups in display and export order
    pub fn all() -> &'static [Self] {
        &[Self::Savings, Self::Needs, Self::Wants]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Savings => "Tiết Kiệm (20%)",
            Self::Needs => "Thiết Yếu (50%)",
            Self::Wants => "Giải Trí (30%)",
        }
    }
}

impl fmt::Display for ExpenseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A category, shaped by the kind of transaction it classifies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Income { id: CategoryId, name: String },
    Expense {
        id: CategoryId,
        name: String,
        group: ExpenseGroup,
    },
    Debt { id: CategoryId, name: String },
}

impl Category {
    fn income(id: &str, name: &str) -> Self {
        Self::Income {
            id: CategoryId::from(id),
            name: name.to_string(),
        }
    }

    fn expense(id: &str, name: &str, group: ExpenseGroup) -> Self {
        Self::Expense {
            id: CategoryId::from(id),
            name: name.to_string(),
            group,
        }
    }

    fn debt(id: &str, name: &str) -> Self {
        Self::Debt {
            id: CategoryId::from(id),
            name: name.to_string(),
        }
    }

    pub fn id(&self) -> &CategoryId {
        match self {
            Self::Income { id, .. } | Self::Expense { id, .. } | Self::Debt { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Income { name, .. } | Self::Expense { name, .. } | Self::Debt { name, .. } => {
                name
            }
        }
    }

    /// The group, for expense categories only
    pub fn group(&self) -> Option<ExpenseGroup> {
        match self {
            Self::Expense { group, .. } => Some(*group),
            _ => None,
        }
    }

    /// The transaction type this category is valid for
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Income { .. } => TransactionType::Income,
            Self::Expense { .. } => TransactionType::Expense,
            Self::Debt { .. } => TransactionType::Debt,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The immutable set of categories available to a budget
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Income, Savings, Needs and Wants categories
    pub fn standard() -> Self {
        use ExpenseGroup::{Needs, Savings, Wants};

        Self {
            categories: vec![
                Category::income("salary", "Lương chính"),
                Category::income("bonus", "Thưởng/Khác"),
                Category::expense("saving_fund", "Quỹ Tiết kiệm", Savings),
                Category::expense("debt_payoff", "Trả nợ gốc", Savings),
                Category::expense("rent", "Nhà ở (Mỹ Tho)", Needs),
                Category::expense("utilities", "Điện/Nước/Internet", Needs),
                Category::expense("groceries", "Đi chợ/Siêu thị", Needs),
                Category::expense("transport", "Xăng xe", Needs),
                Category::expense("dining_out", "Ăn ngoài/Cà phê", Wants),
                Category::expense("health", "Gym/Yoga", Wants),
                Category::expense("entertainment", "Giải trí (Xem phim, Du lịch)", Wants),
                Category::expense("shopping", "Mua sắm cá nhân", Wants),
            ],
        }
    }

    /// The standard catalog plus debt categories
    pub fn extended() -> Self {
        let mut catalog = Self::standard();
        catalog.categories.extend([
            Category::debt("credit_card_debt", "Nợ thẻ tín dụng"),
            Category::debt("bank_loan", "Vay ngân hàng"),
            Category::debt("personal_loan", "Vay cá nhân"),
        ]);
        catalog
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id().as_str() == id)
    }

    /// Find a category by id or case-insensitive display name
    pub fn find(&self, identifier: &str) -> Option<&Category> {
        let identifier = identifier.trim();
        self.get(identifier).or_else(|| {
            let lower = identifier.to_lowercase();
            self.categories
                .iter()
                .find(|c| c.name().to_lowercase() == lower)
        })
    }

    /// Categories valid for a transaction type, in definition order
    pub fn for_type(&self, kind: TransactionType) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.transaction_type() == kind)
            .collect()
    }

    /// Expense categories in a single group
    pub fn in_group(&self, group: ExpenseGroup) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.group() == Some(group))
            .collect()
    }

    /// Expense categories ordered Savings, Needs, Wants
    pub fn expense_categories(&self) -> Vec<&Category> {
        ExpenseGroup::all()
            .iter()
            .flat_map(|group| self.in_group(*group))
            .collect()
    }

    /// Whether `id` names a category belonging to the set for `kind`
    pub fn accepts(&self, kind: TransactionType, id: &CategoryId) -> bool {
        self.get(id.as_str())
            .is_some_and(|c| c.transaction_type() == kind)
    }

    /// Display name for an id, falling back to the raw id for unknown ones
    pub fn display_name<'a>(&'a self, id: &'a CategoryId) -> &'a str {
        self.get(id.as_str()).map(Category::name).unwrap_or(id.as_str())
    }

    /// Whether the extended (debt) variant is active
    pub fn tracks_debt(&self) -> bool {
        self.categories
            .iter()
            .any(|c| matches!(c, Category::Debt { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_shape() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.for_type(TransactionType::Income).len(), 2);
        assert_eq!(catalog.for_type(TransactionType::Expense).len(), 10);
        assert!(catalog.for_type(TransactionType::Debt).is_empty());
        assert!(!catalog.tracks_debt());
    }

    #[test]
    fn test_extended_catalog_adds_debt() {
        let catalog = Catalog::extended();
        assert_eq!(catalog.for_type(TransactionType::Debt).len(), 3);
        assert!(catalog.tracks_debt());
        assert_eq!(catalog.expense_categories().len(), 10);
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::extended();
        let mut ids: Vec<_> = catalog.all().iter().map(|c| c.id().as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.all().len());
    }

    #[test]
    fn test_expense_categories_in_group_order() {
        let catalog = Catalog::standard();
        let groups: Vec<_> = catalog
            .expense_categories()
            .iter()
            .filter_map(|c| c.group())
            .collect();
        let mut sorted = groups.clone();
        sorted.sort();
        assert_eq!(groups, sorted);
        assert_eq!(catalog.expense_categories()[0].id().as_str(), "saving_fund");
    }

    #[test]
    fn test_accepts_checks_type() {
        let catalog = Catalog::standard();
        assert!(catalog.accepts(TransactionType::Income, &"salary".into()));
        assert!(!catalog.accepts(TransactionType::Expense, &"salary".into()));
        assert!(catalog.accepts(TransactionType::Expense, &"groceries".into()));
        assert!(!catalog.accepts(TransactionType::Expense, &"unknown".into()));
    }

    #[test]
    fn test_find_by_id_or_name() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.find("rent").unwrap().name(), "Nhà ở (Mỹ Tho)");
        assert_eq!(catalog.find("gym/yoga").unwrap().id().as_str(), "health");
        assert!(catalog.find("nothing").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let catalog = Catalog::standard();
        let known = CategoryId::from("groceries");
        let unknown = CategoryId::from("legacy_cat");
        assert_eq!(catalog.display_name(&known), "Đi chợ/Siêu thị");
        assert_eq!(catalog.display_name(&unknown), "legacy_cat");
    }

    #[test]
    fn test_pay_yourself_first_are_savings() {
        let catalog = Catalog::standard();
        for id in PAY_YOURSELF_FIRST {
            assert_eq!(catalog.get(id).unwrap().group(), Some(ExpenseGroup::Savings));
        }
    }
}
