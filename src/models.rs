// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(LedgerError::validation(format!(
                "unknown category kind '{}'",
                other
            ))),
        }
    }
}

/// Direction and nature of a transaction. Amounts are always positive;
/// the kind carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TxnKind {
    Income,
    Expense,
    Transfer,
    Savings,
    SavingsWithdrawal,
    Investment,
}

impl TxnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnKind::Income => "income",
            TxnKind::Expense => "expense",
            TxnKind::Transfer => "transfer",
            TxnKind::Savings => "savings",
            TxnKind::SavingsWithdrawal => "savings-withdrawal",
            TxnKind::Investment => "investment",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "income" => Ok(TxnKind::Income),
            "expense" => Ok(TxnKind::Expense),
            "transfer" => Ok(TxnKind::Transfer),
            "savings" => Ok(TxnKind::Savings),
            "savings-withdrawal" => Ok(TxnKind::SavingsWithdrawal),
            "investment" => Ok(TxnKind::Investment),
            other => Err(LedgerError::validation(format!(
                "unknown transaction kind '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(LedgerError::validation(format!(
                "unknown budget period '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Result<Self, LedgerError> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            other => Err(LedgerError::validation(format!(
                "unknown frequency '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub category_id: Option<i64>,
    pub goal_id: Option<i64>,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Input record for `transactions::record`.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub category_id: Option<i64>,
    pub amount: Decimal,
    pub kind: TxnKind,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Category dimension of a transaction filter. `Any` places no constraint;
/// `Uncategorized` matches only NULL-category rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    Any,
    Uncategorized,
    Id(i64),
}

/// Predicate for `transactions::list` and `transactions::sum`. Date bounds
/// are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TxnFilter {
    pub category: CategoryFilter,
    pub kind: Option<TxnKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Budget with its projection populated. `spent` and `remaining` are never
/// stored; they are recomputed from the transaction log on every read, so
/// `remaining` may go negative to signal overage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category_id: Option<i64>,
    pub name: String,
    pub limit_amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub is_over_budget: bool,
}

#[derive(Debug, Clone)]
pub struct NewBudget {
    pub name: String,
    pub category_id: Option<i64>,
    pub limit_amount: Decimal,
    pub period: BudgetPeriod,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// Partial update for `budgets::update`. Nullable columns use a nested
/// Option so callers can distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default)]
pub struct BudgetPatch {
    pub name: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub limit_amount: Option<Decimal>,
    pub period: Option<BudgetPeriod>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    /// Unclamped; exceeds 100 when over-contributed.
    pub percent_complete: Decimal,
    /// Whole months until `target_date` at 30.44 days per month, 0 when the
    /// date is past or absent.
    pub months_remaining: i64,
}

#[derive(Debug, Clone, Default)]
pub struct GoalPatch {
    pub name: Option<String>,
    pub target_amount: Option<Decimal>,
    pub target_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringPayment {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub next_payment: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewRecurringPayment {
    pub name: String,
    pub amount: Decimal,
    pub category_id: Option<i64>,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct RecurringPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub category_id: Option<Option<i64>>,
    pub frequency: Option<Frequency>,
    pub end_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income_total: Decimal,
    pub expense_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub icon: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsProgress {
    pub name: String,
    pub target: Decimal,
    pub current: Decimal,
    pub remaining: Decimal,
    pub percent_complete: Decimal,
}
