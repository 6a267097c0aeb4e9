//! In-memory aggregation of expenses.

use std::cmp::Ordering;
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::Gasto;

/// Category used for expenses without a `tipo`.
pub const DEFAULT_CATEGORY: &str = "outros";

/// How many of the largest expenses a summary keeps.
pub const TOP_EXPENSES: usize = 5;

/// Totals for a set of expenses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSummary {
    /// Number of expenses aggregated.
    pub qtd_lancamentos: usize,
    /// Sum of all amounts.
    pub total: f64,
    /// Summed amount per category, in the order categories first appear.
    pub por_tipo: IndexMap<String, f64>,
    /// Largest expenses, highest first.
    pub top5: Vec<Gasto>,
}

impl ExpenseSummary {
    /// Summary of no expenses.
    pub fn empty() -> Self {
        Self {
            qtd_lancamentos: 0,
            total: 0.0,
            por_tipo: IndexMap::new(),
            top5: Vec::new(),
        }
    }

    /// Aggregates `expenses`.
    ///
    /// `fold_category` turns a stored category into its grouping key, so
    /// callers decide whether `"Elétrica"` and `"eletrica"` share a bucket.
    pub fn from_expenses<F>(expenses: &[Gasto], fold_category: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let mut total = 0.0;
        let mut por_tipo: IndexMap<String, f64> = IndexMap::new();

        for gasto in expenses {
            let amount = gasto.amount();
            total += amount;
            *por_tipo.entry(fold_category(gasto.category())).or_insert(0.0) += amount;
        }

        // Stable sort keeps store order for equal amounts.
        let mut top5 = expenses.to_vec();
        top5.sort_by(|a, b| {
            b.amount()
                .partial_cmp(&a.amount())
                .unwrap_or(Ordering::Equal)
        });
        top5.truncate(TOP_EXPENSES);

        Self {
            qtd_lancamentos: expenses.len(),
            total,
            por_tipo,
            top5,
        }
    }

    /// The `n` categories with the highest totals, highest first. Equal
    /// totals keep first-appearance order.
    pub fn top_categories(&self, n: usize) -> Vec<(&str, f64)> {
        let mut categories: Vec<(&str, f64)> = self
            .por_tipo
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        categories.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        categories.truncate(n);
        categories
    }
}
