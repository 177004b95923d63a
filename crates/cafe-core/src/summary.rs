//! Day totals shown above the transaction list

use cafe_store::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::filter::{sum_amounts, sum_tips};

/// Totals over a day's feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Sum of paid amounts
    pub total_revenue: Decimal,
    /// Sum of paid tips
    pub total_tips: Decimal,
    /// Every record of the day, paid or not
    pub customer_count: usize,
    /// Records still unpaid
    pub unpaid_count: usize,
}

impl DailySummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let paid: Vec<&Transaction> = transactions.iter().filter(|t| t.is_paid).collect();

        Self {
            total_revenue: sum_amounts(paid.iter().copied()),
            total_tips: sum_tips(paid.iter().copied()),
            customer_count: transactions.len(),
            unpaid_count: transactions.len() - paid.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tx(amount: i64, tip: i64, is_paid: bool) -> Transaction {
        let now = Utc::now();
        Transaction {
            id: format!("{}-{}", amount, tip),
            customer_name: "Guest".to_string(),
            amount: Decimal::from(amount),
            tip: Decimal::from(tip),
            is_paid,
            transaction_date: now.date_naive(),
            created_at: now,
        }
    }

    #[test]
    fn test_summary_counts_unpaid_but_sums_paid() {
        let summary = DailySummary::from_transactions(&[
            tx(50, 5, true),
            tx(30, 0, false),
            tx(12, 3, true),
        ]);
        assert_eq!(summary.total_revenue, Decimal::from(62));
        assert_eq!(summary.total_tips, Decimal::from(8));
        assert_eq!(summary.customer_count, 3);
        assert_eq!(summary.unpaid_count, 1);
    }

    #[test]
    fn test_empty_day() {
        assert_eq!(DailySummary::from_transactions(&[]), DailySummary::default());
    }
}
