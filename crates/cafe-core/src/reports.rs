//! Display-ready views with formatted money, times and dates

use cafe_config::CurrencyConfig;
use cafe_store::Transaction;
use cafe_utils::{format_date, format_money, format_time_in};
use chrono::TimeZone;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::filter::{FilterCriteria, FilteredView};
use crate::lookup::CustomerLookup;
use crate::summary::DailySummary;

/// Currency code plus decimal places
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub code: String,
    pub decimal_places: u32,
}

impl MoneyFormat {
    pub fn format(&self, amount: Decimal) -> String {
        format_money(amount, &self.code, self.decimal_places)
    }
}

impl From<&CurrencyConfig> for MoneyFormat {
    fn from(config: &CurrencyConfig) -> Self {
        Self {
            code: config.code.clone(),
            decimal_places: config.decimal_places,
        }
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        MoneyFormat::from(&CurrencyConfig::default())
    }
}

/// One record as listed
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub customer_name: String,
    pub amount: Decimal,
    pub tip: Decimal,
    pub amount_display: String,
    /// Absent when no tip was left
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip_display: Option<String>,
    pub is_paid: bool,
    pub status: &'static str,
    pub time: String,
    pub date: String,
}

impl TransactionRow {
    pub fn new_in<Tz: TimeZone>(tx: &Transaction, money: &MoneyFormat, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: tx.id.clone(),
            customer_name: tx.customer_name.clone(),
            amount: tx.amount,
            tip: tx.tip,
            amount_display: money.format(tx.amount),
            tip_display: (tx.tip > Decimal::ZERO).then(|| money.format(tx.tip)),
            is_paid: tx.is_paid,
            status: if tx.is_paid { "Paid" } else { "Unpaid" },
            time: format_time_in(&tx.created_at, tz),
            date: format_date(&tx.transaction_date),
        }
    }
}

fn rows_in<Tz: TimeZone>(records: &[Transaction], money: &MoneyFormat, tz: &Tz) -> Vec<TransactionRow>
where
    Tz::Offset: std::fmt::Display,
{
    records
        .iter()
        .map(|t| TransactionRow::new_in(t, money, tz))
        .collect()
}

/// Filtered list with its sums and the active filter
#[derive(Debug, Clone, Serialize)]
pub struct FilteredReport {
    pub criteria: FilterCriteria,
    pub range_description: String,
    /// "Revenue" or "Unpaid Amount"
    pub aggregate_label: &'static str,
    pub amount_total: String,
    pub tip_total: String,
    pub count: usize,
    pub transactions: Vec<TransactionRow>,
}

impl FilteredReport {
    pub fn new_in<Tz: TimeZone>(
        criteria: &FilterCriteria,
        view: &FilteredView,
        money: &MoneyFormat,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            criteria: criteria.clone(),
            range_description: criteria.range.description(),
            aggregate_label: view.aggregate.label(),
            amount_total: money.format(view.amount_total),
            tip_total: money.format(view.tip_total),
            count: view.transactions.len(),
            transactions: rows_in(&view.transactions, money, tz),
        }
    }
}

/// Day totals with formatted figures
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub total_revenue: String,
    pub total_tips: String,
    pub customer_count: usize,
    pub unpaid_count: usize,
}

impl SummaryReport {
    pub fn new(summary: &DailySummary, money: &MoneyFormat) -> Self {
        Self {
            total_revenue: money.format(summary.total_revenue),
            total_tips: money.format(summary.total_tips),
            customer_count: summary.customer_count,
            unpaid_count: summary.unpaid_count,
        }
    }
}

/// Search results with the outstanding balance
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub query: String,
    pub has_searched: bool,
    pub show_empty_state: bool,
    pub outstanding_balance: String,
    pub results: Vec<TransactionRow>,
}

impl LookupReport {
    pub fn new_in<Tz: TimeZone>(lookup: &CustomerLookup, money: &MoneyFormat, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            query: lookup.query.clone(),
            has_searched: lookup.has_searched,
            show_empty_state: lookup.show_empty_state(),
            outstanding_balance: money.format(lookup.outstanding_balance()),
            results: rows_in(&lookup.results, money, tz),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use crate::testing::record;
    use crate::time::DateTimeRange;
    use chrono::Utc;

    fn sample() -> Vec<Transaction> {
        let mut tipped = record("1", "Sara", 50, true, Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap());
        tipped.tip = Decimal::new(55, 1);
        vec![
            record("2", "Omar", 30, false, Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap()),
            tipped,
        ]
    }

    #[test]
    fn test_row_formats() {
        let records = sample();
        let money = MoneyFormat::default();

        let row = TransactionRow::new_in(&records[1], &money, &Utc);
        assert_eq!(row.amount_display, "50.00 MAD");
        assert_eq!(row.tip_display.as_deref(), Some("5.50 MAD"));
        assert_eq!(row.time, "09:05 AM");
        assert_eq!(row.date, "May 1, 2024");
        assert_eq!(row.status, "Paid");

        let row = TransactionRow::new_in(&records[0], &money, &Utc);
        assert_eq!(row.tip_display, None);
        assert_eq!(row.time, "02:30 PM");
        assert_eq!(row.status, "Unpaid");
    }

    #[test]
    fn test_filtered_report_labels() {
        let money = MoneyFormat::default();
        let criteria = FilterCriteria::new(StatusFilter::Unpaid, DateTimeRange::default());
        let view = criteria.apply_in(&sample(), &Utc);

        let report = FilteredReport::new_in(&criteria, &view, &money, &Utc);

        assert_eq!(report.aggregate_label, "Unpaid Amount");
        assert_eq!(report.amount_total, "30.00 MAD");
        assert_eq!(report.tip_total, "0.00 MAD");
        assert_eq!(report.count, 1);
        assert_eq!(report.range_description, "All Time");
    }

    #[test]
    fn test_summary_report() {
        let money = MoneyFormat {
            code: "EUR".to_string(),
            decimal_places: 2,
        };
        let report = SummaryReport::new(&DailySummary::from_transactions(&sample()), &money);
        assert_eq!(report.total_revenue, "50.00 EUR");
        assert_eq!(report.total_tips, "5.50 EUR");
        assert_eq!(report.customer_count, 2);
        assert_eq!(report.unpaid_count, 1);
    }
}
