//! Status and date-range filtering with revenue/tip aggregation

use cafe_store::Transaction;
use chrono::TimeZone;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::time::{parse_date, parse_time, DateTimeRange};

/// Paid-status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Paid,
    Unpaid,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    /// Whether a record passes this filter
    pub fn accepts(&self, tx: &Transaction) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Paid => tx.is_paid,
            StatusFilter::Unpaid => !tx.is_paid,
        }
    }

    /// Which records the sums cover: unpaid ones under `Unpaid`, paid ones otherwise
    pub fn aggregate_kind(&self) -> AggregateKind {
        match self {
            StatusFilter::Unpaid => AggregateKind::UnpaidAmount,
            StatusFilter::All | StatusFilter::Paid => AggregateKind::Revenue,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            "paid" => Ok(StatusFilter::Paid),
            "unpaid" => Ok(StatusFilter::Unpaid),
            _ => Err(format!("Invalid status filter: {}", s)),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Paid => write!(f, "paid"),
            StatusFilter::Unpaid => write!(f, "unpaid"),
        }
    }
}

/// What the two sums of a filtered view represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateKind {
    /// Sums over paid records
    Revenue,
    /// Sums over unpaid records
    UnpaidAmount,
}

impl AggregateKind {
    /// Whether a record contributes to the sums
    pub fn includes(&self, tx: &Transaction) -> bool {
        match self {
            AggregateKind::Revenue => tx.is_paid,
            AggregateKind::UnpaidAmount => !tx.is_paid,
        }
    }

    /// Label shown next to the amount sum
    pub fn label(&self) -> &'static str {
        match self {
            AggregateKind::Revenue => "Revenue",
            AggregateKind::UnpaidAmount => "Unpaid Amount",
        }
    }
}

/// Active status filter and date/time range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub range: DateTimeRange,
}

/// Filtered records plus their sums
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    /// Records that passed, in input order
    pub transactions: Vec<Transaction>,
    /// Sum of `amount` over the aggregated subset
    pub amount_total: Decimal,
    /// Sum of `tip` over the aggregated subset
    pub tip_total: Decimal,
    /// Which subset the sums cover
    pub aggregate: AggregateKind,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl FilterCriteria {
    pub fn new(status: StatusFilter, range: DateTimeRange) -> Self {
        Self { status, range }
    }

    /// Whether a record passes both the status and the date/time filter
    pub fn accepts_in<Tz: TimeZone>(&self, tx: &Transaction, tz: &Tz) -> bool {
        if !self.status.accepts(tx) {
            return false;
        }
        !self.range.is_active() || self.range.contains_in(&tx.created_at, tz)
    }

    /// Filter and aggregate, reading date/time bounds in `tz`
    pub fn apply_in<Tz: TimeZone>(&self, transactions: &[Transaction], tz: &Tz) -> FilteredView {
        let filtered: Vec<Transaction> = transactions
            .iter()
            .filter(|t| self.accepts_in(t, tz))
            .cloned()
            .collect();

        let aggregate = self.status.aggregate_kind();
        let counted = || filtered.iter().filter(|t| aggregate.includes(t));

        FilteredView {
            amount_total: sum_amounts(counted()),
            tip_total: sum_tips(counted()),
            aggregate,
            transactions: filtered,
        }
    }
}

/// Filter inputs as typed by the operator; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl FilterParams {
    /// Parse every present field and update `criteria`.
    ///
    /// Nothing is changed if any field fails to parse.
    pub fn apply_to(&self, criteria: &FilterCriteria) -> CoreResult<FilterCriteria> {
        let mut next = criteria.clone();

        if let Some(ref status) = self.status {
            next.status = status
                .parse()
                .map_err(|message| CoreError::InvalidFilter { message })?;
        }
        if let Some(ref value) = self.start_date {
            next.range.start_date = parse_date("start_date", value)?;
        }
        if let Some(ref value) = self.end_date {
            next.range.end_date = parse_date("end_date", value)?;
        }
        if let Some(ref value) = self.start_time {
            next.range.start_time = parse_time("start_time", value)?;
        }
        if let Some(ref value) = self.end_time {
            next.range.end_time = parse_time("end_time", value)?;
        }

        Ok(next)
    }
}

/// Exact sum of `amount`, saturating at the `Decimal` range
pub fn sum_amounts<'a>(records: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    saturating_sum(records.into_iter().map(|t| t.amount))
}

/// Exact sum of `tip`, saturating at the `Decimal` range
pub fn sum_tips<'a>(records: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    saturating_sum(records.into_iter().map(|t| t.tip))
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}
