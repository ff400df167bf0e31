//! The date range and wallet filter for the dashboard.

use serde::Deserialize;
use time::{Date, Duration};

use crate::{
    Error,
    transaction::{TransactionQuery, parse_date},
    wallet::WalletId,
};

/// The raw dashboard query string, e.g. `?date_from=2024-01-01&wallet_id=2`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    pub date_from: String,
    pub date_to: String,
    pub wallet_id: String,
}

/// The filter applied to the dashboard's transactions and totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardFilter {
    /// The first day included, inclusive.
    pub date_from: Date,
    /// The last day included, inclusive.
    pub date_to: Date,
    /// Only show this wallet's transactions, or every wallet if `None`.
    pub wallet_id: Option<WalletId>,
}

impl DashboardFilter {
    /// The default filter: every wallet, from the first of the month to `today`.
    pub fn month_to_date(today: Date) -> Self {
        Self {
            date_from: first_of_month(today),
            date_to: today,
            wallet_id: None,
        }
    }

    /// Build the filter from the query string.
    ///
    /// Missing or empty dates fall back to [DashboardFilter::month_to_date].
    /// A `wallet_id` that is not a number is ignored.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if either date is malformed.
    pub fn from_query(query: &DashboardQuery, today: Date) -> Result<Self, Error> {
        let default = Self::month_to_date(today);

        let date_from = parse_optional_date(&query.date_from)?.unwrap_or(default.date_from);
        let date_to = parse_optional_date(&query.date_to)?.unwrap_or(default.date_to);
        let wallet_id = query.wallet_id.trim().parse().ok();

        Ok(Self {
            date_from,
            date_to,
            wallet_id,
        })
    }

    /// The query for the transactions matching this filter.
    pub fn transaction_query(&self) -> TransactionQuery {
        TransactionQuery {
            date_from: Some(self.date_from),
            date_to: Some(self.date_to),
            wallet_id: self.wallet_id,
        }
    }
}

fn parse_optional_date(raw: &str) -> Result<Option<Date>, Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    parse_date(raw).map(Some)
}

fn first_of_month(date: Date) -> Date {
    date - Duration::days(i64::from(date.day()) - 1)
}
