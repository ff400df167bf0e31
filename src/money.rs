//! Fixed-point monetary amounts.
//!
//! Amounts are held as [Decimal]s with two decimal places and stored in the
//! database as an integer number of cents, so sums never drift the way
//! floating point sums do.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::Error;

/// The largest amount a single transaction may hold.
pub fn max_amount() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// A strictly positive transaction amount with two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse a user supplied amount.
    ///
    /// Surrounding whitespace is ignored and the value is rounded to two
    /// decimal places, with halves rounded away from zero.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] if `raw` is not a number, is not
    /// positive after rounding, or is larger than [max_amount].
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Amount is required.".to_owned()));
        }

        let value = Decimal::from_str(trimmed)
            .map_err(|_| Error::InvalidInput(format!("\"{trimmed}\" is not a valid amount.")))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        if value <= Decimal::ZERO {
            return Err(Error::InvalidInput(
                "Amount must be greater than zero.".to_owned(),
            ));
        }

        if value > max_amount() {
            return Err(Error::InvalidInput(
                "Amount must be at most 99,999,999.99.".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Create an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The amount as a whole number of cents.
    pub fn cents(&self) -> i64 {
        let mut value = self.0;
        value.rescale(2);

        // Amounts are bounded by `max_amount` so the mantissa always fits.
        value.mantissa().to_i64().unwrap_or(i64::MAX)
    }

    /// The amount as a decimal number.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.cents().into())
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Amount::from_cents)
    }
}

/// Convert a sum of cents, e.g. from a SQL aggregate, into a decimal.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::Error;

    use super::Amount;

    #[test]
    fn parses_plain_amount() {
        let amount = Amount::parse("12.5").unwrap();

        assert_eq!(amount.cents(), 1250);
        assert_eq!(amount.to_string(), "12.50");
    }

    #[test]
    fn ignores_surrounding_whitespace() {
        assert_eq!(Amount::parse(" 3 ").unwrap().cents(), 300);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(Amount::parse("0.005").unwrap().cents(), 1);
        assert_eq!(Amount::parse("2.675").unwrap().cents(), 268);
        assert_eq!(Amount::parse("1.004").unwrap().cents(), 100);
    }

    #[test]
    fn rejects_zero_and_negative() {
        assert!(matches!(Amount::parse("0"), Err(Error::InvalidInput(_))));
        assert!(matches!(Amount::parse("-5"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_amount_that_rounds_to_zero() {
        assert!(matches!(Amount::parse("0.004"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(matches!(Amount::parse("abc"), Err(Error::InvalidInput(_))));
        assert!(matches!(Amount::parse(""), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn accepts_largest_amount() {
        let amount = Amount::parse("99999999.99").unwrap();

        assert_eq!(amount.cents(), 9_999_999_999);
    }

    #[test]
    fn rejects_amount_over_limit() {
        assert!(matches!(
            Amount::parse("100000000"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn cents_conversion_is_exact() {
        let amount = Amount::from_cents(10);

        assert_eq!(amount.value(), Decimal::new(10, 2));
        assert_eq!(amount.to_string(), "0.10");
    }
}
