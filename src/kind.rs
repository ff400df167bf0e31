//! Whether a category or transaction adds money to a wallet or takes it away.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The direction of money flow for a category or transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl Kind {
    /// Every kind, in display order.
    pub const ALL: [Kind; 2] = [Kind::Income, Kind::Expense];

    /// The lowercase form used in forms and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }

    /// The capitalised form shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Income => "Income",
            Kind::Expense => "Expense",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            _ => Err(Error::InvalidInput(
                "Type must be either income or expense.".to_owned(),
            )),
        }
    }
}

impl ToSql for Kind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for Kind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::Error;

    use super::Kind;

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("income".parse(), Ok(Kind::Income));
        assert_eq!("expense".parse(), Ok(Kind::Expense));
    }

    #[test]
    fn rejects_unknown_kind() {
        let result: Result<Kind, Error> = "transfer".parse();

        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_mixed_case() {
        let result: Result<Kind, Error> = "Income".parse();

        assert!(result.is_err());
    }

    #[test]
    fn reads_back_from_sqlite() {
        let connection = Connection::open_in_memory().unwrap();
        connection.execute("CREATE TABLE t (kind TEXT)", ()).unwrap();
        connection
            .execute("INSERT INTO t (kind) VALUES (?1)", (Kind::Expense,))
            .unwrap();

        let got: Kind = connection
            .query_row("SELECT kind FROM t", (), |row| row.get(0))
            .unwrap();

        assert_eq!(got, Kind::Expense);
    }

    #[test]
    fn invalid_stored_kind_is_an_error() {
        let connection = Connection::open_in_memory().unwrap();

        let got = connection.query_row("SELECT 'gift'", (), |row| row.get::<_, Kind>(0));

        assert!(got.is_err());
    }
}
