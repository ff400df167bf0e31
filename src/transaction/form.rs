//! The transaction form shared by the dashboard and the edit transaction
//! page, and the validation of its fields.

use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    Error,
    auth::UserID,
    category::{Category, get_category},
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    kind::Kind,
    money::Amount,
    transaction::{NewTransaction, Transaction},
    wallet::{Wallet, get_wallet},
};

/// The raw fields of the transaction form.
///
/// Every field is kept as submitted so that an invalid form can be shown
/// again with the user's input intact.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransactionForm {
    pub wallet_id: String,
    pub description: String,
    pub amount: String,
    pub date: String,
    /// Either "income" or "expense".
    pub kind: String,
    pub category_id: String,
}

impl TransactionForm {
    /// An empty expense form dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            date: today.to_string(),
            kind: Kind::Expense.as_str().to_owned(),
            ..Default::default()
        }
    }

    /// Check every field and resolve the wallet and category for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidInput] describing the first invalid field.
    /// A wallet or category that belongs to another user is reported the
    /// same way as one that does not exist.
    pub fn validate(
        &self,
        user_id: UserID,
        connection: &Connection,
    ) -> Result<NewTransaction, Error> {
        let wallet_id = parse_id(&self.wallet_id, "Choose a wallet.")?;
        let wallet = get_wallet(wallet_id, user_id, connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidInput("Choose one of your wallets.".to_owned()),
            error => error,
        })?;

        let amount = Amount::parse(&self.amount)?;
        let date = parse_date(&self.date)?;
        let kind: Kind = self.kind.parse()?;

        let category_id = parse_id(&self.category_id, "Choose a category.")?;
        let category =
            get_category(category_id, user_id, connection).map_err(|error| match error {
                Error::NotFound => {
                    Error::InvalidInput("Choose one of your categories.".to_owned())
                }
                error => error,
            })?;

        let description = self.description.trim();
        let description = (!description.is_empty()).then(|| description.to_owned());

        Ok(NewTransaction {
            wallet_id: wallet.id,
            description,
            amount,
            date,
            kind,
            category_id: Some(category.id),
        })
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(transaction: &Transaction) -> Self {
        Self {
            wallet_id: transaction.wallet_id.to_string(),
            description: transaction.description.clone().unwrap_or_default(),
            amount: transaction.amount.to_string(),
            date: transaction.date.to_string(),
            kind: transaction.kind.as_str().to_owned(),
            category_id: transaction
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
        }
    }
}

fn parse_id(raw: &str, missing_message: &str) -> Result<i64, Error> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidInput(missing_message.to_owned()))
}

/// Parse an ISO 8601 calendar date, e.g. "2024-01-31".
pub fn parse_date(raw: &str) -> Result<Date, Error> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidInput("Date is required.".to_owned()));
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]")).map_err(|_| {
        Error::InvalidInput(format!(
            "\"{trimmed}\" is not a valid date, use the format YYYY-MM-DD."
        ))
    })
}

/// Renders the inputs of the transaction form, without the surrounding form
/// element or submit button.
///
/// Categories are grouped by kind in the category drop-down.
pub fn transaction_form_fields(
    form: &TransactionForm,
    wallets: &[Wallet],
    categories: &[Category],
) -> Markup {
    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                @for kind in Kind::ALL {
                    div class="flex items-center gap-3"
                    {
                        input
                            name="kind"
                            id={ "transaction-kind-" (kind) }
                            type="radio"
                            value=(kind)
                            checked[form.kind == kind.as_str()]
                            required
                            class=(FORM_RADIO_INPUT_STYLE);

                        label for={ "transaction-kind-" (kind) } class=(FORM_RADIO_LABEL_STYLE)
                        {
                            (kind.label())
                        }
                    }
                }
            }
        }

        div
        {
            label for="wallet_id" class=(FORM_LABEL_STYLE) { "Wallet" }

            select name="wallet_id" id="wallet_id" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a wallet" }

                @for wallet in wallets {
                    option
                        value=(wallet.id)
                        selected[form.wallet_id == wallet.id.to_string()]
                    {
                        (wallet.name)
                    }
                }
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0.01"
                max="99999999.99"
                placeholder="0.00"
                required
                value=(form.amount)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(form.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=(form.description)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

            select name="category_id" id="category_id" required class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for kind in Kind::ALL {
                    optgroup label=(kind.label())
                    {
                        @for category in categories.iter().filter(|category| category.kind == kind) {
                            option
                                value=(category.id)
                                selected[form.category_id == category.id.to_string()]
                            {
                                (category.name)
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod validate_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        auth::UserID,
        category::{CategoryId, CategoryName, create_category},
        db::initialize,
        kind::Kind,
        money::Amount,
        test_utils::must_create_user,
        wallet::{WalletId, WalletName, create_wallet},
    };

    use super::{TransactionForm, parse_date};

    struct Fixture {
        connection: Connection,
        user_id: UserID,
        wallet_id: WalletId,
        category_id: CategoryId,
    }

    fn fixture() -> Fixture {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user_id = must_create_user("alice", &connection);
        let wallet_id = create_wallet(WalletName::new_unchecked("Cash"), user_id, &connection)
            .unwrap()
            .id;
        let category_id = create_category(
            CategoryName::new_unchecked("Groceries"),
            Kind::Expense,
            user_id,
            &connection,
        )
        .unwrap()
        .id;

        Fixture {
            connection,
            user_id,
            wallet_id,
            category_id,
        }
    }

    fn valid_form(fixture: &Fixture) -> TransactionForm {
        TransactionForm {
            wallet_id: fixture.wallet_id.to_string(),
            description: "  Milk ".to_owned(),
            amount: "3.2".to_owned(),
            date: "2024-01-05".to_owned(),
            kind: "expense".to_owned(),
            category_id: fixture.category_id.to_string(),
        }
    }

    #[test]
    fn valid_form_produces_transaction() {
        let fixture = fixture();

        let got = valid_form(&fixture)
            .validate(fixture.user_id, &fixture.connection)
            .unwrap();

        assert_eq!(got.wallet_id, fixture.wallet_id);
        assert_eq!(got.description.as_deref(), Some("Milk"));
        assert_eq!(got.amount, Amount::parse("3.20").unwrap());
        assert_eq!(got.date, date!(2024 - 01 - 05));
        assert_eq!(got.kind, Kind::Expense);
        assert_eq!(got.category_id, Some(fixture.category_id));
    }

    #[test]
    fn blank_description_becomes_none() {
        let fixture = fixture();
        let form = TransactionForm {
            description: "   ".to_owned(),
            ..valid_form(&fixture)
        };

        let got = form.validate(fixture.user_id, &fixture.connection).unwrap();

        assert_eq!(got.description, None);
    }

    #[test]
    fn missing_fields_are_invalid_input() {
        let fixture = fixture();
        let cases = [
            (
                TransactionForm {
                    wallet_id: String::new(),
                    ..valid_form(&fixture)
                },
                "Choose a wallet.",
            ),
            (
                TransactionForm {
                    amount: String::new(),
                    ..valid_form(&fixture)
                },
                "Amount is required.",
            ),
            (
                TransactionForm {
                    date: String::new(),
                    ..valid_form(&fixture)
                },
                "Date is required.",
            ),
            (
                TransactionForm {
                    kind: String::new(),
                    ..valid_form(&fixture)
                },
                "Type must be either income or expense.",
            ),
            (
                TransactionForm {
                    category_id: String::new(),
                    ..valid_form(&fixture)
                },
                "Choose a category.",
            ),
        ];

        for (form, want_message) in cases {
            let got = form.validate(fixture.user_id, &fixture.connection);

            assert_eq!(got, Err(Error::InvalidInput(want_message.to_owned())));
        }
    }

    #[test]
    fn foreign_wallet_and_category_are_invalid_input() {
        let fixture = fixture();
        let bob = must_create_user("bob", &fixture.connection);
        let bob_wallet = create_wallet(WalletName::new_unchecked("Bank"), bob, &fixture.connection)
            .unwrap();
        let bob_category = create_category(
            CategoryName::new_unchecked("Rent"),
            Kind::Expense,
            bob,
            &fixture.connection,
        )
        .unwrap();

        let wallet_result = TransactionForm {
            wallet_id: bob_wallet.id.to_string(),
            ..valid_form(&fixture)
        }
        .validate(fixture.user_id, &fixture.connection);
        let category_result = TransactionForm {
            category_id: bob_category.id.to_string(),
            ..valid_form(&fixture)
        }
        .validate(fixture.user_id, &fixture.connection);

        assert_eq!(
            wallet_result,
            Err(Error::InvalidInput("Choose one of your wallets.".to_owned()))
        );
        assert_eq!(
            category_result,
            Err(Error::InvalidInput(
                "Choose one of your categories.".to_owned()
            ))
        );
    }

    #[test]
    fn parse_date_rejects_malformed_dates() {
        assert_eq!(parse_date("2024-01-31"), Ok(date!(2024 - 01 - 31)));
        assert!(matches!(parse_date("31/01/2024"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_date("2024-02-30"), Err(Error::InvalidInput(_))));
    }
}
