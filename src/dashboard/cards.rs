//! Card components for the dashboard: wallet balances, categories and the
//! forms for adding records.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    category::Category,
    dashboard::aggregation::WalletBalance,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, LINK_STYLE, edit_delete_actions,
        format_currency, name_input,
    },
    kind::Kind,
    transaction::{TransactionForm, transaction_form_fields},
    wallet::Wallet,
};

const SECTION_HEADING_STYLE: &str = "mb-4 text-lg font-semibold";

/// Renders one card per wallet with its all-time balance, followed by the
/// form for adding a wallet.
pub(super) fn wallets_section(wallet_balances: &[WalletBalance]) -> Markup {
    html! {
        section class="w-full" id="wallets"
        {
            h2 class=(SECTION_HEADING_STYLE) { "Wallets" }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4"
            {
                @for wallet in wallet_balances {
                    (wallet_card(wallet))
                }

                div class=(CARD_STYLE)
                {
                    form method="post" action=(endpoints::ADD_WALLET) class="space-y-4"
                    {
                        (name_input("wallet-name", "New wallet", "", None))

                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add wallet" }
                    }
                }
            }
        }
    }
}

fn wallet_card(wallet: &WalletBalance) -> Markup {
    let balance_class = if wallet.balance < Decimal::ZERO {
        "text-red-700 dark:text-red-300"
    } else {
        "text-gray-900 dark:text-white"
    };
    let confirm_message = format!(
        "Are you sure you want to delete the wallet '{}' and all of its transactions? \
        This cannot be undone.",
        wallet.name
    );

    html! {
        div class=(CARD_STYLE) data-wallet-id=(wallet.id)
        {
            a
                href=(format_endpoint(endpoints::WALLET, wallet.id))
                class="text-lg font-semibold hover:underline"
            {
                (wallet.name)
            }

            p class="mt-2 text-sm text-gray-500 dark:text-gray-400" { "All-time balance" }

            p class={ "text-2xl font-bold tabular-nums " (balance_class) } data-wallet-balance="true"
            {
                (format_currency(wallet.balance))
            }

            div class="mt-4"
            {
                (edit_delete_actions(
                    &format_endpoint(endpoints::EDIT_WALLET, wallet.id),
                    &format_endpoint(endpoints::DELETE_WALLET, wallet.id),
                    &confirm_message,
                ))
            }
        }
    }
}

/// Renders the user's categories grouped by kind, followed by the form for
/// adding a category.
pub(super) fn categories_section(categories: &[Category]) -> Markup {
    html! {
        section class=(CARD_STYLE) id="categories"
        {
            h2 class=(SECTION_HEADING_STYLE) { "Categories" }

            div class="grid grid-cols-1 md:grid-cols-2 gap-4"
            {
                @for kind in Kind::ALL {
                    div
                    {
                        h3 class="font-medium" { (kind.label()) }

                        ul class="mt-2 space-y-2" data-category-kind=(kind)
                        {
                            @for category in categories.iter().filter(|category| category.kind == kind) {
                                (category_item(category))
                            }
                        }
                    }
                }
            }

            form method="post" action=(endpoints::ADD_CATEGORY) class="mt-6 space-y-4"
            {
                (name_input("category-name", "New category", "", None))

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        @for kind in Kind::ALL {
                            div class="flex items-center gap-3"
                            {
                                input
                                    name="kind"
                                    id={ "category-kind-" (kind) }
                                    type="radio"
                                    value=(kind)
                                    checked[kind == Kind::Expense]
                                    required
                                    class=(FORM_RADIO_INPUT_STYLE);

                                label for={ "category-kind-" (kind) } class=(FORM_RADIO_LABEL_STYLE)
                                {
                                    (kind.label())
                                }
                            }
                        }
                    }
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add category" }
            }
        }
    }
}

fn category_item(category: &Category) -> Markup {
    let confirm_message = format!(
        "Are you sure you want to delete the category '{}'? \
        Its transactions will become uncategorised.",
        category.name
    );

    html! {
        li class="flex justify-between items-center gap-4" data-category-id=(category.id)
        {
            span { (category.name) }

            (edit_delete_actions(
                &format_endpoint(endpoints::EDIT_CATEGORY, category.id),
                &format_endpoint(endpoints::DELETE_CATEGORY, category.id),
                &confirm_message,
            ))
        }
    }
}

/// Renders the form for adding a transaction.
///
/// A transaction needs a wallet and a category, so the form is replaced by a
/// hint until the user has at least one of each.
pub(super) fn add_transaction_section(
    form: &TransactionForm,
    wallets: &[Wallet],
    categories: &[Category],
) -> Markup {
    html! {
        section class=(CARD_STYLE) id="add-transaction"
        {
            h2 class=(SECTION_HEADING_STYLE) { "Add Transaction" }

            @if wallets.is_empty() || categories.is_empty() {
                p class="text-sm text-gray-600 dark:text-gray-400" data-add-transaction-hint="true"
                {
                    "Add a "
                    a href="#wallets" class=(LINK_STYLE) { "wallet" }
                    " and a "
                    a href="#categories" class=(LINK_STYLE) { "category" }
                    " before recording transactions."
                }
            } @else {
                form method="post" action=(endpoints::ADD_TRANSACTION) class="space-y-4"
                {
                    (transaction_form_fields(form, wallets, categories))

                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add transaction" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        auth::UserID,
        category::{Category, CategoryName},
        dashboard::aggregation::WalletBalance,
        kind::Kind,
        transaction::TransactionForm,
        wallet::{Wallet, WalletName},
    };

    use super::{add_transaction_section, categories_section, wallets_section};

    fn category(id: i64, name: &str, kind: Kind) -> Category {
        Category {
            id,
            name: CategoryName::new_unchecked(name),
            kind,
            user_id: UserID::new(1),
        }
    }

    #[test]
    fn wallet_cards_are_labelled_all_time() {
        let markup = wallets_section(&[WalletBalance {
            id: 3,
            name: "Cash".to_owned(),
            balance: Decimal::new(-1250, 2),
        }]);
        let document = Html::parse_fragment(&markup.into_string());

        let card = Selector::parse("[data-wallet-id='3']").unwrap();
        let card = document.select(&card).next().unwrap();
        let text = card.text().collect::<String>();
        assert!(text.contains("All-time balance"), "got {text}");
        assert!(text.contains("-$12"), "got {text}");
        let detail_link = Selector::parse("a[href='/wallet/3']").unwrap();
        assert!(card.select(&detail_link).next().is_some());
    }

    #[test]
    fn categories_are_grouped_by_kind() {
        let markup = categories_section(&[
            category(1, "Groceries", Kind::Expense),
            category(2, "Salary", Kind::Income),
        ]);
        let document = Html::parse_fragment(&markup.into_string());

        let income = Selector::parse("ul[data-category-kind=income] li").unwrap();
        let expense = Selector::parse("ul[data-category-kind=expense] li").unwrap();
        let names = |selector: &Selector| {
            document
                .select(selector)
                .map(|item| item.value().attr("data-category-id").unwrap_or_default().to_owned())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&income), vec!["2"]);
        assert_eq!(names(&expense), vec!["1"]);
    }

    #[test]
    fn transaction_form_needs_wallet_and_category() {
        let form = TransactionForm::new(date!(2024 - 01 - 05));

        let markup = add_transaction_section(&form, &[], &[category(1, "Salary", Kind::Income)]);
        let document = Html::parse_fragment(&markup.into_string());

        let hint = Selector::parse("[data-add-transaction-hint]").unwrap();
        assert!(document.select(&hint).next().is_some());
        let form_selector = Selector::parse("form").unwrap();
        assert!(document.select(&form_selector).next().is_none());
    }

    #[test]
    fn transaction_form_posts_to_add_transaction() {
        let form = TransactionForm::new(date!(2024 - 01 - 05));
        let wallets = [Wallet {
            id: 1,
            name: WalletName::new_unchecked("Cash"),
            user_id: UserID::new(1),
        }];

        let markup =
            add_transaction_section(&form, &wallets, &[category(1, "Salary", Kind::Income)]);
        let document = Html::parse_fragment(&markup.into_string());

        let form_selector = Selector::parse("form[method=post][action='/add_transaction']").unwrap();
        assert!(document.select(&form_selector).next().is_some());
    }
}
