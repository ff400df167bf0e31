//! The transactions table shared by the dashboard and the wallet page.

use maud::{Markup, html};
use rust_decimal::Decimal;

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, edit_delete_actions,
        format_currency,
    },
    kind::Kind,
    transaction::{Totals, TransactionRow},
};

/// The label shown for transactions whose category was deleted.
pub const UNCATEGORISED_LABEL: &str = "Uncategorised";

fn amount_class(kind: Kind) -> &'static str {
    match kind {
        Kind::Income => "text-green-700 dark:text-green-300",
        Kind::Expense => "text-red-700 dark:text-red-300",
    }
}

/// The amount of a transaction with the sign of its kind, e.g. "-$3.20" for an
/// expense.
pub fn signed_amount(row: &TransactionRow) -> Decimal {
    match row.kind {
        Kind::Income => row.amount.value(),
        Kind::Expense => -row.amount.value(),
    }
}

/// Renders `rows` as a table, newest first.
///
/// The wallet column is hidden when `show_wallet` is false, e.g. on the page
/// for a single wallet.
pub fn transactions_table(rows: &[TransactionRow], show_wallet: bool) -> Markup {
    let column_count = if show_wallet { 6 } else { 5 };

    html! {
        div class="overflow-x-auto"
        {
            table class="w-full my-2 text-sm text-left rtl:text-right
                text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        @if show_wallet {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Wallet" }
                        }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class="px-6 py-3 text-right" { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (transaction_row_view(row, show_wallet))
                    }

                    @if rows.is_empty() {
                        tr
                        {
                            td
                                colspan=(column_count)
                                data-empty-state="true"
                                class="px-6 py-4 text-center"
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the income, expense and balance of `totals` side by side.
pub fn totals_summary(totals: &Totals) -> Markup {
    let balance_class = if totals.balance() < Decimal::ZERO {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    };

    html! {
        dl class="grid grid-cols-3 gap-4 text-center" data-totals="true"
        {
            div
            {
                dt class="text-sm text-gray-500 dark:text-gray-400" { "Income" }
                dd class={ "text-lg font-semibold " (amount_class(Kind::Income)) } data-total="income"
                {
                    (format_currency(totals.income))
                }
            }
            div
            {
                dt class="text-sm text-gray-500 dark:text-gray-400" { "Expense" }
                dd class={ "text-lg font-semibold " (amount_class(Kind::Expense)) } data-total="expense"
                {
                    (format_currency(totals.expense))
                }
            }
            div
            {
                dt class="text-sm text-gray-500 dark:text-gray-400" { "Balance" }
                dd class={ "text-lg font-semibold " (balance_class) } data-total="balance"
                {
                    (format_currency(totals.balance()))
                }
            }
        }
    }
}

fn transaction_row_view(row: &TransactionRow, show_wallet: bool) -> Markup {
    let description = row.description.as_deref().unwrap_or("");
    let confirm_message = match &row.description {
        Some(description) => format!(
            "Are you sure you want to delete the transaction '{description}'? This cannot be undone."
        ),
        None => "Are you sure you want to delete this transaction? This cannot be undone.".to_owned(),
    };
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION, row.id);
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, row.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true" data-transaction-id=(row.id)
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(row.date) { (row.date) } }
            td class=(TABLE_CELL_STYLE) { (description) }
            @if show_wallet {
                td class=(TABLE_CELL_STYLE)
                {
                    a href=(format_endpoint(endpoints::WALLET, row.wallet_id)) class="hover:underline"
                    {
                        (row.wallet_name)
                    }
                }
            }
            td class=(TABLE_CELL_STYLE)
            {
                @match &row.category_name {
                    Some(category_name) => { (category_name) }
                    None => {
                        span class="text-gray-400 dark:text-gray-500" { (UNCATEGORISED_LABEL) }
                    }
                }
            }
            td class={ "px-6 py-4 text-right tabular-nums " (amount_class(row.kind)) }
            {
                (format_currency(signed_amount(row)))
            }
            td class=(TABLE_CELL_STYLE)
            {
                (edit_delete_actions(&edit_url, &delete_url, &confirm_message))
            }
        }
    }
}
