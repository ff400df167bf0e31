use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{alert::Alert, name::MAX_NAME_LENGTH};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto lg:py-0 max-w-md text-gray-900 dark:text-white";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_RADIO_GROUP_STYLE: &str = "flex flex-row gap-2";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer h-4 w-4 shrink-0 cursor-pointer \
    text-blue-600 border-gray-300 dark:border-gray-600 focus-visible:ring-2 \
    focus-visible:ring-blue-500";
pub const FORM_RADIO_LABEL_STYLE: &str = "flex-1 rounded border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 text-sm font-medium \
    text-gray-700 dark:text-white cursor-pointer \
    peer-checked:border-blue-600 peer-checked:bg-blue-50 peer-checked:text-blue-700";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card used for each dashboard section
pub const CARD_STYLE: &str = "w-full p-6 bg-white border border-gray-200 \
    rounded-lg shadow dark:bg-gray-800 dark:border-gray-700";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The page layout shared by every view.
///
/// `alert` is shown above the page content, typically the flash message left
/// by the previous request.
pub fn base(title: &str, alert: Option<&Alert>, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Wallet Ledger" }
                link href="/static/main.css" rel="stylesheet";
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                @if let Some(alert) = alert
                {
                    div id="alert-container" class="w-full max-w-md mx-auto px-4 pt-4"
                    {
                        (alert.into_html())
                    }
                }

                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, None, &content)
}

pub fn log_in_register(form_title: &str, form: &Markup) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a href="/" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                "Wallet Ledger"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        (form_title)
                    }

                    (form)
                }
            }
        }
    }
}

pub fn username_input(username: &str, max_length: usize) -> Markup {
    html! {
        div
        {
            label
                for="username"
                class=(FORM_LABEL_STYLE)
            {
                "Username"
            }

            input
                type="text"
                name="username"
                id="username"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                autofocus
                value=(username)
                maxlength=(max_length);
        }
    }
}

pub fn password_input(error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="password"
                class=(FORM_LABEL_STYLE)
            {
                "Password"
            }

            input
                type="password"
                name="password"
                id="password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required;

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }

    }
}

/// A required text input for the name of a wallet or category.
///
/// The input is always submitted as `name`, `id` only needs to be unique
/// within the page.
pub fn name_input(id: &str, label: &str, value: &str, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for=(id) class=(FORM_LABEL_STYLE) { (label) }

            input
                type="text"
                name="name"
                id=(id)
                class=(FORM_TEXT_INPUT_STYLE)
                required
                value=(value)
                maxlength=(MAX_NAME_LENGTH);

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

/// Format `amount` as dollars with thousands separators and two decimal
/// places, e.g. "-$1,234.50".
pub fn format_currency(amount: Decimal) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let number = amount.round_dp(2).to_f64().unwrap_or_default();

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits trailing zeros, so "12.30" is rendered as "12.3" and
    // "12.00" as "12".
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(dot) if formatted_string.len() - dot == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE)
        {
          (text)
        }

    )
}

const CONFIRM_ON_SUBMIT: &str = "return confirm(this.dataset.confirm)";

/// An edit link and a delete button for a row in a table or list.
///
/// The delete button submits a POST form to `delete_url` after the user
/// confirms `confirm_message`. The message is only ever read from the
/// `data-confirm` attribute, never spliced into the script.
pub fn edit_delete_actions(edit_url: &str, delete_url: &str, confirm_message: &str) -> Markup {
    html! {
        div class="flex gap-4"
        {
            a href=(edit_url) class=(LINK_STYLE) { "Edit" }

            form
                method="post"
                action=(delete_url)
                data-confirm=(confirm_message)
                onsubmit=(CONFIRM_ON_SUBMIT)
                class="inline"
            {
                button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
            }
        }
    }
}
