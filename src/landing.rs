//! The page shown at the root of the site to visitors who are not logged in.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    alert::take_flash,
    auth::get_token_from_cookies,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, LINK_STYLE, base},
};

fn landing_view() -> Markup {
    html! {
        main class="flex flex-col items-center justify-center min-h-screen px-6 text-center
            text-gray-900 dark:text-white"
        {
            h1 class="mb-4 text-4xl font-extrabold tracking-tight" { "Wallet Ledger" }

            p class="mb-8 max-w-md text-lg text-gray-600 dark:text-gray-400"
            {
                "Track your income and expenses across wallets and categories."
            }

            div class="flex flex-col sm:flex-row gap-4 w-full max-w-xs"
            {
                a href=(endpoints::LOG_IN) class={ (BUTTON_PRIMARY_STYLE) " text-center" }
                {
                    "Log in"
                }
                a href=(endpoints::REGISTER) class={ (LINK_STYLE) " self-center" }
                {
                    "Create an account"
                }
            }
        }
    }
}

/// Redirects logged in users to the dashboard, otherwise renders the landing
/// page.
pub async fn get_landing_page(jar: PrivateCookieJar) -> Response {
    if get_token_from_cookies(&jar).is_ok() {
        return Redirect::to(endpoints::DASHBOARD).into_response();
    }

    let (jar, alert) = take_flash(jar);

    (jar, base("Welcome", alert.as_ref(), &landing_view())).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_extra::extract::PrivateCookieJar;
    use scraper::Selector;
    use time::Duration;

    use crate::{
        app_state::create_cookie_key,
        auth::{UserID, set_auth_cookie},
        endpoints,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::get_landing_page;

    #[tokio::test]
    async fn renders_links_for_visitors() {
        let jar = PrivateCookieJar::new(create_cookie_key("foobar"));

        let response = get_landing_page(jar).await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        for href in [endpoints::LOG_IN, endpoints::REGISTER] {
            let selector = Selector::parse(&format!("a[href='{href}']")).unwrap();
            assert!(
                document.select(&selector).next().is_some(),
                "missing link to {href}"
            );
        }
    }

    #[tokio::test]
    async fn redirects_logged_in_users_to_dashboard() {
        let jar = PrivateCookieJar::new(create_cookie_key("foobar"));
        let jar = set_auth_cookie(jar, UserID::new(1), Duration::minutes(5)).unwrap();

        let response = get_landing_page(jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::DASHBOARD
        );
    }
}
