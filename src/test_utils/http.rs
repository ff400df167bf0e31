use axum::{
    body::Body,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    response::Response,
};
use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, Key},
};

use crate::alert::{Alert, COOKIE_FLASH, take_flash};

#[track_caller]
pub(crate) fn get_header(response: &Response<Body>, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

#[track_caller]
pub(crate) fn assert_redirect(response: &Response<Body>, want_location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(get_header(response, "location"), want_location);
}

/// Decrypt the flash alert set by `response`, if there is one.
pub(crate) fn get_flash(response: &Response<Body>, key: &Key) -> Option<Alert> {
    let flash_cookie = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_owned()).ok())
        .find(|cookie| cookie.name() == COOKIE_FLASH)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("{}={}", flash_cookie.name(), flash_cookie.value())).ok()?,
    );
    let jar = PrivateCookieJar::from_headers(&headers, key.clone());

    take_flash(jar).1
}
