//! Access-wall detection.
//!
//! A cheap heuristic run once per document, before any tree is built: the
//! page is treated as requiring authentication when its markup mentions a
//! login wall, when a social network serves anything login-related, or when
//! the markup is too small to hold real content.

use crate::error::{Error, Result};
use crate::url_utils;
use crate::Options;

/// Markup fragments that mark a login or authentication wall.
pub const AUTH_INDICATORS: [&str; 9] = [
    "login required",
    "sign in to continue",
    "authentication required",
    "please log in",
    "must be logged in",
    "login to view",
    "signin-wrapper",
    "login-form",
    "auth-required",
];

/// Hosts that put most content behind a login.
pub const SOCIAL_HOSTS: [&str; 5] = ["twitter.com", "x.com", "facebook.com", "instagram.com", "linkedin.com"];

const SOCIAL_LOGIN_WORDS: [&str; 3] = ["login", "sign in", "log in"];

/// Reason reported for markup below `min_markup_len`.
pub const MINIMAL_CONTENT: &str = "minimal content";

fn is_social_host(address: &str) -> bool {
    url_utils::parse_url(address)
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| {
            SOCIAL_HOSTS
                .iter()
                .any(|social| host == *social || host.ends_with(&format!(".{social}")))
        })
}

/// Check markup fetched from `address` for an access wall.
///
/// Returns [`Error::AuthenticationRequired`] naming what triggered it.
///
/// # Example
///
/// ```rust
/// use rs_adaptive_extract::{access, Error, Options};
///
/// let wall = format!("<div class='login-form'>{}</div>", "x".repeat(600));
/// let err = access::check("https://example.org/", &wall, &Options::default()).err();
/// assert_eq!(err, Some(Error::AuthenticationRequired("login-form".to_string())));
/// ```
pub fn check(address: &str, markup: &str, options: &Options) -> Result<()> {
    let lower = markup.to_lowercase();

    if is_social_host(address) {
        if let Some(word) = SOCIAL_LOGIN_WORDS.iter().find(|word| lower.contains(*word)) {
            return Err(Error::AuthenticationRequired(format!("social login: {word}")));
        }
    }

    if let Some(indicator) = AUTH_INDICATORS.iter().find(|indicator| lower.contains(*indicator)) {
        return Err(Error::AuthenticationRequired((*indicator).to_string()));
    }

    if markup.trim().chars().count() < options.min_markup_len {
        return Err(Error::AuthenticationRequired(MINIMAL_CONTENT.to_string()));
    }

    Ok(())
}
