//! Browser navigation and redirect safety
//!
//! The flow never navigates directly; it computes a destination and hands it
//! to the [`Navigator`] collaborator. Destinations derived from
//! redirect-supplied data pass through [`resolve_destination`], which rejects
//! anything absolute so a login redirect can never be weaponized into an open
//! redirect toward an attacker-controlled host.

use log::warn;

use crate::models::ProviderError;

/// Default post-login destination: the application's own root
pub const DEFAULT_DESTINATION: &str = "./";

/// Application-internal error display route
pub const ERROR_ROUTE: &str = "error";

/// Error code used when the token could not be resolved to an identity
pub const USER_FETCH_FAILED: &str = "user_fetch_failed";

/// Navigation interface
///
/// Implementations must replace the current history entry rather than push a
/// new one: a completed login must not leave the callback URL, which carries
/// the now-spent token, in browser history.
pub trait Navigator: Send + Sync {
    fn replace_location(&self, path: &str);
}

/// Compute the committed post-login destination from the untrusted
/// `return_to` value.
///
/// Absolute URLs (any scheme, e.g. `https://`, `javascript:`) and
/// protocol-relative `//host` forms are rejected and silently replaced with
/// [`DEFAULT_DESTINATION`]. Only relative/path-form destinations are honored
/// verbatim. The downgrade is a policy correction, not a reported error.
#[must_use]
pub fn resolve_destination(return_to: Option<&str>) -> String {
    let requested = match return_to {
        Some(path) if !path.is_empty() => path,
        _ => return DEFAULT_DESTINATION.to_string(),
    };

    if is_absolute(requested) {
        warn!("rejecting absolute redirect target: {requested}");
        return DEFAULT_DESTINATION.to_string();
    }

    requested.to_string()
}

/// A target is absolute when it is protocol-relative or parses standalone,
/// which means it carries a scheme.
fn is_absolute(target: &str) -> bool {
    target.starts_with("//") || url::Url::parse(target).is_ok()
}

/// Destination for a provider-reported failure
///
/// All three fields are always present in the query, substituting the empty
/// string when the provider omitted one.
#[must_use]
pub fn provider_error_destination(error: &ProviderError) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("error", error.error.as_deref().unwrap_or(""))
        .append_pair(
            "error_description",
            error.error_description.as_deref().unwrap_or(""),
        )
        .append_pair("error_uri", error.error_uri.as_deref().unwrap_or(""))
        .finish();
    format!("{ERROR_ROUTE}?{query}")
}

/// Destination for a failed identity fetch
///
/// Provider error detail is not available at this stage and is not
/// fabricated; the code alone is surfaced.
#[must_use]
pub fn fetch_failed_destination() -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("error", USER_FETCH_FAILED)
        .finish();
    format!("{ERROR_ROUTE}?{query}")
}
