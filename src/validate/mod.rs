//! Field validators for scraped coach data
//!
//! Pure predicates over raw strings, plus the `validate_or_default` wrapper
//! that every "sanitize or blank out" field in the record model is built on.
//! None of these touch I/O or crate state.

mod email;
mod handle;
mod phone;
mod url;

pub use email::is_valid_email;
pub use handle::is_valid_handle;
pub use phone::{is_valid_phone, strip_phone_punctuation};
pub use url::is_valid_url;

/// Returns `value` unchanged when the validator accepts it, otherwise the
/// default. Total over all inputs: the result is always one of the two
/// arguments and the call never panics.
pub fn validate_or_default<F>(validator: F, value: &str, default: &str) -> String
where
    F: Fn(&str) -> bool,
{
    if validator(value) {
        value.to_string()
    } else {
        default.to_string()
    }
}
