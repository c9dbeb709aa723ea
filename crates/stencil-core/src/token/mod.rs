//! Name token substitution
//!
//! Every template path segment and every template file body may contain the
//! literal marker [`NAME_TOKEN`]. Materialization replaces each occurrence with
//! the user supplied name.
//!
//! - Matching is verbatim and case-sensitive
//! - There is no escape syntax
//! - Substitution is a single pass: a name that itself contains the token is
//!   inserted as-is and never expanded again

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};

/// Placeholder replaced with the user supplied name
pub const NAME_TOKEN: &str = "__NAME__";

/// Replace every occurrence of [`NAME_TOKEN`] in `input` with `value`
///
/// # Examples
///
/// ```
/// use stencil_core::token::substitute;
///
/// assert_eq!(substitute("__NAME__.rs", "widget"), "widget.rs");
/// assert_eq!(substitute("mod __NAME__; // __NAME__", "a"), "mod a; // a");
/// assert_eq!(substitute("plain", "a"), "plain");
/// ```
pub fn substitute<'a>(input: &'a str, value: &str) -> Cow<'a, str> {
    if input.contains(NAME_TOKEN) {
        Cow::Owned(input.replace(NAME_TOKEN, value))
    } else {
        Cow::Borrowed(input)
    }
}

/// Substitute into a file or directory name
///
/// Names that are not valid UTF-8 cannot hold the token and are returned
/// unchanged.
pub fn substitute_os(name: &OsStr, value: &str) -> OsString {
    match name.to_str() {
        Some(s) => OsString::from(substitute(s, value).into_owned()),
        None => name.to_os_string(),
    }
}

/// Substitution parameters for one materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    name: String,
}

impl Params {
    /// Create parameters from a user supplied name
    ///
    /// Returns `None` for an empty name: an empty or cancelled prompt aborts
    /// the whole operation before any I/O.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() {
            None
        } else {
            Some(Self { name })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute this name into `input`
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        substitute(input, &self.name)
    }

    /// Substitute this name into a path segment
    pub fn apply_os(&self, name: &OsStr) -> OsString {
        substitute_os(name, &self.name)
    }
}
