//! Typed reads against a built [`ArgTable`].
//!
//! Every accessor is total: an absent key yields the caller's default, a flag
//! given without a value yields a type-specific value (`true`, `""`, `0`), and
//! an integer that does not parse yields `0`. The `lookup_*` variants carry
//! how the value was resolved; the `get_*` variants return the bare value.

use crate::parser::ArgTable;

/// How a [`Lookup`] value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The key was absent; the caller's default was returned.
    Defaulted,
    /// The key was present without a value.
    Bare,
    /// The key's value was used.
    Value,
    /// The key's value could not be read as the requested type.
    Unparseable,
}

/// A resolved value together with how it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<T> {
    /// The value the matching `get_*` accessor returns
    pub value: T,
    pub resolution: Resolution,
}

impl<T> Lookup<T> {
    fn new(value: T, resolution: Resolution) -> Self {
        Self { value, resolution }
    }

    /// Whether the caller's default was used.
    pub fn is_defaulted(&self) -> bool {
        self.resolution == Resolution::Defaulted
    }
}

impl ArgTable {
    /// Boolean value of `key`.
    ///
    /// A bare flag and the literal `"1"` are true; any other value is false.
    pub fn get_bool_arg(&self, key: &str, default: bool) -> bool {
        self.lookup_bool(key, default).value
    }

    /// String value of `key`; a bare flag yields `""`, not the default.
    pub fn get_arg(&self, key: &str, default: &str) -> String {
        self.lookup_arg(key, default).value
    }

    /// Integer value of `key`; a bare flag or unparseable value yields `0`.
    pub fn get_int_arg(&self, key: &str, default: i64) -> i64 {
        self.lookup_int(key, default).value
    }

    /// Like [`get_bool_arg`](Self::get_bool_arg), with the resolution.
    pub fn lookup_bool(&self, key: &str, default: bool) -> Lookup<bool> {
        match self.get(key) {
            None => Lookup::new(default, Resolution::Defaulted),
            Some(None) => Lookup::new(true, Resolution::Bare),
            Some(Some(value)) => Lookup::new(value == "1", Resolution::Value),
        }
    }

    /// Like [`get_arg`](Self::get_arg), with the resolution.
    pub fn lookup_arg(&self, key: &str, default: &str) -> Lookup<String> {
        match self.get(key) {
            None => Lookup::new(default.to_string(), Resolution::Defaulted),
            Some(None) => Lookup::new(String::new(), Resolution::Bare),
            Some(Some(value)) => Lookup::new(value.to_string(), Resolution::Value),
        }
    }

    /// Like [`get_int_arg`](Self::get_int_arg), with the resolution.
    ///
    /// An unparseable value resolves to `0` with [`Resolution::Unparseable`].
    pub fn lookup_int(&self, key: &str, default: i64) -> Lookup<i64> {
        match self.get(key) {
            None => Lookup::new(default, Resolution::Defaulted),
            Some(None) => Lookup::new(0, Resolution::Bare),
            Some(Some(value)) => match parse_int(value) {
                Some(parsed) => Lookup::new(parsed, Resolution::Value),
                None => {
                    tracing::debug!(key, value, "integer argument did not parse");
                    Lookup::new(0, Resolution::Unparseable)
                }
            },
        }
    }
}

/// Parse the leading integer of `text` the way C's `strtoll` does.
///
/// Leading ASCII whitespace and one sign are accepted, parsing stops at the first
/// non-digit, and out-of-range values saturate. Returns `None` when there
/// are no digits.
fn parse_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for b in rest[..end].bytes() {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }
    Some(value)
}
