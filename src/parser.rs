//! Argument table construction from a raw argument vector.

use crate::config::{ParserConfig, Precedence};
use std::collections::{BTreeMap, HashMap};

/// Where a table entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Written by a flag on the command line.
    Explicit,
    /// Synthesized from a negation flag (`-noX` sets `-X`).
    Negation,
}

/// A single resolved entry of an [`ArgTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// `None` when the flag was given without `=value`.
    pub value: Option<String>,
    /// Whether the value was given explicitly or synthesized from a negation.
    pub origin: Origin,
}

/// Immutable mapping from normalized flag names (`-name`) to their values.
///
/// Built once from an argument vector; rebuilding means constructing a new
/// table. Positional arguments are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgTable {
    entries: BTreeMap<String, Entry>,
    history: HashMap<String, Vec<Option<String>>>,
}

/// Build an argument table according to the config.
///
/// The first token is the program name and is discarded.
pub fn parse_args<I>(config: &ParserConfig, tokens: I) -> ArgTable
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut builder = Builder::new(config);
    for token in tokens.into_iter().skip(1) {
        builder.push(token.as_ref());
    }
    builder.finish()
}

impl ArgTable {
    /// Build a table with the default config.
    pub fn parse<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        parse_args(&ParserConfig::default(), tokens)
    }

    /// Build a table with an explicit config.
    pub fn parse_with<I>(config: &ParserConfig, tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        parse_args(config, tokens)
    }

    /// Build a table from the arguments of the current process.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn from_env() -> Self {
        Self::from_env_with(&ParserConfig::default())
    }

    /// Build a table from the arguments of the current process with a config.
    pub fn from_env_with(config: &ParserConfig) -> Self {
        let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
        parse_args(config, args)
    }

    /// Whether the key is present at all, with or without a value.
    pub fn is_set(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw lookup: `None` if absent, `Some(None)` if present without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|entry| entry.value.as_deref())
    }

    /// Where the stored value for `key` came from.
    pub fn origin(&self, key: &str) -> Option<Origin> {
        self.entries.get(key).map(|entry| entry.origin)
    }

    /// Every explicit occurrence of `key`, in command-line order.
    ///
    /// Negation-synthesized values are not included.
    pub fn get_multi(&self, key: &str) -> &[Option<String>] {
        self.history.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of distinct keys, including negation-synthesized ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no flags were stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a raw token into a normalized key and optional value.
///
/// Returns `None` for positional tokens.
fn split_token(token: &str) -> Option<(String, Option<String>)> {
    if !token.starts_with('-') {
        return None;
    }

    let flag = match token.strip_prefix("--") {
        Some(rest) => format!("-{}", rest),
        None => token.to_string(),
    };

    match flag.split_once('=') {
        Some((key, value)) => Some((key.to_string(), Some(value.to_string()))),
        None => Some((flag, None)),
    }
}

/// The key negated by `key`, if `key` is a negation flag.
///
/// An empty prefix never marks a negation.
fn negation_target(key: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        return None;
    }
    let name = key.strip_prefix('-')?.strip_prefix(prefix)?;
    if name.is_empty() {
        return None;
    }
    Some(format!("-{}", name))
}

/// A stored value and the position of the token that wrote it.
struct Stored<V> {
    value: V,
    seq: usize,
}

/// Internal builder state for a single pass over the tokens.
struct Builder<'a> {
    config: &'a ParserConfig,
    explicit: HashMap<String, Stored<Option<String>>>,
    negated: HashMap<String, Stored<String>>,
    history: HashMap<String, Vec<Option<String>>>,
    seq: usize,
}

impl<'a> Builder<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            explicit: HashMap::new(),
            negated: HashMap::new(),
            history: HashMap::new(),
            seq: 0,
        }
    }

    fn push(&mut self, token: &str) {
        let seq = self.seq;
        self.seq += 1;

        let Some((key, value)) = split_token(token) else {
            tracing::trace!(token, "skipping positional argument");
            return;
        };

        if let Some(target) = negation_target(&key, &self.config.negation_prefix) {
            let synthesized = match value.as_deref() {
                None | Some("1") => "0",
                Some(_) => "1",
            };
            tracing::debug!(flag = %key, %target, value = synthesized, "negation flag");
            self.negated.insert(
                target,
                Stored {
                    value: synthesized.to_string(),
                    seq,
                },
            );
        }

        self.history
            .entry(key.clone())
            .or_default()
            .push(value.clone());
        self.explicit.insert(key, Stored { value, seq });
    }

    fn finish(self) -> ArgTable {
        let precedence = self.config.precedence;
        let mut entries = BTreeMap::new();

        for (key, synthesized) in self.negated {
            let overridden = match (precedence, self.explicit.get(&key)) {
                (_, None) => false,
                (Precedence::ExplicitWins, Some(_)) => true,
                (Precedence::LastWins, Some(stored)) => stored.seq > synthesized.seq,
            };
            if overridden {
                tracing::debug!(%key, "negation overridden by explicit flag");
                continue;
            }
            entries.insert(
                key,
                Entry {
                    value: Some(synthesized.value),
                    origin: Origin::Negation,
                },
            );
        }

        for (key, stored) in self.explicit {
            entries.entry(key).or_insert(Entry {
                value: stored.value,
                origin: Origin::Explicit,
            });
        }

        tracing::debug!(
            tokens = self.seq,
            entries = entries.len(),
            ?precedence,
            "built argument table"
        );

        ArgTable {
            entries,
            history: self.history,
        }
    }
}
