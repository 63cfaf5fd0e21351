// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching

use crate::config::NameMatching;
use crate::error::BusError;
use crate::name::{Atom, Name};
use regex::Regex;
use std::fmt;

/// Pattern for matching event names
/// Supports:
///   - Exact text: "user_created" matches only the text name "user_created"
///   - Exact atom: :user_created matches only the atom name :user_created
///   - Regex: /123b/ matches any name containing "123b" (search, not anchored)
///   - Any: matches every event
#[derive(Clone, Debug)]
pub enum Pattern {
    Text(String),
    Atom(Atom),
    Regex(Regex),
    Any,
}

impl Pattern {
    /// Compile a regular expression pattern
    pub fn regex(expr: &str) -> Result<Self, BusError> {
        Ok(Self::Regex(Regex::new(expr)?))
    }

    /// Check if this pattern matches an event name (strict name matching)
    pub fn matches(&self, event_name: &Name) -> bool {
        self.matches_with(event_name, NameMatching::Strict)
    }

    /// Check if this pattern matches an event name under the given mode
    pub fn matches_with(&self, event_name: &Name, mode: NameMatching) -> bool {
        match (self, mode) {
            (Self::Any, _) => true,
            (Self::Regex(re), _) => re.is_match(event_name.as_str()),
            (Self::Text(s), NameMatching::Strict) => {
                matches!(event_name, Name::Text(name) if name == s)
            }
            (Self::Atom(a), NameMatching::Strict) => {
                matches!(event_name, Name::Atom(name) if name == a)
            }
            (Self::Text(s), NameMatching::Unified) => event_name.as_str() == s,
            (Self::Atom(a), NameMatching::Unified) => event_name.as_str() == a.as_str(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Atom(a) => fmt::Display::fmt(a, f),
            Self::Regex(re) => write!(f, "/{}/", re.as_str()),
            Self::Any => f.write_str("*"),
        }
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Atom> for Pattern {
    fn from(a: Atom) -> Self {
        Self::Atom(a)
    }
}

impl From<Name> for Pattern {
    fn from(n: Name) -> Self {
        match n {
            Name::Text(s) => Self::Text(s),
            Name::Atom(a) => Self::Atom(a),
        }
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
