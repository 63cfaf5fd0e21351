// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event names and payload keys
//!
//! A [`Name`] is either free text or an [`Atom`]. The two forms never compare
//! equal, even when spelled the same: `Name::text("a") != Name::atom("a")`.

use std::fmt;
use std::sync::Arc;

/// An immutable, symbol-like identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Arc<str>);

impl Atom {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// An event name or payload key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Name {
    Text(String),
    Atom(Atom),
}

/// Event names share the key representation
pub type EventName = Name;

impl Name {
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text(name.into())
    }

    pub fn atom(name: impl AsRef<str>) -> Self {
        Self::Atom(Atom::new(name))
    }

    /// Textual spelling, regardless of form
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Atom(a) => a.as_str(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Atom(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Atom> for Name {
    fn from(a: Atom) -> Self {
        Self::Atom(a)
    }
}

impl From<&Name> for Name {
    fn from(n: &Name) -> Self {
        n.clone()
    }
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
