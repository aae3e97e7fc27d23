//! Ordered set of CSS class names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered, de-duplicated list of class names.
///
/// Configuration accepts either a space-separated string (`"btn btn-minus"`) or an
/// array of names. Empty tokens are dropped, so `"a  b"` yields `["a", "b"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    names: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space-separated class string.
    pub fn parse(classes: &str) -> Self {
        classes.split_whitespace().collect()
    }

    /// Insert a class name. Returns false if it was already present or blank.
    ///
    /// Names containing whitespace are split into separate classes.
    pub fn insert(&mut self, name: &str) -> bool {
        let mut inserted = false;
        for token in name.split_whitespace() {
            if !self.contains(token) {
                self.names.push(token.to_string());
                inserted = true;
            }
        }
        inserted
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(" "))
    }
}

impl FromStr for ClassList {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        Self::parse(classes)
    }
}

impl<'a> FromIterator<&'a str> for ClassList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        for name in iter {
            list.insert(name);
        }
        list
    }
}

impl FromIterator<String> for ClassList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut list = Self::new();
        for name in iter {
            list.insert(&name);
        }
        list
    }
}

impl Serialize for ClassList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.names.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassListRepr {
    Joined(String),
    Names(Vec<String>),
}

impl<'de> Deserialize<'de> for ClassList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ClassListRepr::deserialize(deserializer)? {
            ClassListRepr::Joined(classes) => Self::parse(&classes),
            ClassListRepr::Names(names) => names.into_iter().collect(),
        })
    }
}
