//! Contains names via the [`Name`] type.

use internment::Intern;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// An interned, lowercase PDDL identifier.
///
/// Names are compared and hashed by their text; cloning is a pointer copy.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Name(Intern<String>);

impl Name {
    #[inline(always)]
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self(Intern::new(name.as_ref().to_string()))
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this name denotes a variable, i.e. starts with `?`.
    pub fn is_variable(&self) -> bool {
        self.as_str().starts_with('?')
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::new("")
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl From<&str> for Name {
    #[inline(always)]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    #[inline(always)]
    fn from(value: String) -> Self {
        Self(Intern::new(value))
    }
}

impl AsRef<str> for Name {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Deref for Name {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}
