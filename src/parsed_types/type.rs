//! Contains types.

use crate::parsed_types::Name;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// The name of the implicit type used by domains without a `:types` section.
pub const DEFAULT_TYPE_NAME: &str = "default";

/// A named type. Identity is by name.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Type(Name);

impl Type {
    #[inline(always)]
    pub fn new<N: Into<Name>>(name: N) -> Self {
        Self(name.into())
    }

    /// The implicit `default` type of an untyped domain.
    pub fn implicit() -> Self {
        Self::new(DEFAULT_TYPE_NAME)
    }

    pub fn is_implicit(&self) -> bool {
        self.0 == DEFAULT_TYPE_NAME
    }

    pub fn name(&self) -> &Name {
        &self.0
    }
}

impl<T> From<T> for Type
where
    T: Into<Name>,
{
    #[inline(always)]
    fn from(value: T) -> Self {
        Type::new(value)
    }
}

impl AsRef<str> for Type {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Type {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
