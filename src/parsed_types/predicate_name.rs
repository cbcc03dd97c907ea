//! Contains predicate names via the [`PredicateName`] type.

use crate::parsed_types::Name;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// A predicate name.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct PredicateName(Name);

impl PredicateName {
    #[inline(always)]
    pub const fn new(name: Name) -> Self {
        Self(name)
    }

    #[inline(always)]
    pub fn name(&self) -> &Name {
        &self.0
    }
}

impl<T> From<T> for PredicateName
where
    T: Into<Name>,
{
    #[inline(always)]
    fn from(value: T) -> Self {
        PredicateName::new(value.into())
    }
}

impl AsRef<str> for PredicateName {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for PredicateName {
    type Target = Name;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for PredicateName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
