//! Contains action names via the [`ActionName`] type.

use crate::parsed_types::Name;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// The name of an operator, as declared by `(:action <name> ...)` or
/// referenced by a plan step.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Default)]
pub struct ActionName(Name);

impl ActionName {
    #[inline(always)]
    pub const fn new(name: Name) -> Self {
        Self(name)
    }

    #[inline(always)]
    pub fn name(&self) -> &Name {
        &self.0
    }
}

impl<T> From<T> for ActionName
where
    T: Into<Name>,
{
    #[inline(always)]
    fn from(value: T) -> Self {
        ActionName::new(value.into())
    }
}

impl AsRef<str> for ActionName {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for ActionName {
    type Target = Name;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ActionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
