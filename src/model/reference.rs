//! Ordered lists of names (`ref { $a, %b }`), and the null reference.

use std::fmt;

use crate::model::name::Name;

/// A reference value, as it appears on the right-hand side of a property
/// (`ref = node1`) or inside a `ref { }` data list.
///
/// The original's `Reference` is a counted array of [`Name`]s with a zero
/// count standing in for `null`; that is carried over here as an empty
/// `Vec` rather than a separate null variant, matching spec.md §3.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reference {
    names: Vec<Name>,
}

impl Reference {
    pub fn new(names: Vec<Name>) -> Self {
        Reference { names }
    }

    /// The `null` reference: no names at all.
    pub fn null() -> Self {
        Reference { names: Vec::new() }
    }

    pub fn is_null(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[Name] {
        &self.names
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return f.write_str("null");
        }
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}
