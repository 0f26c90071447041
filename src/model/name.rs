//! Scoped names (`$global` / `%local`).

use std::fmt;

use crate::model::identifier::Identifier;

/// Whether a [`Name`] resolves across the whole document (`$`, `Global`) or
/// only within the structure's own subtree (`%`, `Local`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Global,
    Local,
}

impl Scope {
    /// The sigil that precedes an identifier of this scope.
    pub fn sigil(self) -> char {
        match self {
            Scope::Global => '$',
            Scope::Local => '%',
        }
    }
}

/// A name, such as `$node1` or `%sharedMaterial`, used both to label a
/// structure and to reference one via [`PrimCell::Ref`](crate::model::primitive::PrimCell::Ref).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    scope: Scope,
    identifier: Identifier,
}

impl Name {
    pub fn new(scope: Scope, identifier: impl Into<Identifier>) -> Self {
        Name {
            scope,
            identifier: identifier.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.scope.sigil(), self.identifier)
    }
}
