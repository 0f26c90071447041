//! Structure properties (`key = value` pairs inside a structure's `{…}`).

use std::fmt;

use crate::model::identifier::Identifier;
use crate::model::primitive::PrimCell;
use crate::model::reference::Reference;

/// The value carried by a [`Property`].
///
/// The original's `Property` links to either a `PrimData` cell or a
/// `Reference`, never both; that exclusivity is expressed directly as an
/// enum here instead of two optional fields, per spec.md §9.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Primitive(PrimCell),
    Reference(Reference),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Primitive(cell) => write!(f, "{cell}"),
            PropertyValue::Reference(reference) => write!(f, "{reference}"),
        }
    }
}

/// A single `identifier = value` property attached to a structure.
///
/// The original chains properties via an intrusive `m_next` pointer
/// (`examples/original_source/include/openddlparser/OpenDDLParser.h`); here
/// a structure simply owns a `Vec<Property>` in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    identifier: Identifier,
    value: PropertyValue,
}

impl Property {
    pub fn new(identifier: impl Into<Identifier>, value: PropertyValue) -> Self {
        Property {
            identifier: identifier.into(),
            value,
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.identifier, self.value)
    }
}
