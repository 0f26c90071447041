//! Primitive type tags and typed value cells.

use std::fmt;

use crate::model::name::Name;

/// The closed set of primitive types OpenDDL structures and properties can
/// carry, plus the `None` sentinel for a cell that hasn't been assigned a
/// value yet.
///
/// Mirrors the original `PrimitiveDataType` enum (`ddl_none .. ddl_ref`) one
/// to one; see `examples/original_source/include/openddlparser/OpenDDLParser.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Sentinel for an uninitialized cell. Never produced by the parser.
    None,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Half,
    Float,
    Double,
    String,
    Ref,
}

impl PrimitiveType {
    /// The reserved keyword that spells this type in OpenDDL source, or
    /// `None` for the sentinel (which has no surface syntax).
    pub fn keyword(self) -> Option<&'static str> {
        Some(match self {
            PrimitiveType::None => return None,
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::UInt8 => "unsigned_int8",
            PrimitiveType::UInt16 => "unsigned_int16",
            PrimitiveType::UInt32 => "unsigned_int32",
            PrimitiveType::UInt64 => "unsigned_int64",
            PrimitiveType::Half => "half",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::String => "string",
            PrimitiveType::Ref => "ref",
        })
    }

    /// Looks up a primitive type keyword (case-sensitive, per spec.md §4.3).
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "bool" => PrimitiveType::Bool,
            "int8" => PrimitiveType::Int8,
            "int16" => PrimitiveType::Int16,
            "int32" => PrimitiveType::Int32,
            "int64" => PrimitiveType::Int64,
            "unsigned_int8" => PrimitiveType::UInt8,
            "unsigned_int16" => PrimitiveType::UInt16,
            "unsigned_int32" => PrimitiveType::UInt32,
            "unsigned_int64" => PrimitiveType::UInt64,
            "half" => PrimitiveType::Half,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "string" => PrimitiveType::String,
            "ref" => PrimitiveType::Ref,
            _ => return None,
        })
    }

    /// Whether this is one of the eight fixed-width integer variants.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveType::Int8
                | PrimitiveType::Int16
                | PrimitiveType::Int32
                | PrimitiveType::Int64
                | PrimitiveType::UInt8
                | PrimitiveType::UInt16
                | PrimitiveType::UInt32
                | PrimitiveType::UInt64
        )
    }

    /// Whether this variant is signed (meaningful only for integer types).
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveType::Int8 | PrimitiveType::Int16 | PrimitiveType::Int32 | PrimitiveType::Int64
        )
    }

    /// Whether this is one of the three floating-point variants.
    pub fn is_floating(self) -> bool {
        matches!(self, PrimitiveType::Half | PrimitiveType::Float | PrimitiveType::Double)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.keyword() {
            Some(kw) => f.write_str(kw),
            None => f.write_str("none"),
        }
    }
}

/// A single typed value cell, as described by spec.md §3 `PrimCell`.
///
/// Unlike the original's `PrimData` (a tagged record plus raw byte buffer
/// plus an intrusive `next` pointer forming a linked list), this is a closed
/// sum type: the payload variant *is* the type tag, so "payload doesn't
/// match type" is unrepresentable rather than merely disallowed. Cells are
/// stored in an ordinary `Vec<PrimCell>` rather than linked by hand — see
/// spec.md §9 "Heterogeneous payload".
#[derive(Debug, Clone, PartialEq)]
pub enum PrimCell {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    /// Half-precision float, widened to `f32` in memory (spec.md §9 Open
    /// Questions: the external decimal text representation is unaffected).
    Half(f32),
    Float(f32),
    Double(f64),
    String(String),
    /// A single scoped name, as produced inside a `ref`-typed payload list.
    Ref(Name),
}

impl PrimCell {
    /// The `PrimitiveType` tag for this cell's variant.
    pub fn type_of(&self) -> PrimitiveType {
        match self {
            PrimCell::Bool(_) => PrimitiveType::Bool,
            PrimCell::Int8(_) => PrimitiveType::Int8,
            PrimCell::Int16(_) => PrimitiveType::Int16,
            PrimCell::Int32(_) => PrimitiveType::Int32,
            PrimCell::Int64(_) => PrimitiveType::Int64,
            PrimCell::UInt8(_) => PrimitiveType::UInt8,
            PrimCell::UInt16(_) => PrimitiveType::UInt16,
            PrimCell::UInt32(_) => PrimitiveType::UInt32,
            PrimCell::UInt64(_) => PrimitiveType::UInt64,
            PrimCell::Half(_) => PrimitiveType::Half,
            PrimCell::Float(_) => PrimitiveType::Float,
            PrimCell::Double(_) => PrimitiveType::Double,
            PrimCell::String(_) => PrimitiveType::String,
            PrimCell::Ref(_) => PrimitiveType::Ref,
        }
    }
}

impl fmt::Display for PrimCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimCell::Bool(b) => write!(f, "{b}"),
            PrimCell::Int8(v) => write!(f, "{v}"),
            PrimCell::Int16(v) => write!(f, "{v}"),
            PrimCell::Int32(v) => write!(f, "{v}"),
            PrimCell::Int64(v) => write!(f, "{v}"),
            PrimCell::UInt8(v) => write!(f, "{v}"),
            PrimCell::UInt16(v) => write!(f, "{v}"),
            PrimCell::UInt32(v) => write!(f, "{v}"),
            PrimCell::UInt64(v) => write!(f, "{v}"),
            PrimCell::Half(v) | PrimCell::Float(v) => write!(f, "{v}"),
            PrimCell::Double(v) => write!(f, "{v}"),
            PrimCell::String(s) => write!(f, "{}", crate::export::quote_string(s)),
            PrimCell::Ref(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_round_trip() {
        for ty in [
            PrimitiveType::Bool,
            PrimitiveType::Int8,
            PrimitiveType::UInt64,
            PrimitiveType::Half,
            PrimitiveType::Float,
            PrimitiveType::Double,
            PrimitiveType::String,
            PrimitiveType::Ref,
        ] {
            let kw = ty.keyword().unwrap();
            assert_eq!(PrimitiveType::from_keyword(kw), Some(ty));
        }
    }

    #[test]
    fn none_has_no_keyword() {
        assert_eq!(PrimitiveType::None.keyword(), None);
    }

    #[test]
    fn cell_type_matches_payload() {
        assert_eq!(PrimCell::Int16(-1).type_of(), PrimitiveType::Int16);
        assert_eq!(PrimCell::String("x".into()).type_of(), PrimitiveType::String);
    }
}
