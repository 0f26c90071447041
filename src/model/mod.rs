//! Data model for OpenDDL documents.
//!
//! # Tree representation
//! Documents are represented by [node::Tree], which uses the arena pattern
//! to store [node::DdlNode]s addressed by [node::NodeId]. Each node is
//! either an ordinary structure or a primitive data list (see
//! [node::Payload]); structures nest to arbitrary depth and arbitrary
//! arity, unlike the fixed-arity binary tree this module grew out of.

pub mod identifier;
pub mod name;
pub mod node;
pub mod primitive;
pub mod property;
pub mod reference;

pub use identifier::Identifier;
pub use name::{Name, Scope};
pub use node::{DdlNode, NodeId, Payload, Tree};
pub use primitive::{PrimCell, PrimitiveType};
pub use property::{Property, PropertyValue};
pub use reference::Reference;
