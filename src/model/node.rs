//! The document tree: structures, primitive data lists, and the arena that
//! owns them.

use std::fmt;

use crate::model::identifier::Identifier;
use crate::model::name::Name;
use crate::model::primitive::{PrimCell, PrimitiveType};
use crate::model::property::Property;

/// An index into a [`Tree`]'s arena.
///
/// Mirrors the teacher's `TreeIndex` (`src/model/vertex.rs`): a plain
/// `usize` handle rather than `Rc`/`Box`, so parent back-references don't
/// need interior mutability or unsafe self-reference. Unlike the teacher's
/// binary-tree `Vertex`, a [`DdlNode`] has arbitrary arity, so there is no
/// fixed-size `children` tuple — just a `Vec<NodeId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// The raw arena index. Exposed for callers that want to use `NodeId`
    /// as a key in their own side tables.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a structure carries besides its identifier/name/properties: either
/// nothing beyond its children (an ordinary structure), or a primitive
/// value list (a `float[3] {…}`-style leaf).
///
/// Array-typed data lists (`float[3] {1,2,3, 4,5,6}`) store their declared
/// sub-array arity alongside the flattened value sequence; `values.len()`
/// is always a multiple of `arity` when `arity` is `Some`, per spec.md §4.3
/// edge cases (checked when the list is built, not re-checked on read).
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// An ordinary structure: its content, if any, lives entirely in the
    /// owning [`DdlNode`]'s `children`.
    Structure,
    /// A primitive data list, optionally grouped into fixed-size sub-arrays.
    Primitive {
        ty: PrimitiveType,
        arity: Option<usize>,
        values: Vec<PrimCell>,
    },
}

impl Payload {
    pub fn is_structure(&self) -> bool {
        matches!(self, Payload::Structure)
    }

    pub fn as_primitive(&self) -> Option<(PrimitiveType, Option<usize>, &[PrimCell])> {
        match self {
            Payload::Primitive { ty, arity, values } => Some((*ty, *arity, values)),
            Payload::Structure => None,
        }
    }
}

/// A single node of an OpenDDL document: either a named/typed structure
/// that contains nested structures, or a primitive value list.
///
/// Corresponds to spec.md §3 `DdlNode`. Stored by value inside a [`Tree`]'s
/// arena; all structural links (`parent`, `children`) are [`NodeId`]s, not
/// pointers, so the type has no lifetime parameter and is trivially movable.
#[derive(Debug, Clone, PartialEq)]
pub struct DdlNode {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    identifier: Option<Identifier>,
    name: Option<Name>,
    properties: Vec<Property>,
    payload: Payload,
}

impl DdlNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.identifier.is_none()
    }
}

/// An OpenDDL document tree.
///
/// Uses the teacher's arena pattern (`src/model/tree.rs`'s `Tree`/`TreeIndex`
/// pair, generalized from a binary phylogenetic tree to arbitrary arity): a
/// flat `Vec<DdlNode>` addressed by [`NodeId`], with a synthetic root that
/// has no identifier of its own and whose children are the document's
/// top-level structures. This matches the original's implicit top-level
/// list under `OpenDDLParser::getRoot()`.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<DdlNode>,
}

impl Tree {
    /// Builds an empty tree containing only the synthetic root at
    /// [`Tree::root`].
    pub fn new() -> Self {
        let root = DdlNode {
            id: NodeId::new(0),
            parent: None,
            children: Vec::new(),
            identifier: None,
            name: None,
            properties: Vec::new(),
            payload: Payload::Structure,
        };
        Tree { nodes: vec![root] }
    }

    /// The synthetic root node's id. Always `NodeId(0)`.
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn get(&self, id: NodeId) -> &DdlNode {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut DdlNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Appends a new child node under `parent` and returns its id.
    pub fn push_child(
        &mut self,
        parent: NodeId,
        identifier: Option<Identifier>,
        name: Option<Name>,
        properties: Vec<Property>,
        payload: Payload,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(DdlNode {
            id,
            parent: Some(parent),
            children: Vec::new(),
            identifier,
            name,
            properties,
            payload,
        });
        self.get_mut(parent).children.push(id);
        id
    }

    /// Depth-first pre-order iteration starting at `start`, `start` included.
    pub fn iter_subtree(&self, start: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![start];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            let node = self.get(next);
            for &child in node.children().iter().rev() {
                stack.push(child);
            }
            Some(next)
        })
    }

    /// Looks up the first descendant of `start` (searched depth-first,
    /// excluding `start` itself) whose name equals `needle`.
    pub fn find_by_name(&self, start: NodeId, needle: &Name) -> Option<NodeId> {
        self.iter_subtree(start)
            .skip(1)
            .find(|&id| self.get(id).name() == Some(needle))
    }
}
