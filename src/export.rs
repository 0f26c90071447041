//! The exporter: a post-order tree walker that reproduces OpenDDL text
//! (spec.md §4.4).

use std::fmt::Write as _;

use crate::model::node::{NodeId, Payload, Tree};
use crate::model::property::PropertyValue;

const INDENT_WIDTH: usize = 2;

/// Walks a [`Tree`] and writes it back out as OpenDDL text.
///
/// Mirrors the original's `OpenDDLExport` (confirmed by
/// `examples/original_source/test/OpenDDLExportTest.cpp`'s `handleNode`
/// walk), generalized from one C++ `DDLNode*` at a time to the arena-index
/// `Tree`/`NodeId` pair this crate's parser builds.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exporter;

impl Exporter {
    pub fn new() -> Self {
        Exporter
    }

    /// Exports every top-level structure under `tree`'s synthetic root.
    pub fn export(&self, tree: &Tree) -> String {
        let mut out = String::new();
        for &child in tree.get(tree.root()).children() {
            self.export_node(tree, child, 0, &mut out);
        }
        out
    }

    /// Exports a single node and its subtree, starting at `depth`.
    pub fn export_node(&self, tree: &Tree, id: NodeId, depth: usize, out: &mut String) {
        let node = tree.get(id);
        let indent = " ".repeat(depth * INDENT_WIDTH);
        out.push_str(&indent);

        match node.payload() {
            Payload::Structure => {
                write!(out, "{}", node.identifier().expect("structure nodes are always identified")).unwrap();
                if let Some(name) = node.name() {
                    write!(out, " {name}").unwrap();
                }
                if !node.properties().is_empty() {
                    out.push_str(" (");
                    for (i, prop) in node.properties().iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        write!(out, "{} = {}", prop.identifier(), format_property_value(prop.value())).unwrap();
                    }
                    out.push(')');
                }
                if node.children().is_empty() {
                    out.push_str(" {}\n");
                } else {
                    out.push_str(" {\n");
                    for &child in node.children() {
                        self.export_node(tree, child, depth + 1, out);
                    }
                    out.push_str(&indent);
                    out.push_str("}\n");
                }
            }
            Payload::Primitive { ty, arity, values } => {
                write!(out, "{ty}").unwrap();
                if let Some(n) = arity {
                    write!(out, "[{n}]").unwrap();
                }
                if let Some(name) = node.name() {
                    write!(out, " {name}").unwrap();
                }
                if !node.properties().is_empty() {
                    out.push_str(" (");
                    for (i, prop) in node.properties().iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        write!(out, "{} = {}", prop.identifier(), format_property_value(prop.value())).unwrap();
                    }
                    out.push(')');
                }
                out.push_str(" { ");
                match arity {
                    None => {
                        for (i, value) in values.iter().enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            write!(out, "{value}").unwrap();
                        }
                    }
                    Some(n) => {
                        for (i, group) in values.chunks(*n).enumerate() {
                            if i > 0 {
                                out.push_str(", ");
                            }
                            out.push('{');
                            for (j, value) in group.iter().enumerate() {
                                if j > 0 {
                                    out.push_str(", ");
                                }
                                write!(out, "{value}").unwrap();
                            }
                            out.push('}');
                        }
                    }
                }
                out.push_str(" }\n");
            }
        }
    }
}

fn format_property_value(value: &PropertyValue) -> String {
    value.to_string()
}

/// Requotes a string with the escapes `parseStringLiteral` understands
/// (spec.md §4.2): `\\`, `\"`, `\n`, `\t`, `\r`.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::core::Parser;

    fn roundtrip(src: &str) -> (String, String) {
        let mut parser = Parser::with_buffer(src.as_bytes().to_vec(), true);
        assert!(parser.parse(), "expected {src:?} to parse");
        let exported = Exporter::new().export(parser.tree());

        let mut reparsed = Parser::with_buffer(exported.as_bytes().to_vec(), true);
        assert!(reparsed.parse(), "expected exported text {exported:?} to re-parse");
        let reexported = Exporter::new().export(reparsed.tree());
        (exported, reexported)
    }

    #[test]
    fn quote_string_escapes_quotes_and_backslashes() {
        assert_eq!(quote_string("a\"b\\c"), r#""a\"b\\c""#);
    }

    #[test]
    fn empty_structure_round_trips() {
        let (first, second) = roundtrip("Foo {}");
        assert_eq!(first, second);
    }

    #[test]
    fn property_and_nested_float_round_trips() {
        let (first, second) = roundtrip(r#"Metric (key = "distance") { float { 1.0 } }"#);
        assert_eq!(first, second);
    }

    #[test]
    fn array_arity_round_trips() {
        let (first, second) = roundtrip("Transform { float[3] { {1,0,0}, {0,1,0} } }");
        assert_eq!(first, second);
    }

    #[test]
    fn ref_list_round_trips() {
        let (first, second) = roundtrip("Ref { ref { $a, %b } }");
        assert_eq!(first, second);
    }

    #[test]
    fn primitive_list_property_round_trips() {
        let (first, second) = roundtrip(r#"float (unit = "m") { 1.0 }"#);
        assert_eq!(first, second);
        assert!(first.contains("unit"));
    }
}
