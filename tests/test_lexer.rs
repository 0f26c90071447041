#![allow(unused)]

use oddl::model::{PrimitiveType, Scope};
use oddl::parser::cursor::Cursor;
use oddl::parser::lexer;
use oddl::parser::ErrorKind;

// ============= Identifiers and names =============

#[test]
fn identifier_accepts_letters_digits_and_underscore() {
    let mut c = Cursor::new(b"node_42 rest");
    assert_eq!(lexer::parse_identifier(&mut c).unwrap().as_deref(), Some("node_42"));
}

#[test]
fn identifier_soft_mismatch_on_leading_digit() {
    let mut c = Cursor::new(b"42node");
    assert_eq!(lexer::parse_identifier(&mut c).unwrap(), None);
    assert_eq!(c.position(), 0);
}

#[test]
fn name_sigils_select_scope() {
    let mut c = Cursor::new(b"$global1");
    assert_eq!(lexer::parse_name(&mut c).unwrap().unwrap().scope(), Scope::Global);
    let mut c = Cursor::new(b"%local1");
    assert_eq!(lexer::parse_name(&mut c).unwrap().unwrap().scope(), Scope::Local);
}

// ============= Primitive type keywords and arity =============

#[test]
fn primitive_keyword_defaults_to_arity_one() {
    let mut c = Cursor::new(b"double {");
    let (ty, arity) = lexer::parse_primitive_data_type(&mut c).unwrap().unwrap();
    assert_eq!(ty, PrimitiveType::Double);
    assert_eq!(arity, 1);
}

#[test]
fn non_numeric_arity_is_invalid() {
    let mut c = Cursor::new(b"int32[x]");
    let err = lexer::parse_primitive_data_type(&mut c).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArity);
}

#[test]
fn missing_arity_digits_is_invalid() {
    let mut c = Cursor::new(b"int32[]");
    let err = lexer::parse_primitive_data_type(&mut c).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArity);
}

// ============= Literals =============

#[test]
fn boolean_literals() {
    let mut c = Cursor::new(b"true");
    assert_eq!(lexer::parse_boolean_literal(&mut c).unwrap(), Some(true));
    let mut c = Cursor::new(b"false");
    assert_eq!(lexer::parse_boolean_literal(&mut c).unwrap(), Some(false));
}

#[test]
fn integer_literal_respects_target_width() {
    let mut c = Cursor::new(b"127");
    assert!(lexer::parse_integer_literal(&mut c, PrimitiveType::Int8).unwrap().is_some());
    let mut c = Cursor::new(b"128");
    assert!(lexer::parse_integer_literal(&mut c, PrimitiveType::Int8).is_err());
}

#[test]
fn floating_literal_without_fraction() {
    let mut c = Cursor::new(b"42");
    assert_eq!(lexer::parse_floating_literal(&mut c).unwrap(), Some(42.0));
}

#[test]
fn floating_literal_soft_mismatch_on_bare_dot() {
    let mut c = Cursor::new(b".");
    assert_eq!(lexer::parse_floating_literal(&mut c).unwrap(), None);
    assert_eq!(c.position(), 0);
}

#[test]
fn string_literal_round_trips_all_escapes() {
    let mut c = Cursor::new(br#""\\\t\n\r""#);
    assert_eq!(lexer::parse_string_literal(&mut c).unwrap(), Some("\\\t\n\r".to_string()));
}

#[test]
fn hex_literal_requires_0x_prefix() {
    let mut c = Cursor::new(b"FF");
    assert_eq!(lexer::parse_hexa_literal(&mut c).unwrap(), None);
}
