//! Lexical primitives.
//!
//! Each function takes a [`Cursor`] and returns an advanced cursor plus an
//! optional produced value, one function per OpenDDL token kind:
//! identifier, name, primitive-type keyword, and each literal form.
//!
//! Contract: on soft mismatch the cursor is left at the first
//! non-whitespace byte and `Ok(None)` is returned; on hard error the cursor
//! is at the offending byte and `Err` is returned; on match the cursor
//! advances past the token and `Ok(Some(value))` is returned.

use crate::model::name::{Name, Scope};
use crate::model::primitive::{PrimCell, PrimitiveType};
use crate::parser::cursor::Cursor;
use crate::parser::error::{ErrorKind, ParsingError};

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `parseIdentifier` — a letter/`_` followed by letters/digits/`_`.
pub fn parse_identifier(cursor: &mut Cursor<'_>) -> Result<Option<String>, ParsingError> {
    cursor.skip_whitespace();
    match cursor.peek() {
        Some(b) if is_ident_start(b) => Ok(Some(cursor.consume_while(is_ident_continue))),
        _ => Ok(None),
    }
}

/// `parseName` — `$` (global) or `%` (local) followed by an identifier.
pub fn parse_name(cursor: &mut Cursor<'_>) -> Result<Option<Name>, ParsingError> {
    cursor.skip_whitespace();
    let scope = match cursor.peek() {
        Some(b'$') => Scope::Global,
        Some(b'%') => Scope::Local,
        _ => return Ok(None),
    };
    let start = cursor.position();
    cursor.next();
    match parse_identifier(cursor)? {
        Some(ident) => Ok(Some(Name::new(scope, ident))),
        None => {
            cursor.set_position(start);
            Err(cursor.error(ErrorKind::ExpectedToken))
        }
    }
}

const PRIMITIVE_KEYWORDS: &[&str] = &[
    "unsigned_int8",
    "unsigned_int16",
    "unsigned_int32",
    "unsigned_int64",
    "int8",
    "int16",
    "int32",
    "int64",
    "bool",
    "half",
    "float",
    "double",
    "string",
    "ref",
];

/// `parsePrimitiveDataType` — one of the reserved type keywords, plus an
/// optional `[N]` arity suffix (default arity `1`).
///
/// Longer keywords (`unsigned_int8`) are tried before shorter ones that
/// would otherwise match a prefix of them, since there is no separate
/// `unsigned` + width pair in the grammar.
pub fn parse_primitive_data_type(
    cursor: &mut Cursor<'_>,
) -> Result<Option<(PrimitiveType, usize)>, ParsingError> {
    cursor.skip_whitespace();
    let start = cursor.position();
    let ty = PRIMITIVE_KEYWORDS.iter().find_map(|&kw| {
        if cursor.peek_is_word(kw) {
            let after = cursor.peek_at(kw.len());
            if after.is_none_or(|b| !is_ident_continue(b)) {
                return Some(kw);
            }
        }
        None
    });
    let Some(kw) = ty else {
        return Ok(None);
    };
    cursor.set_position(start + kw.len());
    let primitive = PrimitiveType::from_keyword(kw).expect("keyword table matches PrimitiveType");

    if !cursor.consume_if(b'[') {
        return Ok(Some((primitive, 1)));
    }
    let digits_start = cursor.position();
    let digits = cursor.consume_while(|b| b.is_ascii_digit());
    if digits.is_empty() {
        return Err(cursor.error_at(ErrorKind::InvalidArity, digits_start));
    }
    let arity: usize = digits
        .parse()
        .map_err(|_| cursor.error_at(ErrorKind::InvalidArity, digits_start))?;
    if arity == 0 {
        return Err(cursor.error_at(ErrorKind::InvalidArity, digits_start));
    }
    if !cursor.consume_if(b']') {
        return Err(cursor.error(ErrorKind::ExpectedToken));
    }
    Ok(Some((primitive, arity)))
}

/// `parseBooleanLiteral` — literal `true` or `false`, not followed by
/// another identifier character (so `trueish` is not mistaken for `true`).
pub fn parse_boolean_literal(cursor: &mut Cursor<'_>) -> Result<Option<bool>, ParsingError> {
    cursor.skip_whitespace();
    for (word, value) in [("true", true), ("false", false)] {
        if cursor.peek_is_word(word) {
            let after = cursor.peek_at(word.len());
            if after.is_none_or(|b| !is_ident_continue(b)) {
                cursor.set_position(cursor.position() + word.len());
                return Ok(Some(value));
            }
        }
    }
    Ok(None)
}

fn consume_sign(cursor: &mut Cursor<'_>) -> Option<bool> {
    match cursor.peek() {
        Some(b'-') => {
            cursor.next();
            Some(true)
        }
        Some(b'+') => {
            cursor.next();
            Some(false)
        }
        _ => None,
    }
}

/// `parseIntegerLiteral(targetType)` — optional sign, decimal digits; the
/// magnitude must fit `target_type`'s width or this fails with
/// [`ErrorKind::IntegerRange`].
pub fn parse_integer_literal(
    cursor: &mut Cursor<'_>,
    target_type: PrimitiveType,
) -> Result<Option<PrimCell>, ParsingError> {
    cursor.skip_whitespace();
    let start = cursor.position();
    let negative = consume_sign(cursor).unwrap_or(false);
    let digits_start = cursor.position();
    let digits = cursor.consume_while(|b| b.is_ascii_digit());
    if digits.is_empty() {
        cursor.set_position(start);
        return Ok(None);
    }
    if negative && !target_type.is_signed() {
        return Err(cursor.error_at(ErrorKind::IntegerRange, start));
    }

    let magnitude: i128 = digits
        .parse()
        .map_err(|_| cursor.error_at(ErrorKind::IntegerRange, digits_start))?;
    let value: i128 = if negative { -magnitude } else { magnitude };

    let cell = match target_type {
        PrimitiveType::Int8 => i8::try_from(value).map(PrimCell::Int8).ok(),
        PrimitiveType::Int16 => i16::try_from(value).map(PrimCell::Int16).ok(),
        PrimitiveType::Int32 => i32::try_from(value).map(PrimCell::Int32).ok(),
        PrimitiveType::Int64 => i64::try_from(value).map(PrimCell::Int64).ok(),
        PrimitiveType::UInt8 => u8::try_from(value).map(PrimCell::UInt8).ok(),
        PrimitiveType::UInt16 => u16::try_from(value).map(PrimCell::UInt16).ok(),
        PrimitiveType::UInt32 => u32::try_from(value).map(PrimCell::UInt32).ok(),
        PrimitiveType::UInt64 => u64::try_from(value).map(PrimCell::UInt64).ok(),
        _ => None,
    };
    cell.map(Some)
        .ok_or_else(|| cursor.error_at(ErrorKind::IntegerRange, start))
}

/// `parseFloatingLiteral` — optional sign, integer part, optional
/// fractional part, optional exponent. Always yields a `Double`; narrowing
/// to `Float`/`Half` is the caller's responsibility.
pub fn parse_floating_literal(cursor: &mut Cursor<'_>) -> Result<Option<f64>, ParsingError> {
    cursor.skip_whitespace();
    let start = cursor.position();
    consume_sign(cursor);
    let int_part = cursor.consume_while(|b| b.is_ascii_digit());

    let mut saw_digits = !int_part.is_empty();
    if cursor.peek() == Some(b'.') {
        let dot = cursor.position();
        cursor.next();
        let frac = cursor.consume_while(|b| b.is_ascii_digit());
        if frac.is_empty() && !saw_digits {
            cursor.set_position(start);
            return Ok(None);
        }
        saw_digits = saw_digits || !frac.is_empty();
        let _ = dot;
    }
    if !saw_digits {
        cursor.set_position(start);
        return Ok(None);
    }
    if matches!(cursor.peek(), Some(b'e') | Some(b'E')) {
        let exp_start = cursor.position();
        cursor.next();
        consume_sign(cursor);
        let exp_digits = cursor.consume_while(|b| b.is_ascii_digit());
        if exp_digits.is_empty() {
            cursor.set_position(exp_start);
        }
    }
    let text = String::from_utf8_lossy(cursor.slice_from(start)).into_owned();
    let value: f64 = text
        .parse()
        .map_err(|_| cursor.error_at(ErrorKind::TypeMismatch, start))?;
    Ok(Some(value))
}

/// `parseHexaLiteral` — `0x` prefix, hex digits. Always yields `UInt64`
/// (see `DESIGN.md`); narrowing to a smaller target type is the caller's
/// responsibility.
pub fn parse_hexa_literal(cursor: &mut Cursor<'_>) -> Result<Option<u64>, ParsingError> {
    cursor.skip_whitespace();
    let start = cursor.position();
    if !(cursor.peek() == Some(b'0') && matches!(cursor.peek_at(1), Some(b'x') | Some(b'X'))) {
        return Ok(None);
    }
    cursor.next();
    cursor.next();
    let digits_start = cursor.position();
    let digits = cursor.consume_while(|b| b.is_ascii_hexdigit());
    if digits.is_empty() {
        return Err(cursor.error_at(ErrorKind::IntegerRange, digits_start));
    }
    let value = u64::from_str_radix(&digits, 16)
        .map_err(|_| cursor.error_at(ErrorKind::IntegerRange, start))?;
    Ok(Some(value))
}

/// `parseStringLiteral` — `"`-delimited, with `\\`, `\"`, `\n`, `\t`, `\r`
/// escapes. Unterminated strings fail with [`ErrorKind::UnterminatedString`].
pub fn parse_string_literal(cursor: &mut Cursor<'_>) -> Result<Option<String>, ParsingError> {
    cursor.skip_whitespace();
    if cursor.peek() != Some(b'"') {
        return Ok(None);
    }
    let start = cursor.position();
    cursor.next();
    let mut value = String::new();
    loop {
        match cursor.next() {
            None => return Err(cursor.error_at(ErrorKind::UnterminatedString, start)),
            Some(b'"') => break,
            Some(b'\\') => match cursor.next() {
                Some(b'\\') => value.push('\\'),
                Some(b'"') => value.push('"'),
                Some(b'n') => value.push('\n'),
                Some(b't') => value.push('\t'),
                Some(b'r') => value.push('\r'),
                Some(_) | None => return Err(cursor.error_at(ErrorKind::UnterminatedString, start)),
            },
            Some(b) => value.push(b as char),
        }
    }
    Ok(Some(value))
}

/// `parseReference` — either the `ref { name (, name)* }` form, or a bare
/// comma-separated list of names (used in property position). Returns the
/// flat name list either way; `ref {}` and a bare `null` both yield an
/// empty list.
pub fn parse_reference(cursor: &mut Cursor<'_>) -> Result<Option<Vec<Name>>, ParsingError> {
    cursor.skip_whitespace();
    if cursor.peek_is_word("null") {
        let after = cursor.peek_at(4);
        if after.is_none_or(|b| !is_ident_continue(b)) {
            cursor.set_position(cursor.position() + 4);
            return Ok(Some(Vec::new()));
        }
    }
    let braced = cursor.consume_if_word("ref");
    if braced {
        cursor.skip_whitespace();
        if !cursor.consume_if(b'{') {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
        let names = parse_name_list(cursor)?;
        if !cursor.consume_if(b'}') {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
        return Ok(Some(names));
    }

    match parse_name(cursor) {
        Ok(Some(first)) => {
            let mut names = vec![first];
            loop {
                let before_comma = cursor.position();
                if !cursor.consume_if(b',') {
                    break;
                }
                match parse_name(cursor)? {
                    Some(next) => names.push(next),
                    // Not actually another name in this bare list — the comma
                    // belongs to whatever encloses us (e.g. the next property
                    // in a header's property list), so give it back.
                    None => {
                        cursor.set_position(before_comma);
                        break;
                    }
                }
            }
            Ok(Some(names))
        }
        Ok(None) => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_name_list(cursor: &mut Cursor<'_>) -> Result<Vec<Name>, ParsingError> {
    let mut names = Vec::new();
    cursor.skip_whitespace();
    if cursor.peek_is(b'}') {
        return Ok(names);
    }
    loop {
        match parse_name(cursor)? {
            Some(name) => names.push(name),
            None => return Err(cursor.error(ErrorKind::UnexpectedToken)),
        }
        if !cursor.consume_if(b',') {
            break;
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_requires_letter_or_underscore_start() {
        let mut c = Cursor::new(b"9abc");
        assert_eq!(parse_identifier(&mut c).unwrap(), None);
        let mut c = Cursor::new(b"_abc9");
        assert_eq!(parse_identifier(&mut c).unwrap(), Some("_abc9".to_string()));
    }

    #[test]
    fn name_global_vs_local_sigil() {
        let mut c = Cursor::new(b"$node1");
        let name = parse_name(&mut c).unwrap().unwrap();
        assert_eq!(name.scope(), Scope::Global);
        let mut c = Cursor::new(b"%node1");
        let name = parse_name(&mut c).unwrap().unwrap();
        assert_eq!(name.scope(), Scope::Local);
    }

    #[test]
    fn primitive_type_with_arity() {
        let mut c = Cursor::new(b"float[3]");
        let (ty, arity) = parse_primitive_data_type(&mut c).unwrap().unwrap();
        assert_eq!(ty, PrimitiveType::Float);
        assert_eq!(arity, 3);
    }

    #[test]
    fn primitive_type_prefers_longest_keyword() {
        let mut c = Cursor::new(b"unsigned_int8 {");
        let (ty, _) = parse_primitive_data_type(&mut c).unwrap().unwrap();
        assert_eq!(ty, PrimitiveType::UInt8);
    }

    #[test]
    fn invalid_arity_errors() {
        let mut c = Cursor::new(b"float[0]");
        let err = parse_primitive_data_type(&mut c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArity);
    }

    #[test]
    fn boolean_literal_rejects_partial_match() {
        let mut c = Cursor::new(b"truely");
        assert_eq!(parse_boolean_literal(&mut c).unwrap(), None);
    }

    #[test]
    fn integer_overflow_is_range_error() {
        let mut c = Cursor::new(b"300");
        let err = parse_integer_literal(&mut c, PrimitiveType::Int8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IntegerRange);
    }

    #[test]
    fn negative_unsigned_is_range_error() {
        let mut c = Cursor::new(b"-1");
        let err = parse_integer_literal(&mut c, PrimitiveType::UInt8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IntegerRange);
    }

    #[test]
    fn floating_literal_with_exponent() {
        let mut c = Cursor::new(b"-1.5e2");
        assert_eq!(parse_floating_literal(&mut c).unwrap(), Some(-150.0));
    }

    #[test]
    fn hex_literal_always_u64() {
        let mut c = Cursor::new(b"0xFF");
        assert_eq!(parse_hexa_literal(&mut c).unwrap(), Some(255));
    }

    #[test]
    fn string_literal_escapes() {
        let mut c = Cursor::new(br#""a\nb\"c""#);
        assert_eq!(parse_string_literal(&mut c).unwrap(), Some("a\nb\"c".to_string()));
    }

    #[test]
    fn unterminated_string_errors() {
        let mut c = Cursor::new(br#""abc"#);
        let err = parse_string_literal(&mut c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedString);
    }

    #[test]
    fn reference_braced_form() {
        let mut c = Cursor::new(b"ref { $a, %b }");
        let names = parse_reference(&mut c).unwrap().unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].scope(), Scope::Global);
        assert_eq!(names[1].scope(), Scope::Local);
    }

    #[test]
    fn reference_bare_form() {
        let mut c = Cursor::new(b"$a");
        let names = parse_reference(&mut c).unwrap().unwrap();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn reference_bare_form_backtracks_comma_before_non_name() {
        let mut c = Cursor::new(b"$a, b = 1)");
        let names = parse_reference(&mut c).unwrap().unwrap();
        assert_eq!(names.len(), 1);
        assert_eq!(c.peek(), Some(b','));
    }
}
