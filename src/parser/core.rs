//! Parser core: drives the OpenDDL grammar.

use crate::buffer;
use crate::log::{self, LogSink, Severity};
use crate::model::identifier::Identifier;
use crate::model::name::Name;
use crate::model::node::{NodeId, Payload, Tree};
use crate::model::primitive::{PrimCell, PrimitiveType};
use crate::model::property::{Property, PropertyValue};
use crate::model::reference::Reference;
use crate::parser::cursor::Cursor;
use crate::parser::error::{ErrorKind, ParsingError};
use crate::parser::lexer;

/// Tunables for a [`Parser`] instance.
///
/// `max_depth` bounds structure nesting, guarding the explicit parse stack
/// against pathologically deep input.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig { max_depth: 256 }
    }
}

/// The OpenDDL parser.
///
/// Holds the owned input buffer, an optional diagnostic sink, the
/// resulting [`Tree`], and the explicit parse stack (a plain `Vec<NodeId>`)
/// used while a parse is in progress; the stack itself is an
/// implementation detail, not part of the public surface.
pub struct Parser {
    buf: Vec<u8>,
    owns_buf: bool,
    log_sink: Option<LogSink>,
    config: ParserConfig,
    tree: Tree,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// An empty parser with no buffer set.
    pub fn new() -> Self {
        Parser {
            buf: Vec::new(),
            owns_buf: true,
            log_sink: None,
            config: ParserConfig::default(),
            tree: Tree::new(),
        }
    }

    /// Builds a parser over `buf`. `owns_it` is recorded for API parity but
    /// has no behavioral effect: identifier and string bytes are always
    /// copied into node-owned storage, so the tree never borrows from `buf`
    /// regardless of ownership.
    pub fn with_buffer(buf: Vec<u8>, owns_it: bool) -> Self {
        Parser {
            buf,
            owns_buf: owns_it,
            log_sink: None,
            config: ParserConfig::default(),
            tree: Tree::new(),
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a diagnostic callback.
    pub fn set_log_callback(&mut self, cb: impl FnMut(Severity, &str) + 'static) {
        self.log_sink = Some(Box::new(cb));
    }

    pub fn clear_log_callback(&mut self) {
        self.log_sink = None;
    }

    pub fn set_buffer(&mut self, buf: Vec<u8>, owns_it: bool) {
        self.buf = buf;
        self.owns_buf = owns_it;
        self.tree = Tree::new();
    }

    pub fn get_buffer(&self) -> &[u8] {
        &self.buf
    }

    pub fn buffer_size(&self) -> usize {
        self.buf.len()
    }

    pub fn owns_buffer(&self) -> bool {
        self.owns_buf
    }

    /// Discards the buffer and any parsed tree.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.tree = Tree::new();
    }

    /// The synthetic root of the parsed tree.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    fn log(&mut self, severity: Severity, message: &str) {
        log::emit(&mut self.log_sink, severity, message);
    }

    /// Runs the parse to completion: returns `true` on full-buffer success,
    /// `false` on any hard error (a single `Error`-severity diagnostic has
    /// already been logged for the first failure encountered).
    pub fn parse(&mut self) -> bool {
        let mut buf = std::mem::take(&mut self.buf);
        let mut warnings: Vec<String> = Vec::new();
        let result = (|| -> Result<Tree, ParsingError> {
            buffer::normalize(&mut buf)?;
            let mut cursor = Cursor::new(&buf);
            let mut tree = Tree::new();
            let mut stack: Vec<NodeId> = vec![tree.root()];

            cursor.skip_whitespace();
            while !cursor.is_eof() {
                parse_next_node(&mut cursor, &mut tree, &mut stack, self.config.max_depth, &mut warnings)?;
                cursor.skip_whitespace();
            }
            if stack.len() != 1 {
                return Err(cursor.error(ErrorKind::ExpectedToken));
            }
            Ok(tree)
        })();

        self.buf = buf;
        for warning in &warnings {
            self.log(Severity::Warn, warning);
        }
        match result {
            Ok(tree) => {
                self.tree = tree;
                true
            }
            Err(err) => {
                self.log(Severity::Error, &err.to_string());
                false
            }
        }
    }
}

/// `parseNextNode` — parses one declaration and attaches it under the
/// current stack top.
fn parse_next_node(
    cursor: &mut Cursor<'_>,
    tree: &mut Tree,
    stack: &mut Vec<NodeId>,
    max_depth: usize,
    warnings: &mut Vec<String>,
) -> Result<(), ParsingError> {
    let before = cursor.position();
    let parent = *stack.last().expect("stack always has a parent while parsing");

    if let Some((ty, arity)) = lexer::parse_primitive_data_type(cursor)? {
        let name = lexer::parse_name(cursor)?;
        let properties = parse_property_list(cursor)?;
        let values = parse_data_payload(cursor, ty, arity, warnings)?;
        let payload = Payload::Primitive {
            ty,
            arity: if arity == 1 { None } else { Some(arity) },
            values,
        };
        tree.push_child(parent, Some(Identifier::new(ty.keyword().unwrap())), name, properties, payload);
    } else {
        let (identifier, name, properties) = parse_header(cursor)?;
        let node = tree.push_child(parent, Some(identifier), name, properties, Payload::Structure);

        cursor.skip_whitespace();
        if !cursor.consume_if(b'{') {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
        if stack.len() >= max_depth {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
        stack.push(node);
        cursor.skip_whitespace();
        while !cursor.peek_is(b'}') {
            if cursor.is_eof() {
                return Err(cursor.error(ErrorKind::ExpectedToken));
            }
            parse_next_node(cursor, tree, stack, max_depth, warnings)?;
            cursor.skip_whitespace();
        }
        cursor.consume_if(b'}');
        stack.pop();
    }

    if cursor.position() == before {
        return Err(cursor.error(ErrorKind::NoProgress));
    }
    Ok(())
}

/// `parseHeader` — identifier, optional name, optional property list.
fn parse_header(
    cursor: &mut Cursor<'_>,
) -> Result<(Identifier, Option<Name>, Vec<Property>), ParsingError> {
    let identifier = match lexer::parse_identifier(cursor)? {
        Some(text) => Identifier::new(text),
        None => return Err(cursor.error(ErrorKind::ExpectedToken)),
    };
    let name = lexer::parse_name(cursor)?;
    let properties = parse_property_list(cursor)?;
    Ok((identifier, name, properties))
}

/// The optional `( prop (, prop)* )` tail of a header, shared by both the
/// custom-structure and primitive-list branches of `parseNextNode` — a
/// `DdlNode`'s property list is a general attribute (spec.md §3), not
/// custom-structure-only. Yields an empty list when no `(` follows.
fn parse_property_list(cursor: &mut Cursor<'_>) -> Result<Vec<Property>, ParsingError> {
    let mut properties = Vec::new();
    cursor.skip_whitespace();
    if cursor.consume_if(b'(') {
        cursor.skip_whitespace();
        if !cursor.peek_is(b')') {
            loop {
                properties.push(parse_property(cursor)?);
                if !cursor.consume_if(b',') {
                    break;
                }
            }
        }
        if !cursor.consume_if(b')') {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
    }
    Ok(properties)
}

/// A single `identifier = (literal | name | ref-block)` property.
fn parse_property(cursor: &mut Cursor<'_>) -> Result<Property, ParsingError> {
    let identifier = match lexer::parse_identifier(cursor)? {
        Some(text) => Identifier::new(text),
        None => return Err(cursor.error(ErrorKind::ExpectedToken)),
    };
    cursor.skip_whitespace();
    if !cursor.consume_if(b'=') {
        return Err(cursor.error(ErrorKind::ExpectedToken));
    }
    let value = parse_property_value(cursor)?;
    Ok(Property::new(identifier, value))
}

/// Property values have no declared type to parse against, unlike payload
/// cells inside a primitive data list — so this tries each literal kind in
/// turn rather than dispatching on a known `PrimitiveType`.
fn parse_property_value(cursor: &mut Cursor<'_>) -> Result<PropertyValue, ParsingError> {
    if let Some(s) = lexer::parse_string_literal(cursor)? {
        return Ok(PropertyValue::Primitive(PrimCell::String(s)));
    }
    if let Some(b) = lexer::parse_boolean_literal(cursor)? {
        return Ok(PropertyValue::Primitive(PrimCell::Bool(b)));
    }
    if let Some(v) = lexer::parse_hexa_literal(cursor)? {
        return Ok(PropertyValue::Primitive(PrimCell::UInt64(v)));
    }
    if looks_like_number(cursor) {
        if is_floating_lookahead(cursor) {
            if let Some(v) = lexer::parse_floating_literal(cursor)? {
                return Ok(PropertyValue::Primitive(PrimCell::Double(v)));
            }
        } else if let Some(cell) = lexer::parse_integer_literal(cursor, PrimitiveType::Int64)? {
            return Ok(PropertyValue::Primitive(cell));
        }
    }
    if let Some(names) = lexer::parse_reference(cursor)? {
        return Ok(PropertyValue::Reference(Reference::new(names)));
    }
    Err(cursor.error(ErrorKind::UnexpectedToken))
}

fn looks_like_number(cursor: &mut Cursor<'_>) -> bool {
    cursor.skip_whitespace();
    let mut offset = 0;
    if matches!(cursor.peek_at(0), Some(b'+') | Some(b'-')) {
        offset += 1;
    }
    matches!(cursor.peek_at(offset), Some(b) if b.is_ascii_digit())
}

/// Looks ahead (without consuming) to decide whether the upcoming numeral
/// contains a `.`/`e`/`E` before any non-numeral byte, in which case it
/// should be parsed as a floating literal rather than an integer.
fn is_floating_lookahead(cursor: &mut Cursor<'_>) -> bool {
    cursor.skip_whitespace();
    let mut offset = 0;
    if matches!(cursor.peek_at(offset), Some(b'+') | Some(b'-')) {
        offset += 1;
    }
    loop {
        match cursor.peek_at(offset) {
            Some(b) if b.is_ascii_digit() => offset += 1,
            Some(b'.') | Some(b'e') | Some(b'E') => return true,
            _ => return false,
        }
    }
}

/// `parseDataList` / `parseDataArrayList` — populates a primitive node's
/// payload, dispatching on whether the declared arity is `1` (flat list)
/// or greater (list of fixed-size groups).
fn parse_data_payload(
    cursor: &mut Cursor<'_>,
    ty: PrimitiveType,
    arity: usize,
    warnings: &mut Vec<String>,
) -> Result<Vec<PrimCell>, ParsingError> {
    cursor.skip_whitespace();
    if !cursor.consume_if(b'{') {
        return Err(cursor.error(ErrorKind::ExpectedToken));
    }
    let values = if arity == 1 {
        parse_literal_list(cursor, ty, b'}', warnings)?
    } else {
        parse_group_list(cursor, ty, arity, warnings)?
    };
    if !cursor.consume_if(b'}') {
        return Err(cursor.error(ErrorKind::ExpectedToken));
    }
    Ok(values)
}

/// Parses `literal (, literal)*` up to (not including) `closing`, rejecting
/// a trailing comma (see `DESIGN.md`'s Open Question decisions).
fn parse_literal_list(
    cursor: &mut Cursor<'_>,
    ty: PrimitiveType,
    closing: u8,
    warnings: &mut Vec<String>,
) -> Result<Vec<PrimCell>, ParsingError> {
    let mut values = Vec::new();
    cursor.skip_whitespace();
    if cursor.peek_is(closing) {
        return Ok(values);
    }
    loop {
        values.push(parse_typed_literal(cursor, ty, warnings)?);
        cursor.skip_whitespace();
        if cursor.consume_if(b',') {
            cursor.skip_whitespace();
            if cursor.peek_is(closing) {
                return Err(cursor.error(ErrorKind::UnexpectedToken));
            }
            continue;
        }
        break;
    }
    Ok(values)
}

fn parse_group_list(
    cursor: &mut Cursor<'_>,
    ty: PrimitiveType,
    arity: usize,
    warnings: &mut Vec<String>,
) -> Result<Vec<PrimCell>, ParsingError> {
    let mut values = Vec::new();
    cursor.skip_whitespace();
    if cursor.peek_is(b'}') {
        return Ok(values);
    }
    loop {
        cursor.skip_whitespace();
        if !cursor.consume_if(b'{') {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
        let group = parse_literal_list(cursor, ty, b'}', warnings)?;
        if group.len() != arity {
            return Err(cursor.error(ErrorKind::ArityMismatch));
        }
        if !cursor.consume_if(b'}') {
            return Err(cursor.error(ErrorKind::ExpectedToken));
        }
        values.extend(group);

        cursor.skip_whitespace();
        if cursor.consume_if(b',') {
            cursor.skip_whitespace();
            if cursor.peek_is(b'}') {
                return Err(cursor.error(ErrorKind::UnexpectedToken));
            }
            continue;
        }
        break;
    }
    Ok(values)
}

/// Parses one literal of exactly `ty`'s kind, dispatching per primitive type.
///
/// Narrowing a parsed `f64` down to `Float`/`Half`'s `f32` storage
/// (spec.md §4.2 yields a `Double` by default; narrowing is the caller's
/// responsibility) can lose precision. When the narrowed value doesn't
/// round-trip exactly back to the parsed `f64`, a diagnostic is queued at
/// `Warn` severity (spec.md §7) rather than silently dropping bits.
fn parse_typed_literal(
    cursor: &mut Cursor<'_>,
    ty: PrimitiveType,
    warnings: &mut Vec<String>,
) -> Result<PrimCell, ParsingError> {
    match ty {
        PrimitiveType::Bool => lexer::parse_boolean_literal(cursor)?
            .map(PrimCell::Bool)
            .ok_or_else(|| cursor.error(ErrorKind::TypeMismatch)),
        PrimitiveType::Half | PrimitiveType::Float | PrimitiveType::Double => {
            let start = cursor.position();
            let value = lexer::parse_floating_literal(cursor)?
                .ok_or_else(|| cursor.error(ErrorKind::TypeMismatch))?;
            Ok(match ty {
                PrimitiveType::Half => PrimCell::Half(narrow_to_f32(value, ty, start, warnings)),
                PrimitiveType::Float => PrimCell::Float(narrow_to_f32(value, ty, start, warnings)),
                PrimitiveType::Double => PrimCell::Double(value),
                _ => unreachable!(),
            })
        }
        PrimitiveType::String => lexer::parse_string_literal(cursor)?
            .map(PrimCell::String)
            .ok_or_else(|| cursor.error(ErrorKind::TypeMismatch)),
        PrimitiveType::Ref => lexer::parse_name(cursor)?
            .map(PrimCell::Ref)
            .ok_or_else(|| cursor.error(ErrorKind::TypeMismatch)),
        _ if ty.is_integer() => {
            if let Some(hex) = try_hex_for(cursor, ty)? {
                return Ok(hex);
            }
            lexer::parse_integer_literal(cursor, ty)?
                .ok_or_else(|| cursor.error(ErrorKind::TypeMismatch))
        }
        PrimitiveType::None => Err(cursor.error(ErrorKind::TypeMismatch)),
    }
}

/// Narrows a parsed `f64` to `f32` for a `Float`/`Half` payload cell,
/// queuing a `Warn`-severity diagnostic (spec.md §7) when the narrowed
/// value, widened back, doesn't exactly reproduce the original — i.e. the
/// narrowing actually dropped precision rather than being a no-op.
fn narrow_to_f32(value: f64, ty: PrimitiveType, start: usize, warnings: &mut Vec<String>) -> f32 {
    let narrowed = value as f32;
    if narrowed as f64 != value {
        warnings.push(format!(
            "rounding {value} to {narrowed} storing a double into a {ty} payload at byte {start}"
        ));
    }
    narrowed
}

/// Hex literals are accepted wherever an integer literal is, narrowed down
/// to the target width; `None` means no `0x` prefix was present, so the
/// caller should fall back to decimal parsing.
fn try_hex_for(cursor: &mut Cursor<'_>, ty: PrimitiveType) -> Result<Option<PrimCell>, ParsingError> {
    let start = cursor.position();
    let Some(value) = lexer::parse_hexa_literal(cursor)? else {
        return Ok(None);
    };
    let cell = match ty {
        PrimitiveType::UInt8 => u8::try_from(value).map(PrimCell::UInt8).ok(),
        PrimitiveType::UInt16 => u16::try_from(value).map(PrimCell::UInt16).ok(),
        PrimitiveType::UInt32 => u32::try_from(value).map(PrimCell::UInt32).ok(),
        PrimitiveType::UInt64 => Some(PrimCell::UInt64(value)),
        PrimitiveType::Int8 => i8::try_from(value).map(PrimCell::Int8).ok(),
        PrimitiveType::Int16 => i16::try_from(value).map(PrimCell::Int16).ok(),
        PrimitiveType::Int32 => i32::try_from(value).map(PrimCell::Int32).ok(),
        PrimitiveType::Int64 => i64::try_from(value).map(PrimCell::Int64).ok(),
        _ => None,
    };
    cell.map(Some).ok_or_else(|| cursor.error_at(ErrorKind::IntegerRange, start))
}
