//! Schema-free traversal of a serialized stream.
//!
//! One walk over the wire types, tracking object nesting depth, backs three operations:
//! [`validate`], [`skip_object`] and [`dump`].
//! The walk only knows the wire format, so it works on data of any serializer.

use crate::wire::{ObjectStart, SerialReader, WireType};
use crate::{SerialError, SerialResult};
use itertools::Itertools;
use std::fmt::Write;

const INDENT: &str = "    ";
const MAX_BYTES_TO_DUMP: usize = 32;
const POSITION_MARKER: &str = " <<<";

/// One unit as seen by the walk.
#[derive(PartialEq, Clone, Debug)]
pub enum Unit {
    Byte(u8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Null,
    Str(String),
    Bytes(Vec<u8>),
    ObjectStart(ObjectStart),
    ObjectEnd,
}

#[derive(PartialEq, Eq, Clone, Copy)]
enum Until {
    /// The end of the input. Any object still open is a fault.
    Eof,
    /// The first object, which the walk starts at, has closed.
    FirstObjectClosed,
    /// In front of the end marker of the object the walk started inside of.
    EnclosingObjectEnd,
}

/// Receives every unit the walk consumes.
/// `depth` is the nesting depth outside of the unit; `end_pos` is the reader position after it.
trait Visitor {
    fn visit(&mut self, depth: usize, unit: &Unit, end_pos: usize);
}

struct NoopVisitor;
impl Visitor for NoopVisitor {
    fn visit(&mut self, _: usize, _: &Unit, _: usize) {}
}

fn walk<V: Visitor>(r: &mut SerialReader, until: Until, visitor: &mut V) -> SerialResult<()> {
    let mut depth: usize = 0;
    loop {
        let unit = match r.peek_type() {
            WireType::EOF => {
                if depth > 0 {
                    return Err(SerialError::structural(
                        "Object start with no matching object end.",
                    ));
                }
                return Ok(());
            }
            WireType::EndObject => {
                if depth == 0 {
                    if until == Until::EnclosingObjectEnd {
                        return Ok(());
                    }
                    return Err(SerialError::structural(
                        "Object end with no matching object start.",
                    ));
                }
                r.read_object_end()?;
                depth -= 1;
                visitor.visit(depth, &Unit::ObjectEnd, r.position());
                if depth == 0 && until == Until::FirstObjectClosed {
                    return Ok(());
                }
                continue;
            }
            WireType::StartObject | WireType::StartObjectDebug => {
                let start = r.read_debug_object_start()?;
                visitor.visit(depth, &Unit::ObjectStart(start), r.position());
                depth += 1;
                continue;
            }
            WireType::Byte => Unit::Byte(r.read_byte()?),
            WireType::Int => Unit::Int(r.read_int()?),
            WireType::Long => Unit::Long(r.read_long()?),
            WireType::Float => Unit::Float(r.read_float()?),
            WireType::Double => Unit::Double(r.read_double()?),
            WireType::Boolean => Unit::Boolean(r.read_boolean()?),
            WireType::Null => {
                r.read_null()?;
                Unit::Null
            }
            WireType::StringAscii | WireType::StringUtf8 => Unit::Str(r.read_string()?),
            WireType::ByteArray => Unit::Bytes(r.read_bytes()?),
            WireType::Unknown => {
                let tag = r
                    .peek_tag()
                    .map(|tag| tag.to_string())
                    .unwrap_or_default();
                return Err(SerialError::structural(format!("Unknown type: {tag}.")));
            }
        };
        visitor.visit(depth, &unit, r.position());
    }
}

/// Checks that `bytes` is a well-formed stream: every unit decodes and object markers balance.
pub fn validate(bytes: &[u8]) -> SerialResult<()> {
    validate_stream(&mut SerialReader::new(bytes))
}

/// Like [`validate`], from the reader's current position to the end.
pub fn validate_stream(r: &mut SerialReader) -> SerialResult<()> {
    walk(r, Until::Eof, &mut NoopVisitor)
}

/// Skips one object, e.g. one whose serializer is unknown to the reader.
///
/// A null unit counts as an absent object and is consumed alone.
/// Anything other than an object start is a fault.
/// On success the cursor is just past the object's matching end marker.
pub fn skip_object(r: &mut SerialReader) -> SerialResult<()> {
    let wire_type = r.peek_type();
    if wire_type == WireType::Null {
        return r.read_null();
    }
    if !wire_type.is_object_start() {
        return Err(SerialError::structural(format!(
            "skip_object can only skip objects, expected start object header but found {wire_type}."
        )));
    }
    walk(r, Until::FirstObjectClosed, &mut NoopVisitor)
}

/// Skips the rest of the fields of the object the cursor is inside of,
/// stopping in front of that object's end marker.
pub fn skip_remaining_fields(r: &mut SerialReader) -> SerialResult<()> {
    walk(r, Until::EnclosingObjectEnd, &mut NoopVisitor)
}

struct DumpVisitor {
    out: String,
    mark_at: Option<usize>,
    include_values: bool,
}

impl DumpVisitor {
    fn write_unit(&mut self, unit: &Unit) -> std::fmt::Result {
        let out = &mut self.out;
        if !self.include_values {
            return match unit {
                Unit::Byte(_) => write!(out, "Byte"),
                Unit::Int(_) => write!(out, "Integer"),
                Unit::Long(_) => write!(out, "Long"),
                Unit::Float(_) => write!(out, "Float"),
                Unit::Double(_) => write!(out, "Double"),
                Unit::Boolean(_) => write!(out, "Boolean"),
                Unit::Str(s) => write!(out, "String ({})", s.encode_utf16().count()),
                Unit::Bytes(b) => write!(out, "byte[] ({})", b.len()),
                _ => Self::write_structure(out, unit),
            };
        }
        match unit {
            Unit::Byte(v) => write!(out, "Byte: {v}"),
            Unit::Int(v) => write!(out, "Integer: {v}"),
            Unit::Long(v) => write!(out, "Long: {v}"),
            Unit::Float(v) => write!(out, "Float: {v:?}"),
            Unit::Double(v) => write!(out, "Double: {v:?}"),
            Unit::Boolean(v) => write!(out, "Boolean: {v}"),
            Unit::Str(s) => write!(out, "String: \"{}\"", s.replace('\n', "\\n")),
            Unit::Bytes(b) => {
                let hex = b
                    .iter()
                    .take(MAX_BYTES_TO_DUMP)
                    .map(|byte| format!("{byte:02x}"))
                    .join("");
                write!(out, "byte[]: \"{hex}")?;
                if b.len() > MAX_BYTES_TO_DUMP {
                    write!(out, "... {} more bytes", b.len() - MAX_BYTES_TO_DUMP)?;
                }
                write!(out, "\"")
            }
            _ => Self::write_structure(out, unit),
        }
    }

    fn write_structure(out: &mut String, unit: &Unit) -> std::fmt::Result {
        match unit {
            Unit::ObjectStart(ObjectStart {
                version,
                class_name,
            }) => {
                let name = class_name.as_deref().unwrap_or("Unknown type");
                write!(out, "Object: {name}, v{version} {{")
            }
            Unit::ObjectEnd => write!(out, "}}"),
            _ => write!(out, "null"),
        }
    }
}

impl Visitor for DumpVisitor {
    fn visit(&mut self, depth: usize, unit: &Unit, end_pos: usize) {
        self.out.push_str(&INDENT.repeat(depth + 1));
        // Writing into a String does not fail.
        let _ = self.write_unit(unit);
        if let Some(mark_at) = self.mark_at {
            if mark_at < end_pos {
                self.out.push_str(POSITION_MARKER);
                self.mark_at = None;
            }
        }
        self.out.push('\n');
    }
}

/// Renders `bytes` as indented text, one unit per line.
///
/// `mark_at` flags the unit that contains that byte offset with ` <<<`.
/// Without `include_values` only the kinds of the units, and the lengths of strings and
/// byte arrays, are shown.
/// A malformed stream renders up to the fault, followed by an `ERROR:` line.
pub fn dump(bytes: &[u8], mark_at: Option<usize>, include_values: bool) -> String {
    let mut visitor = DumpVisitor {
        out: String::from("{\n"),
        mark_at,
        include_values,
    };
    let res = walk(&mut SerialReader::new(bytes), Until::Eof, &mut visitor);
    let mut out = visitor.out;
    match res {
        Ok(()) => out.push('}'),
        Err(e) => {
            out.push_str("ERROR: ");
            out.push_str(&e.to_string());
        }
    }
    out
}

/// [`dump`] with values and no marker.
pub fn dump_all(bytes: &[u8]) -> String {
    dump(bytes, None, true)
}
