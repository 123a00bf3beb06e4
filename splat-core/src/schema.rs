//! PLY vertex schema: declared attribute layout and record stride.
//!
//! 3DGS assets store one `vertex` element whose properties cover position,
//! opacity logits, spherical harmonics, scale and rotation. The schema keeps
//! the full declared property list so unrecognized attributes survive
//! filtering byte-for-byte.

use crate::error::{Result, SplatError};
use std::io::{BufRead, Write};

/// Scalar types allowed in a PLY property declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Float,
    Double,
}

impl ScalarType {
    /// Byte width of one value of this type.
    pub fn size(self) -> usize {
        match self {
            ScalarType::Char | ScalarType::UChar => 1,
            ScalarType::Short | ScalarType::UShort => 2,
            ScalarType::Int | ScalarType::UInt | ScalarType::Float => 4,
            ScalarType::Double => 8,
        }
    }

    /// Parse a PLY type token. Both the classic and sized spellings occur in
    /// the wild (`float` and `float32`, `uchar` and `uint8`, ...).
    pub fn from_ply_name(token: &str) -> Option<Self> {
        match token {
            "char" | "int8" => Some(ScalarType::Char),
            "uchar" | "uint8" => Some(ScalarType::UChar),
            "short" | "int16" => Some(ScalarType::Short),
            "ushort" | "uint16" => Some(ScalarType::UShort),
            "int" | "int32" => Some(ScalarType::Int),
            "uint" | "uint32" => Some(ScalarType::UInt),
            "float" | "float32" => Some(ScalarType::Float),
            "double" | "float64" => Some(ScalarType::Double),
            _ => None,
        }
    }

    /// Canonical type token used when re-emitting a header.
    pub fn ply_name(self) -> &'static str {
        match self {
            ScalarType::Char => "char",
            ScalarType::UChar => "uchar",
            ScalarType::Short => "short",
            ScalarType::UShort => "ushort",
            ScalarType::Int => "int",
            ScalarType::UInt => "uint",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
        }
    }
}

/// One declared per-vertex attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: ScalarType,
}

/// Encoding of the data section following the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Ascii,
    BinaryLittleEndian,
}

/// Ordered attribute layout of the vertex element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub encoding: Encoding,
    pub properties: Vec<Property>,
}

impl Schema {
    /// Total byte width of one record.
    pub fn stride(&self) -> usize {
        self.properties.iter().map(|p| p.ty.size()).sum()
    }

    /// Byte offset and type of a named property within a record.
    pub fn offset_of(&self, name: &str) -> Option<(usize, ScalarType)> {
        let mut offset = 0;
        for prop in &self.properties {
            if prop.name == name {
                return Some((offset, prop.ty));
            }
            offset += prop.ty.size();
        }
        None
    }
}

/// Parse the PLY header from a stream positioned at the magic line.
///
/// Returns the vertex schema and declared row count; the stream is left
/// positioned at the first data byte.
pub fn parse_header<R: BufRead>(reader: &mut R) -> Result<(Schema, usize)> {
    let magic = read_header_line(reader)?;
    if magic.trim() != "ply" {
        return Err(SplatError::MalformedHeader(
            "missing `ply` magic line".to_string(),
        ));
    }

    let mut encoding = None;
    let mut vertex_count: Option<usize> = None;
    let mut properties = Vec::new();
    // Name of the element whose property declarations we are currently inside.
    let mut current_element: Option<String> = None;

    loop {
        let line = read_header_line(reader)?;
        let line = line.trim();
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("comment") | None => continue,
            Some("end_header") => break,
            Some("format") => {
                encoding = Some(match tokens.next() {
                    Some("ascii") => Encoding::Ascii,
                    Some("binary_little_endian") => Encoding::BinaryLittleEndian,
                    Some(other) => {
                        return Err(SplatError::MalformedHeader(format!(
                            "unsupported format `{other}`"
                        )));
                    }
                    None => {
                        return Err(SplatError::MalformedHeader(
                            "format line missing encoding".to_string(),
                        ));
                    }
                });
            }
            Some("element") => {
                let name = tokens.next().ok_or_else(|| {
                    SplatError::MalformedHeader("element line missing name".to_string())
                })?;
                let count_token = tokens.next().ok_or_else(|| {
                    SplatError::MalformedHeader(format!("element `{name}` missing row count"))
                })?;
                let count: i64 = count_token.parse().map_err(|_| {
                    SplatError::MalformedHeader(format!(
                        "element `{name}` has unparseable row count `{count_token}`"
                    ))
                })?;
                if count < 0 {
                    return Err(SplatError::MalformedHeader(format!(
                        "element `{name}` has negative row count {count}"
                    )));
                }

                if name == "vertex" {
                    if vertex_count.is_some() {
                        return Err(SplatError::MalformedHeader(
                            "duplicate vertex element".to_string(),
                        ));
                    }
                    vertex_count = Some(count as usize);
                } else if count > 0 {
                    // Splat assets carry a single vertex element. A populated
                    // face/edge element would shift every data offset.
                    return Err(SplatError::MalformedHeader(format!(
                        "unsupported element `{name}` with {count} rows"
                    )));
                }
                current_element = Some(name.to_string());
            }
            Some("property") => {
                let element = current_element.as_deref().ok_or_else(|| {
                    SplatError::MalformedHeader(
                        "property declared before any element".to_string(),
                    )
                })?;
                if element != "vertex" {
                    continue;
                }
                let type_token = tokens.next().ok_or_else(|| {
                    SplatError::MalformedHeader("property line missing type".to_string())
                })?;
                if type_token == "list" {
                    return Err(SplatError::MalformedHeader(
                        "list properties are not supported for vertex data".to_string(),
                    ));
                }
                let ty = ScalarType::from_ply_name(type_token).ok_or_else(|| {
                    SplatError::MalformedHeader(format!("unknown property type `{type_token}`"))
                })?;
                let name = tokens.next().ok_or_else(|| {
                    SplatError::MalformedHeader("property line missing name".to_string())
                })?;
                properties.push(Property {
                    name: name.to_string(),
                    ty,
                });
            }
            Some(other) => {
                return Err(SplatError::MalformedHeader(format!(
                    "unexpected header line `{other}`"
                )));
            }
        }
    }

    let encoding = encoding.ok_or_else(|| {
        SplatError::MalformedHeader("header declares no format".to_string())
    })?;
    let vertex_count = vertex_count.ok_or_else(|| {
        SplatError::MalformedHeader("header declares no vertex element".to_string())
    })?;
    if properties.is_empty() {
        return Err(SplatError::MalformedHeader(
            "vertex element declares no properties".to_string(),
        ));
    }

    Ok((
        Schema {
            encoding,
            properties,
        },
        vertex_count,
    ))
}

/// Re-declare the header for a filtered table. Output is always
/// binary-little-endian regardless of the source encoding.
pub fn write_header<W: Write>(writer: &mut W, schema: &Schema, rows: usize) -> Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "element vertex {rows}")?;
    for prop in &schema.properties {
        writeln!(writer, "property {} {}", prop.ty.ply_name(), prop.name)?;
    }
    writeln!(writer, "end_header")?;
    Ok(())
}

fn read_header_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = reader.read_line(&mut line)?;
    if read == 0 {
        return Err(SplatError::MalformedHeader(
            "stream ended before end_header".to_string(),
        ));
    }
    Ok(line)
}
