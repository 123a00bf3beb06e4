//! Asset reader: PLY stream to in-memory point table.

use crate::error::{Result, SplatError};
use crate::schema::{parse_header, Encoding, ScalarType, Schema};
use crate::table::PointTable;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Read a PLY point-cloud asset into a table of all declared attributes.
///
/// ASCII and binary-little-endian payloads are both accepted; rows are
/// normalized to little-endian bytes in memory either way, so the writer
/// can re-serialize them without re-encoding.
pub fn read_ply(path: &Path) -> Result<PointTable> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let (schema, rows) = parse_header(&mut reader)?;

    match schema.encoding {
        Encoding::BinaryLittleEndian => read_binary(reader, schema, rows),
        Encoding::Ascii => read_ascii(reader, schema, rows),
    }
}

fn read_binary<R: Read>(mut reader: R, schema: Schema, rows: usize) -> Result<PointTable> {
    let expected = rows * schema.stride();
    let mut data = Vec::with_capacity(expected);
    reader.read_to_end(&mut data)?;

    if data.len() < expected {
        return Err(SplatError::TruncatedData {
            rows,
            expected,
            actual: data.len(),
        });
    }
    // Trailing bytes past the declared rows are ignored.
    data.truncate(expected);

    PointTable::new(schema, rows, data)
}

fn read_ascii<R: BufRead>(mut reader: R, schema: Schema, rows: usize) -> Result<PointTable> {
    let expected = rows * schema.stride();
    let mut data = Vec::with_capacity(expected);
    let mut line = String::new();

    for row in 0..rows {
        // Skip blank lines between records.
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(SplatError::TruncatedData {
                    rows,
                    expected,
                    actual: data.len(),
                });
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        let mut tokens = line.split_whitespace();
        for prop in &schema.properties {
            let token = tokens.next().ok_or_else(|| {
                SplatError::MalformedHeader(format!(
                    "row {row}: missing value for property `{}`",
                    prop.name
                ))
            })?;
            encode_ascii_scalar(token, prop.ty, &mut data).map_err(|_| {
                SplatError::MalformedHeader(format!(
                    "row {row}: unparseable {} value `{token}` for property `{}`",
                    prop.ty.ply_name(),
                    prop.name
                ))
            })?;
        }
    }

    PointTable::new(schema, rows, data)
}

/// Encode one ASCII token as the little-endian bytes of its declared type.
fn encode_ascii_scalar(token: &str, ty: ScalarType, out: &mut Vec<u8>) -> std::result::Result<(), ()> {
    match ty {
        ScalarType::Char => out.extend_from_slice(&token.parse::<i8>().map_err(drop)?.to_le_bytes()),
        ScalarType::UChar => out.extend_from_slice(&token.parse::<u8>().map_err(drop)?.to_le_bytes()),
        ScalarType::Short => out.extend_from_slice(&token.parse::<i16>().map_err(drop)?.to_le_bytes()),
        ScalarType::UShort => out.extend_from_slice(&token.parse::<u16>().map_err(drop)?.to_le_bytes()),
        ScalarType::Int => out.extend_from_slice(&token.parse::<i32>().map_err(drop)?.to_le_bytes()),
        ScalarType::UInt => out.extend_from_slice(&token.parse::<u32>().map_err(drop)?.to_le_bytes()),
        ScalarType::Float => out.extend_from_slice(&token.parse::<f32>().map_err(drop)?.to_le_bytes()),
        ScalarType::Double => out.extend_from_slice(&token.parse::<f64>().map_err(drop)?.to_le_bytes()),
    }
    Ok(())
}
