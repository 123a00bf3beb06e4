//! Asset writer: serialize a (filtered) point table back to binary PLY.

use crate::error::Result;
use crate::schema::write_header;
use crate::table::PointTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the table as a binary-little-endian PLY asset, re-declaring the
/// header with the current row count. The writer receives an already
/// filtered table; it computes no masks or metrics of its own.
pub fn write_ply(path: &Path, table: &PointTable) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_header(&mut writer, table.schema(), table.len())?;
    writer.write_all(table.bytes())?;
    writer.flush()?;

    Ok(())
}
