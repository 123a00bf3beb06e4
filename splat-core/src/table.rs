//! In-memory point table: row-major little-endian records plus their schema.

use crate::error::{Result, SplatError};
use crate::schema::{ScalarType, Schema};
use byteorder::{ByteOrder, LittleEndian};

/// Ordered sequence of point records. Rows keep file order; attributes the
/// pipeline does not interpret stay verbatim inside the row bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    schema: Schema,
    rows: usize,
    data: Vec<u8>,
}

impl PointTable {
    /// Wrap raw row bytes. The byte length must match `rows * stride`.
    pub fn new(schema: Schema, rows: usize, data: Vec<u8>) -> Result<Self> {
        let expected = rows * schema.stride();
        if data.len() != expected {
            return Err(SplatError::TruncatedData {
                rows,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { schema, rows, data })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn stride(&self) -> usize {
        self.schema.stride()
    }

    /// Estimated in-memory footprint of the records, rows x stride.
    pub fn byte_footprint(&self) -> usize {
        self.data.len()
    }

    /// Raw record bytes in row order.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, index: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[index * stride..(index + 1) * stride]
    }

    /// Decode a named float32 property into a column.
    pub fn column_f32(&self, name: &str) -> Result<Vec<f32>> {
        let (offset, ty) = self.schema.offset_of(name).ok_or_else(|| {
            SplatError::MalformedHeader(format!("vertex element has no property `{name}`"))
        })?;
        if ty != ScalarType::Float {
            return Err(SplatError::MalformedHeader(format!(
                "property `{name}` is {}, expected float",
                ty.ply_name()
            )));
        }

        let stride = self.stride();
        Ok(self
            .data
            .chunks_exact(stride)
            .map(|row| LittleEndian::read_f32(&row[offset..offset + 4]))
            .collect())
    }

    /// The three spatial coordinate columns.
    pub fn positions(&self) -> Result<(Vec<f32>, Vec<f32>, Vec<f32>)> {
        Ok((
            self.column_f32("x")?,
            self.column_f32("y")?,
            self.column_f32("z")?,
        ))
    }

    /// Keep the rows where `mask` is true, preserving relative order.
    /// Output row count equals the number of true entries.
    pub fn select(&self, mask: &[bool]) -> Result<PointTable> {
        if mask.len() != self.rows {
            return Err(SplatError::InvalidConfig(format!(
                "mask length {} does not match table length {}",
                mask.len(),
                self.rows
            )));
        }

        let stride = self.stride();
        let kept = mask.iter().filter(|&&keep| keep).count();
        let mut data = Vec::with_capacity(kept * stride);
        for (row, &keep) in self.data.chunks_exact(stride).zip(mask) {
            if keep {
                data.extend_from_slice(row);
            }
        }

        Ok(PointTable {
            schema: self.schema.clone(),
            rows: kept,
            data,
        })
    }

    /// Gather the rows at `indices`. Indices must be in range and strictly
    /// increasing so the result stays a sub-sequence of the input.
    pub fn take(&self, indices: &[usize]) -> Result<PointTable> {
        let stride = self.stride();
        let mut data = Vec::with_capacity(indices.len() * stride);
        let mut previous: Option<usize> = None;
        for &index in indices {
            if index >= self.rows {
                return Err(SplatError::InvalidConfig(format!(
                    "row index {index} out of range for table of {} rows",
                    self.rows
                )));
            }
            if previous.is_some_and(|p| p >= index) {
                return Err(SplatError::InvalidConfig(
                    "row indices must be strictly increasing".to_string(),
                ));
            }
            previous = Some(index);
            data.extend_from_slice(self.row(index));
        }

        Ok(PointTable {
            schema: self.schema.clone(),
            rows: indices.len(),
            data,
        })
    }
}
