//! Core pipeline for 3D Gaussian Splatting PLY assets.
//!
//! The crate decodes attributed vertex-record streams into in-memory tables,
//! derives per-point quantities (opacity activation, percentile crop boxes,
//! SH-DC color recovery), applies boolean selection masks and re-serializes
//! filtered tables in the same record layout:
//!
//! - `schema`: typed attribute layout and PLY header grammar
//! - `reader` / `writer`: asset decode and encode
//! - `table`: row-major point table with order-preserving selection
//! - `transforms`: pure per-column numeric maps
//! - `mask`: threshold, crop-box and down-sample selection vectors

pub mod error;
pub mod mask;
pub mod reader;
pub mod schema;
pub mod table;
pub mod transforms;
pub mod writer;

pub use error::{Result, SplatError};
pub use table::PointTable;
