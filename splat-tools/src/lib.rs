//! Shared support for the `prune` and `extract` binaries: metrics tables
//! and the standalone HTML scatter export.

pub mod metrics;
pub mod viewer;
