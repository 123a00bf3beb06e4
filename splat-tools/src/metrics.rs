//! Before/after asset metrics and the performance summary table.

use std::fs;
use std::io;
use std::path::Path;

const TABLE_WIDTH: usize = 65;

/// Size and count measurements of one asset state.
#[derive(Debug, Clone, Copy)]
pub struct AssetMetrics {
    /// On-disk file size in megabytes.
    pub file_mb: f64,
    /// Number of Gaussian records.
    pub points: usize,
    /// Estimated in-memory footprint (records x stride) in megabytes.
    pub footprint_mb: f64,
}

impl AssetMetrics {
    pub fn measure(path: &Path, points: usize, byte_footprint: usize) -> io::Result<Self> {
        Ok(Self {
            file_mb: file_size_mb(path)?,
            points,
            footprint_mb: mb(byte_footprint),
        })
    }
}

pub fn file_size_mb(path: &Path) -> io::Result<f64> {
    Ok(mb(fs::metadata(path)?.len() as usize))
}

pub fn mb(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Percentage reduction from `before` to `after`.
pub fn reduction(before: f64, after: f64) -> f64 {
    (1.0 - after / before) * 100.0
}

/// Group a count with thousands separators for the summary table.
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Print the before/after comparison table.
pub fn print_comparison(raw: &AssetMetrics, optimized: &AssetMetrics) {
    let size_reduction = reduction(raw.file_mb, optimized.file_mb);
    let count_reduction = reduction(raw.points as f64, optimized.points as f64);
    let vram_reduction = reduction(raw.footprint_mb, optimized.footprint_mb);

    println!();
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!("{:^TABLE_WIDTH$}", "PERFORMANCE METRICS");
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!(
        "{:<22} | {:<12} | {:<12} | {}",
        "Metric", "Raw Asset", "Optimized", "Reduction"
    );
    println!("{}", "-".repeat(TABLE_WIDTH));
    println!(
        "{:<22} | {:>8.2} MB | {:>9.2} MB | {:>7.2}%",
        "File Size", raw.file_mb, optimized.file_mb, size_reduction
    );
    println!(
        "{:<22} | {:>11} | {:>12} | {:>7.2}%",
        "Gaussian Count",
        group_thousands(raw.points),
        group_thousands(optimized.points),
        count_reduction
    );
    println!(
        "{:<22} | {:>8.2} MB | {:>9.2} MB | {:>7.2}%",
        "VRAM Footprint (Est)", raw.footprint_mb, optimized.footprint_mb, vram_reduction
    );
    println!("{}", "=".repeat(TABLE_WIDTH));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn reduction_percentages() {
        assert!((reduction(100.0, 25.0) - 75.0).abs() < 1e-9);
        assert!((reduction(10.0, 10.0)).abs() < 1e-9);
    }

    #[test]
    fn megabyte_conversion() {
        assert!((mb(1024 * 1024) - 1.0).abs() < 1e-12);
    }
}
