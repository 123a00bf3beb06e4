//! Mask engine: boolean selection vectors from opacity thresholds, percentile
//! crop boxes and random down-sampling.

use crate::error::{Result, SplatError};
use crate::transforms::percentile;
use rand::Rng;

/// Reject opacity thresholds outside [0, 1].
pub fn validate_threshold(threshold: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(SplatError::InvalidConfig(format!(
            "opacity threshold {threshold} outside [0, 1]"
        )));
    }
    Ok(())
}

/// Reject a zero down-sample cap.
pub fn validate_max_points(max_points: usize) -> Result<()> {
    if max_points == 0 {
        return Err(SplatError::InvalidConfig(
            "max_points must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Retain points whose activated opacity is strictly above the threshold.
/// Points exactly at the threshold are dropped.
pub fn opacity_mask(real_opacity: &[f32], threshold: f32) -> Vec<bool> {
    real_opacity
        .iter()
        .map(|&opacity| opacity > threshold)
        .collect()
}

/// Axis-aligned crop box built from per-axis percentile statistics rather
/// than literal extrema, so sparse outlier shells (skybox geometry) fall
/// outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Aabb {
    /// Compute the box from the p_lower/p_upper percentiles of each axis of
    /// the currently active point set. Bounds are independently configurable;
    /// the defaults of the extract pipeline are 5 and 95.
    pub fn from_percentiles(
        x: &[f32],
        y: &[f32],
        z: &[f32],
        p_lower: f64,
        p_upper: f64,
    ) -> Result<Aabb> {
        if !(0.0..=100.0).contains(&p_lower)
            || !(0.0..=100.0).contains(&p_upper)
            || p_lower >= p_upper
        {
            return Err(SplatError::InvalidConfig(format!(
                "percentile bounds {p_lower}/{p_upper} must satisfy 0 <= lower < upper <= 100"
            )));
        }
        if x.len() != y.len() || x.len() != z.len() {
            return Err(SplatError::InvalidConfig(format!(
                "axis columns differ in length: {}/{}/{}",
                x.len(),
                y.len(),
                z.len()
            )));
        }

        let (min_x, max_x) = axis_bounds(x, p_lower, p_upper)?;
        let (min_y, max_y) = axis_bounds(y, p_lower, p_upper)?;
        let (min_z, max_z) = axis_bounds(z, p_lower, p_upper)?;

        Ok(Aabb {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        })
    }

    /// Inclusive containment test on all six faces.
    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        x >= self.min_x
            && x <= self.max_x
            && y >= self.min_y
            && y <= self.max_y
            && z >= self.min_z
            && z <= self.max_z
    }
}

fn axis_bounds(values: &[f32], p_lower: f64, p_upper: f64) -> Result<(f64, f64)> {
    let empty = || {
        SplatError::InvalidConfig(
            "cannot compute percentile bounds of an empty point set".to_string(),
        )
    };
    let lower = percentile(values, p_lower).ok_or_else(empty)?;
    let upper = percentile(values, p_upper).ok_or_else(empty)?;
    Ok((lower, upper))
}

/// Retain points whose coordinates fall inside the box on every axis.
pub fn aabb_mask(x: &[f32], y: &[f32], z: &[f32], aabb: &Aabb) -> Vec<bool> {
    x.iter()
        .zip(y)
        .zip(z)
        .map(|((&x, &y), &z)| aabb.contains(x as f64, y as f64, z as f64))
        .collect()
}

/// Elementwise AND of two index-aligned masks.
pub fn combine(a: &[bool], b: &[bool]) -> Result<Vec<bool>> {
    if a.len() != b.len() {
        return Err(SplatError::InvalidConfig(format!(
            "mask lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b).map(|(&a, &b)| a && b).collect())
}

/// Pick the row indices for the down-sample stage: when the table exceeds
/// `cap`, a uniform random subset of exactly `cap` distinct indices without
/// replacement, otherwise every index. Indices come back ascending so the
/// gathered rows stay a sub-sequence of the input.
pub fn sample_indices<R: Rng + ?Sized>(len: usize, cap: usize, rng: &mut R) -> Result<Vec<usize>> {
    validate_max_points(cap)?;
    if len <= cap {
        return Ok((0..len).collect());
    }

    let mut indices = rand::seq::index::sample(rng, len, cap).into_vec();
    indices.sort_unstable();
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::activate_opacities;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn threshold_mask_is_strict() {
        let mask = opacity_mask(&[0.04, 0.05, 0.050001, 0.9], 0.05);
        assert_eq!(mask, vec![false, false, true, true]);
    }

    #[test]
    fn scenario_four_point_prune_mask() {
        let real = activate_opacities(&[-10.0, 0.0, 2.0, 10.0]);
        let mask = opacity_mask(&real, 0.05);
        assert_eq!(mask, vec![false, true, true, true]);
    }

    #[test]
    fn threshold_validation_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(1.1).is_err());
        assert!(validate_threshold(f32::NAN).is_err());
    }

    #[test]
    fn aabb_from_even_distribution() {
        let axis: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let aabb = Aabb::from_percentiles(&axis, &axis, &axis, 5.0, 95.0).unwrap();

        assert!((aabb.min_x - 4.95).abs() < 1e-9);
        assert!((aabb.max_x - 94.05).abs() < 1e-9);

        let mask = aabb_mask(&axis, &axis, &axis, &aabb);
        for (i, &inside) in mask.iter().enumerate() {
            let coordinate = i as f64;
            let expected = coordinate >= aabb.min_x && coordinate <= aabb.max_x;
            assert_eq!(inside, expected, "index {i}");
        }
        // 5..=94 survive the crop.
        assert_eq!(mask.iter().filter(|&&m| m).count(), 90);
    }

    #[test]
    fn aabb_bounds_are_inclusive() {
        let aabb = Aabb {
            min_x: -1.0,
            max_x: 1.0,
            min_y: -1.0,
            max_y: 1.0,
            min_z: -1.0,
            max_z: 1.0,
        };
        assert!(aabb.contains(1.0, -1.0, 0.0));
        assert!(!aabb.contains(1.0000001, 0.0, 0.0));
        // One out-of-range axis is enough to exclude a point.
        assert!(!aabb.contains(0.0, 0.0, -2.0));
    }

    #[test]
    fn aabb_rejects_bad_percentiles_and_empty_input() {
        let axis = vec![0.0_f32, 1.0];
        assert!(Aabb::from_percentiles(&axis, &axis, &axis, 95.0, 5.0).is_err());
        assert!(Aabb::from_percentiles(&axis, &axis, &axis, -1.0, 95.0).is_err());
        assert!(Aabb::from_percentiles(&axis, &axis, &axis, 5.0, 101.0).is_err());
        assert!(Aabb::from_percentiles(&[], &[], &[], 5.0, 95.0).is_err());
    }

    #[test]
    fn combine_is_elementwise_and() {
        let combined = combine(&[true, true, false], &[true, false, false]).unwrap();
        assert_eq!(combined, vec![true, false, false]);
        assert!(combine(&[true], &[true, false]).is_err());
    }

    #[test]
    fn sample_returns_distinct_sorted_indices() {
        let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);
        let indices = sample_indices(1_000, 100, &mut rng).unwrap();

        assert_eq!(indices.len(), 100);
        let unique: HashSet<usize> = indices.iter().copied().collect();
        assert_eq!(unique.len(), 100);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));
        assert!(indices.iter().all(|&i| i < 1_000));
    }

    #[test]
    fn sample_is_identity_below_cap() {
        let mut rng = StdRng::seed_from_u64(7);
        let indices = sample_indices(10, 50, &mut rng).unwrap();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn sample_is_reproducible_for_a_seed() {
        let a = sample_indices(500, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = sample_indices(500, 20, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sample_rejects_zero_cap() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_indices(10, 0, &mut rng).is_err());
    }
}
