//! Per-column numeric transforms: opacity activation, percentile statistics
//! and spherical-harmonics DC color recovery.
//!
//! Every function here is a pure map over its input; non-finite values
//! propagate per IEEE-754 instead of raising.

use rayon::prelude::*;

/// Zeroth-order real spherical harmonic basis factor, Y00 = 1/(2*sqrt(pi)).
/// Kept at the precision splat renderers agree on rather than derived.
pub const SH_C0: f32 = 0.28209479;

/// Logistic sigmoid mapping a stored opacity logit to a (0, 1) probability.
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Activate a whole opacity column.
pub fn activate_opacities(raw: &[f32]) -> Vec<f32> {
    raw.par_iter().map(|&logit| sigmoid(logit)).collect()
}

/// Percentile of a sample using the linear interpolation definition: the
/// value at fractional rank `p / 100 * (n - 1)`, interpolated between the
/// adjacent order statistics. Returns `None` for an empty sample.
pub fn percentile(values: &[f32], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }

    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Recover one diffuse color channel from its SH DC coefficients:
/// `clamp(dc * SH_C0 + 0.5, 0, 1) * 255`. The result stays floating point;
/// callers truncate to integers when formatting.
pub fn sh_dc_to_rgb(dc: &[f32]) -> Vec<f32> {
    dc.par_iter()
        .map(|&coefficient| (coefficient * SH_C0 + 0.5).clamp(0.0, 1.0) * 255.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_reference_values() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert_relative_eq!(sigmoid(-10.0), 0.0000454, epsilon = 1e-7);
        assert_relative_eq!(sigmoid(2.0), 0.8808, epsilon = 1e-4);
        assert_relative_eq!(sigmoid(10.0), 0.9999546, epsilon = 1e-7);
    }

    #[test]
    fn sigmoid_stays_in_open_unit_interval() {
        // Large magnitudes saturate to exactly 0.0 / 1.0 in f32; the open
        // interval holds wherever exp(-x) is representable and nonzero.
        for &logit in &[-15.0_f32, -1.0, 0.0, 1.0, 15.0] {
            let opacity = sigmoid(logit);
            assert!(opacity > 0.0 && opacity < 1.0, "sigmoid({logit}) = {opacity}");
        }
    }

    #[test]
    fn sigmoid_saturates_at_f32_extremes() {
        assert_eq!(sigmoid(100.0), 1.0);
        assert_eq!(sigmoid(-200.0), 0.0);
    }

    #[test]
    fn sigmoid_propagates_nan() {
        assert!(sigmoid(f32::NAN).is_nan());
    }

    #[test]
    fn activate_matches_scalar_sigmoid() {
        let raw = vec![-10.0, 0.0, 2.0, 10.0];
        let activated = activate_opacities(&raw);
        assert_eq!(activated.len(), raw.len());
        for (&logit, &opacity) in raw.iter().zip(&activated) {
            assert_eq!(opacity, sigmoid(logit));
        }
    }

    #[test]
    fn percentile_linear_interpolation() {
        let values: Vec<f32> = (0..100).map(|i| i as f32).collect();
        assert_relative_eq!(percentile(&values, 5.0).unwrap(), 4.95, epsilon = 1e-9);
        assert_relative_eq!(percentile(&values, 95.0).unwrap(), 94.05, epsilon = 1e-9);
        assert_relative_eq!(percentile(&values, 0.0).unwrap(), 0.0);
        assert_relative_eq!(percentile(&values, 100.0).unwrap(), 99.0);
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 49.5);
    }

    #[test]
    fn percentile_is_order_independent() {
        let values = vec![9.0_f32, 1.0, 5.0, 3.0, 7.0];
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 5.0);
        assert_relative_eq!(percentile(&values, 25.0).unwrap(), 3.0);
    }

    #[test]
    fn percentile_of_empty_sample_is_none() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn sh_dc_zero_maps_to_mid_gray() {
        let channel = sh_dc_to_rgb(&[0.0]);
        assert_relative_eq!(channel[0], 127.5);
    }

    #[test]
    fn sh_dc_clamps_instead_of_wrapping() {
        // Coefficients far outside the displayable range pin at the ends.
        let channel = sh_dc_to_rgb(&[-100.0, 100.0]);
        assert_eq!(channel[0], 0.0);
        assert_eq!(channel[1], 255.0);
    }
}
