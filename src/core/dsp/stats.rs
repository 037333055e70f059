//! Statistical helpers over sample slices

use std::cmp::Ordering;

/// Compute median of a slice
pub fn median(data: &mut [f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }

    data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let mid = data.len() / 2;
    if data.len() % 2 == 0 {
        (data[mid - 1] + data[mid]) / 2.0
    } else {
        data[mid]
    }
}

/// Median of a window without disturbing the source order
pub fn window_median(data: &[f32]) -> f32 {
    let mut scratch = data.to_vec();
    median(&mut scratch)
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f32>() / data.len() as f32
}

/// Resample `data` onto `len` evenly spaced positions over [0, 1] by
/// linear interpolation. Both ends map onto the first and last input sample.
pub fn resample_linear(data: &[f32], len: usize) -> Vec<f32> {
    match (data.len(), len) {
        (_, 0) => Vec::new(),
        (0, n) => vec![0.0; n],
        (1, n) => vec![data[0]; n],
        (_, 1) => vec![data[0]],
        (src_len, n) => {
            let last = (src_len - 1) as f64;
            (0..n)
                .map(|i| {
                    let pos = i as f64 / (n - 1) as f64 * last;
                    let lo = pos.floor() as usize;
                    let hi = (lo + 1).min(src_len - 1);
                    let frac = (pos - lo as f64) as f32;
                    data[lo] + (data[hi] - data[lo]) * frac
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&mut [3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&mut []), 0.0);
    }

    #[test]
    fn test_window_median_keeps_order() {
        let data = vec![5.0, 1.0, 3.0];
        assert_eq!(window_median(&data), 3.0);
        assert_eq!(data, vec![5.0, 1.0, 3.0]);
    }

    #[test]
    fn test_resample_endpoints_and_midpoint() {
        let data = vec![0.0, 1.0, 2.0];
        let out = resample_linear(&data, 5);
        assert_eq!(out.len(), 5);
        assert!((out[0] - 0.0).abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
        assert!((out[2] - 1.0).abs() < 1e-6);
        assert!((out[4] - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_resample_degenerate_lengths() {
        assert!(resample_linear(&[1.0, 2.0], 0).is_empty());
        assert_eq!(resample_linear(&[], 3), vec![0.0; 3]);
        assert_eq!(resample_linear(&[7.0], 4), vec![7.0; 4]);
        assert_eq!(resample_linear(&[7.0, 9.0], 1), vec![7.0]);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-6);
    }
}
