use crate::math::{lerp, semitones_to_ratio};

use ndarray::{Array1, ArrayBase, Data, Ix1};
use num::traits::Float;


/// Reference frequency of the correction scale (A4).
pub const REFERENCE_HZ: f64 = 440.0;

// Guards log2 against unvoiced (zero) frames.
const EPSILON: f64 = 1e-30;


/// Scales every voiced frame by `2^(semitones/12)`. Unvoiced frames
/// (exactly zero) stay zero.
pub fn transpose<T, D>(f0: &ArrayBase<D, Ix1>, semitones: T) -> Array1<T>
where
    T: Float,
    D: Data<Elem = T>,
{
    let k = semitones_to_ratio(semitones);
    f0.mapv(|f| if f.is_zero() { f } else { f * k })
}

/// Pulls every voiced frame towards the nearest equal-tempered semitone
/// relative to 440 Hz. `strength` 0 leaves the track untouched, 1 snaps
/// fully to the scale; values outside [0, 1] extrapolate rather than
/// clamp. Unvoiced frames stay exactly zero.
pub fn correct<T, D>(f0: &ArrayBase<D, Ix1>, strength: T) -> Array1<T>
where
    T: Float,
    D: Data<Elem = T>,
{
    let reference = T::from(REFERENCE_HZ).unwrap();
    let epsilon = T::from(EPSILON).unwrap();
    let twelve = T::from(12.0).unwrap();

    f0.mapv(|f| {
        if f.is_zero() {
            return T::zero();
        }

        let scale = (f / reference + epsilon).log2() * twelve;
        let corrected = lerp(scale, scale.round(), strength);
        (corrected / twelve).exp2() * reference
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn transpose_zero_is_identity() {
        let f0 = array![0.0, 220.0, 0.0, 440.0, 523.25];
        assert_eq!(transpose(&f0, 0.0), f0);
    }

    #[test]
    fn transpose_octave_up() {
        let f0 = array![0.0, 220.0, 0.0, 440.0];
        let out = transpose(&f0, 12.0);

        assert_eq!(out.len(), f0.len());
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 440.0).abs() < 1e-9);
        assert_eq!(out[2], 0.0);
        assert!((out[3] - 880.0).abs() < 1e-9);
    }

    #[test]
    fn correct_zero_strength_is_identity() {
        let f0 = array![0.0, 215.3, 437.0, 95.8];
        let out = correct(&f0, 0.0);

        assert_eq!(out[0], 0.0);
        for i in 1..f0.len() {
            assert!((out[i] - f0[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn correct_full_strength_quantizes() {
        let f0 = array![215.3, 437.0, 95.8];
        let out = correct(&f0, 1.0);

        for i in 0..f0.len() {
            let scale = (f0[i] / 440.0 + 1e-30).log2() * 12.0;
            let expected = 440.0 * (scale.round() / 12.0).exp2();
            assert!((out[i] - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn correct_keeps_unvoiced_frames_at_zero() {
        let f0 = array![0.0, 0.0, 330.0, 0.0];
        let out = correct(&f0, 1.0);

        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        assert_eq!(out[3], 0.0);
    }

    #[test]
    fn correct_on_scale_frequency_is_fixed_point() {
        // 440 Hz sits on the scale; any strength must leave it there.
        let f0 = array![440.0];
        for &strength in &[0.0, 0.5, 1.0, 2.0] {
            let out = correct(&f0, strength);
            assert!((out[0] - 440.0).abs() < 1e-9);
        }
    }

    #[test]
    fn correct_overshoots_past_full_strength() {
        // Strength beyond 1 extrapolates past the nearest semitone.
        let f0 = array![450.0];
        let snapped = correct(&f0, 1.0)[0];
        let over = correct(&f0, 2.0)[0];

        assert!((snapped - 440.0).abs() < 1e-9);
        assert!(over < 440.0);
    }
}
