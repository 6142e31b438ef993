use crate::math::{lerp, semitones_to_ratio};

use ndarray::{azip, Array2, ArrayBase, Data, DataMut, Ix2};
use num::traits::Float;


/// Warps the frequency axis of a spectral envelope (frames x bins) by
/// `2^(semitones/12)`, writing into a caller-provided buffer of the same
/// shape. Positive shifts compress the envelope towards low bins
/// (formants raised), negative shifts stretch it. The warp is resolved
/// once per output bin and applied to the whole frame column, since it
/// is uniform over time.
pub fn shift_into<T, D1, D2>(
    input: &ArrayBase<D1, Ix2>,
    output: &mut ArrayBase<D2, Ix2>,
    semitones: T,
) where
    T: Float,
    D1: Data<Elem = T>,
    D2: DataMut<Elem = T>,
{
    let (_, bins) = input.dim();
    assert_eq!(input.dim(), output.dim());

    if bins < 2 {
        output.assign(input);
        return;
    }

    let k = semitones_to_ratio(semitones);
    let last = T::from(bins - 1).unwrap();

    for i in 0..bins {
        let t = T::from(i).unwrap() / last;
        let t = (t / k).min(T::one());
        let c = t * last;
        let lo = c.floor();
        let frac = c - lo;
        let lo = lo.to_usize().unwrap();
        let hi = lo + 1;

        if hi < bins {
            let col_lo = input.column(lo);
            let col_hi = input.column(hi);
            azip!((out in output.column_mut(i), &a in &col_lo, &b in &col_hi) {
                *out = lerp(a, b, frac);
            });
        } else {
            // Edge hold: no extrapolation past the top bin.
            output.column_mut(i).assign(&input.column(lo));
        }
    }
}

/// Owned-result variant of [`shift_into`].
pub fn shift<T, D>(input: &ArrayBase<D, Ix2>, semitones: T) -> Array2<T>
where
    T: Float,
    D: Data<Elem = T>,
{
    let mut output = Array2::zeros(input.raw_dim());
    shift_into(input, &mut output, semitones);
    output
}


#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{array, Array2};

    fn ramp(frames: usize, bins: usize) -> Array2<f64> {
        Array2::from_shape_fn((frames, bins), |(f, b)| (f * bins + b) as f64)
    }

    #[test]
    fn zero_shift_is_identity() {
        let input = ramp(3, 5);
        assert_eq!(shift(&input, 0.0), input);
    }

    #[test]
    fn zero_shift_holds_last_bin() {
        // bins - 1 a power of two, so every mapped coordinate is exact
        // and the top bin goes through the edge-hold branch.
        let input = ramp(4, 9);
        let out = shift(&input, 0.0);
        assert_eq!(out, input);
        assert_eq!(out.column(8), input.column(8));
    }

    #[test]
    fn shape_is_preserved() {
        let input = ramp(6, 17);
        for &s in &[-7.0, -0.3, 2.0, 12.0] {
            assert_eq!(shift(&input, s).dim(), input.dim());
        }
    }

    #[test]
    fn octave_up_compresses_towards_low_bins() {
        // k = 2: output bin i samples source position i/2.
        let input = ramp(1, 9);
        let out = shift(&input, 12.0);

        assert_eq!(out[(0, 0)], input[(0, 0)]);
        assert_eq!(out[(0, 2)], input[(0, 1)]);
        assert_eq!(out[(0, 4)], input[(0, 2)]);
        // Odd bins land halfway between source bins.
        assert!((out[(0, 3)] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn downward_shift_saturates_at_top_bin() {
        // k = 0.5: bins past the halfway point all clamp to the last
        // source column.
        let input = ramp(2, 9);
        let out = shift(&input, -12.0);

        for i in 5..9 {
            assert_eq!(out.column(i), input.column(8));
        }
    }

    #[test]
    fn single_bin_matrix_copies() {
        let input = array![[1.0], [2.0], [3.0]];
        assert_eq!(shift(&input, 7.0), input);
    }
}
