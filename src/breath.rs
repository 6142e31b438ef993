use crate::math::lerp;

use ndarray::{azip, Array2, ArrayBase, Data, DataMut, Ix2};
use num::traits::Float;


/// Reshapes an aperiodicity matrix (frames x bins, values in [0, 1]) by
/// raising each bin to a frequency-dependent exponent. The exponent
/// ramps from 1 at bin 0 towards `1 - level`, saturating after a
/// `1 / (width * 100)` fraction of the bin range, so `width` sets how
/// quickly the effect reaches full strength as frequency increases.
/// Positive `level` boosts breathiness, negative reduces it; `width` 0
/// or `level` 0 is the identity.
pub fn retouch_into<T, D1, D2>(
    input: &ArrayBase<D1, Ix2>,
    output: &mut ArrayBase<D2, Ix2>,
    width: T,
    level: T,
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

    let last = T::from(bins - 1).unwrap();
    let hundred = T::from(100.0).unwrap();

    for i in 0..bins {
        let t = (T::from(i).unwrap() / last * width * hundred).min(T::one());
        let e = lerp(T::one(), T::one() - level, t);

        azip!((out in output.column_mut(i), &v in &input.column(i)) {
            *out = v.powf(e);
        });
    }
}

/// Owned-result variant of [`retouch_into`].
pub fn retouch<T, D>(input: &ArrayBase<D, Ix2>, width: T, level: T) -> Array2<T>
where
    T: Float,
    D: Data<Elem = T>,
{
    let mut output = Array2::zeros(input.raw_dim());
    retouch_into(input, &mut output, width, level);
    output
}
