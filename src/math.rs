use num::traits::Float;


/// Linear interpolation between `a` and `b`; `t` outside [0, 1]
/// extrapolates.
pub fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

/// Frequency-axis scale factor for a shift in equal-tempered semitones.
pub fn semitones_to_ratio<T: Float>(semitones: T) -> T {
    (semitones / T::from(12.0).unwrap()).exp2()
}
