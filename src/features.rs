use crate::error::{Error, ShapeSnafu};

use ndarray::{Array1, Array2};
use snafu::ensure;


/// Shared time/frequency indexing convention: all per-run entities are
/// indexed by frame (rows) and, for matrices, by frequency bin (columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGrid {
    pub frames: usize,
    pub bins: usize,
}

/// One run's analysis output: pitch track (Hz, 0 = unvoiced), time
/// markers (seconds), spectral envelope and aperiodicity (frames x bins).
///
/// Created once by the analysis engine, possibly replaced by equal-shape
/// derivatives by the transforms, consumed once by synthesis.
#[derive(Debug, Clone)]
pub struct Features {
    pub f0: Array1<f64>,
    pub time: Array1<f64>,
    pub envelope: Array2<f64>,
    pub aperiodicity: Array2<f64>,
}

impl Features {
    /// Checks the shape invariants and returns the common grid. Must
    /// pass before any transform runs; every transform assumes it.
    pub fn grid(&self) -> Result<FrameGrid, Error> {
        let frames = self.f0.len();
        let (ef, eb) = self.envelope.dim();
        let (af, ab) = self.aperiodicity.dim();

        ensure!(
            self.time.len() == frames,
            ShapeSnafu {
                detail: format!(
                    "pitch track has {} frames but time markers have {}",
                    frames,
                    self.time.len()
                ),
            }
        );
        ensure!(
            ef == frames && af == frames,
            ShapeSnafu {
                detail: format!(
                    "pitch track has {} frames, envelope {}, aperiodicity {}",
                    frames, ef, af
                ),
            }
        );
        ensure!(
            eb == ab,
            ShapeSnafu {
                detail: format!("envelope has {} bins, aperiodicity {}", eb, ab),
            }
        );

        Ok(FrameGrid { frames, bins: eb })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{Array1, Array2};

    fn features(frames: usize, bins: usize) -> Features {
        Features {
            f0: Array1::zeros(frames),
            time: Array1::zeros(frames),
            envelope: Array2::zeros((frames, bins)),
            aperiodicity: Array2::zeros((frames, bins)),
        }
    }

    #[test]
    fn grid_consistent() {
        let grid = features(7, 5).grid().unwrap();
        assert_eq!(grid, FrameGrid { frames: 7, bins: 5 });
    }

    #[test]
    fn grid_rejects_frame_mismatch() {
        let mut f = features(7, 5);
        f.envelope = Array2::zeros((6, 5));
        assert!(f.grid().is_err());
    }

    #[test]
    fn grid_rejects_marker_mismatch() {
        let mut f = features(7, 5);
        f.time = Array1::zeros(8);
        assert!(f.grid().is_err());
    }

    #[test]
    fn grid_rejects_bin_mismatch() {
        let mut f = features(7, 5);
        f.aperiodicity = Array2::zeros((7, 4));
        assert!(f.grid().is_err());
    }
}
