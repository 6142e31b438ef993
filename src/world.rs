use crate::error::{Error, ShapeSnafu};

use ndarray::{Array1, Array2};
use rsworld::{cheaptrick, d4c, dio, harvest, stonemask, synthesis};
use rsworld_sys::{CheapTrickOption, D4COption, DioOption, HarvestOption};
use snafu::ensure;


/// Frame spacing used for analysis and synthesis, in milliseconds.
pub const DEFAULT_FRAME_PERIOD: f64 = 5.0;

/// Pitch search range handed to the estimators.
pub const F0_FLOOR: f64 = 50.0;
pub const F0_CEIL: f64 = 600.0;


/// Pitch analysis quality. `Fast` trades accuracy for speed,
/// `HighQuality` is considerably slower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Fast,
    HighQuality,
}

/// Analysis/synthesis engine seam. The pipeline only depends on this
/// trait; the shipped implementation is [`World`].
pub trait Vocoder {
    /// Estimates the pitch track and its time markers.
    fn pitch(
        &self,
        x: &[f64],
        fs: u32,
        mode: AnalysisMode,
        f0_floor: f64,
        f0_ceil: f64,
        frame_period: f64,
    ) -> Result<(Array1<f64>, Array1<f64>), Error>;

    /// Refines a previously estimated pitch track.
    fn refine_pitch(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array1<f64>, Error>;

    /// Extracts the smoothed spectral envelope (frames x bins).
    fn envelope(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array2<f64>, Error>;

    /// Extracts the aperiodicity matrix (frames x bins, values in [0, 1]).
    fn aperiodicity(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array2<f64>, Error>;

    /// Reconstructs a waveform from the (possibly retouched) parameters.
    fn synthesize(
        &self,
        f0: &Array1<f64>,
        envelope: &Array2<f64>,
        aperiodicity: &Array2<f64>,
        fs: u32,
        frame_period: f64,
    ) -> Result<Array1<f64>, Error>;
}

impl Vocoder for Box<dyn Vocoder> {
    fn pitch(
        &self,
        x: &[f64],
        fs: u32,
        mode: AnalysisMode,
        f0_floor: f64,
        f0_ceil: f64,
        frame_period: f64,
    ) -> Result<(Array1<f64>, Array1<f64>), Error> {
        self.as_ref().pitch(x, fs, mode, f0_floor, f0_ceil, frame_period)
    }

    fn refine_pitch(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array1<f64>, Error> {
        self.as_ref().refine_pitch(x, f0, time, fs)
    }

    fn envelope(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array2<f64>, Error> {
        self.as_ref().envelope(x, f0, time, fs)
    }

    fn aperiodicity(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array2<f64>, Error> {
        self.as_ref().aperiodicity(x, f0, time, fs)
    }

    fn synthesize(
        &self,
        f0: &Array1<f64>,
        envelope: &Array2<f64>,
        aperiodicity: &Array2<f64>,
        fs: u32,
        frame_period: f64,
    ) -> Result<Array1<f64>, Error> {
        self.as_ref().synthesize(f0, envelope, aperiodicity, fs, frame_period)
    }
}


/// WORLD vocoder backend: Dio/Harvest pitch estimation, StoneMask
/// refinement, CheapTrick envelope and D4C aperiodicity extraction.
#[derive(Debug, Default)]
pub struct World;

impl World {
    pub fn new() -> Self {
        World
    }
}

impl Vocoder for World {
    fn pitch(
        &self,
        x: &[f64],
        fs: u32,
        mode: AnalysisMode,
        f0_floor: f64,
        f0_ceil: f64,
        frame_period: f64,
    ) -> Result<(Array1<f64>, Array1<f64>), Error> {
        let x = x.to_vec();

        let (time, f0) = match mode {
            AnalysisMode::Fast => {
                let mut option = DioOption::new();
                option.f0_floor = f0_floor;
                option.f0_ceil = f0_ceil;
                option.channels_in_octave = 2.0;
                option.frame_period = frame_period;
                option.speed = 1;

                dio(&x, fs as i32, &option)
            }
            AnalysisMode::HighQuality => {
                let mut option = HarvestOption::new();
                option.f0_floor = f0_floor;
                option.f0_ceil = f0_ceil;
                option.frame_period = frame_period;

                harvest(&x, fs as i32, &option)
            }
        };

        Ok((Array1::from(f0), Array1::from(time)))
    }

    fn refine_pitch(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array1<f64>, Error> {
        let x = x.to_vec();
        let refined = stonemask(&x, fs as i32, &time.to_vec(), &f0.to_vec());
        Ok(Array1::from(refined))
    }

    fn envelope(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array2<f64>, Error> {
        let x = x.to_vec();
        let mut option = CheapTrickOption::new(fs as i32);
        let rows = cheaptrick(&x, fs as i32, &time.to_vec(), &f0.to_vec(), &mut option);
        pack_rows(rows)
    }

    fn aperiodicity(
        &self,
        x: &[f64],
        f0: &Array1<f64>,
        time: &Array1<f64>,
        fs: u32,
    ) -> Result<Array2<f64>, Error> {
        let x = x.to_vec();
        let option = D4COption::new();
        let rows = d4c(&x, fs as i32, &time.to_vec(), &f0.to_vec(), &option);
        pack_rows(rows)
    }

    fn synthesize(
        &self,
        f0: &Array1<f64>,
        envelope: &Array2<f64>,
        aperiodicity: &Array2<f64>,
        fs: u32,
        frame_period: f64,
    ) -> Result<Array1<f64>, Error> {
        let sp = unpack_rows(envelope);
        let ap = unpack_rows(aperiodicity);
        let y = synthesis(&f0.to_vec(), &sp, &ap, frame_period, fs as i32);
        Ok(Array1::from(y))
    }
}

// Engine results arrive as row vectors; ragged rows are rejected here so
// the transforms can assume a rectangular grid.
fn pack_rows(rows: Vec<Vec<f64>>) -> Result<Array2<f64>, Error> {
    let frames = rows.len();
    let bins = rows.first().map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(frames * bins);
    for (i, row) in rows.iter().enumerate() {
        ensure!(
            row.len() == bins,
            ShapeSnafu {
                detail: format!("frame {} has {} bins, frame 0 has {}", i, row.len(), bins),
            }
        );
        flat.extend_from_slice(row);
    }

    Array2::from_shape_vec((frames, bins), flat).map_err(|e| Error::Shape {
        detail: e.to_string(),
    })
}

fn unpack_rows(m: &Array2<f64>) -> Vec<Vec<f64>> {
    m.outer_iter().map(|row| row.to_vec()).collect()
}
