use crate::error::{Error, ReadInputSnafu, WriteOutputSnafu};
use crate::features::Features;
use crate::world::{AnalysisMode, Vocoder, DEFAULT_FRAME_PERIOD, F0_CEIL, F0_FLOOR};
use crate::{breath, formant, pitch, playback, plot, wave};

use std::path::PathBuf;

use snafu::ResultExt;


/// Spectral width of the breathiness ramp; not exposed on the CLI.
pub const BREATH_WIDTH: f64 = 0.8;

pub const DEFAULT_TRANSPOSE: f64 = 6.0;
pub const DEFAULT_CORRECT: f64 = 0.0;
pub const DEFAULT_FORMANT: f64 = 3.0;
pub const DEFAULT_BREATHINESS: f64 = 30.0;


/// One run's configuration, built once from the command line and
/// immutable from then on. The numeric controls are accepted over their
/// full range; a value of exactly zero disables the stage.
#[derive(Debug, Clone)]
pub struct Options {
    pub input: PathBuf,
    /// Output path; `None` plays the result back directly.
    pub output: Option<PathBuf>,
    /// Transpose amount in semitones.
    pub transpose: f64,
    /// Pitch correction strength in percent.
    pub correct_pitch: f64,
    /// Formant shift in semitones.
    pub formant: f64,
    /// Breathiness boost in percent (negative reduces).
    pub breathiness: f64,
    /// Use the slower, higher-quality pitch analysis.
    pub high_quality: bool,
    /// Plot the pitch track, envelope and aperiodicity after transforms.
    pub visualize: bool,
}

impl Options {
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Options {
            input: input.into(),
            output: None,
            transpose: DEFAULT_TRANSPOSE,
            correct_pitch: DEFAULT_CORRECT,
            formant: DEFAULT_FORMANT,
            breathiness: DEFAULT_BREATHINESS,
            high_quality: false,
            visualize: false,
        }
    }
}

/// Applies the frame-domain transforms in fixed order: transpose, pitch
/// correction, formant shift, breathiness. Each stage is skipped when
/// its control sits at the neutral value; every stage preserves the
/// frame and bin counts, so any subset composes.
pub fn transform(features: &mut Features, opt: &Options) {
    if opt.transpose != 0.0 {
        features.f0 = pitch::transpose(&features.f0, opt.transpose);
    }
    if opt.correct_pitch != 0.0 {
        features.f0 = pitch::correct(&features.f0, opt.correct_pitch / 100.0);
    }
    if opt.formant != 0.0 {
        features.envelope = formant::shift(&features.envelope, opt.formant);
    }
    if opt.breathiness != 0.0 {
        features.aperiodicity =
            breath::retouch(&features.aperiodicity, BREATH_WIDTH, opt.breathiness / 100.0);
    }
}

/// Runs the whole pipeline: read, analyze, transform, synthesize, then
/// write or play back. Strictly sequential; any fatal error aborts the
/// run with no partial output.
pub fn run<V: Vocoder>(vocoder: &V, opt: &Options) -> Result<(), Error> {
    let (samples, fs) = wave::read_wav(&opt.input).context(ReadInputSnafu {
        path: opt.input.clone(),
    })?;
    let x = samples.to_vec();

    let mode = if opt.high_quality {
        AnalysisMode::HighQuality
    } else {
        AnalysisMode::Fast
    };

    let (f0, time) = vocoder.pitch(&x, fs, mode, F0_FLOOR, F0_CEIL, DEFAULT_FRAME_PERIOD)?;
    let f0 = vocoder.refine_pitch(&x, &f0, &time, fs)?;
    let envelope = vocoder.envelope(&x, &f0, &time, fs)?;
    let aperiodicity = vocoder.aperiodicity(&x, &f0, &time, fs)?;

    let mut features = Features {
        f0,
        time,
        envelope,
        aperiodicity,
    };
    features.grid()?;

    transform(&mut features, opt);

    let out = vocoder.synthesize(
        &features.f0,
        &features.envelope,
        &features.aperiodicity,
        fs,
        DEFAULT_FRAME_PERIOD,
    )?;

    if opt.visualize {
        plot::track(&features.f0);
        plot::matrix(&features.envelope, true);
        plot::matrix(&features.aperiodicity, true);
    }

    match &opt.output {
        Some(path) => wave::write_wav(path, &out, fs).context(WriteOutputSnafu {
            path: path.clone(),
        })?,
        None => playback::play(&out, fs)?,
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{Array1, Array2};

    fn neutral_options() -> Options {
        let mut opt = Options::new("in.wav");
        opt.transpose = 0.0;
        opt.correct_pitch = 0.0;
        opt.formant = 0.0;
        opt.breathiness = 0.0;
        opt
    }

    fn features() -> Features {
        Features {
            f0: Array1::from(vec![0.0, 220.0, 0.0, 440.0]),
            time: Array1::from(vec![0.0, 0.005, 0.01, 0.015]),
            envelope: Array2::from_shape_fn((4, 9), |(f, b)| (f + b) as f64 + 1.0),
            aperiodicity: Array2::from_elem((4, 9), 0.5),
        }
    }

    #[test]
    fn neutral_options_change_nothing() {
        let mut f = features();
        let before = f.clone();

        transform(&mut f, &neutral_options());

        assert_eq!(f.f0, before.f0);
        assert_eq!(f.time, before.time);
        assert_eq!(f.envelope, before.envelope);
        assert_eq!(f.aperiodicity, before.aperiodicity);
    }

    #[test]
    fn transpose_stage_only_touches_the_pitch_track() {
        let mut f = features();
        let before = f.clone();

        let mut opt = neutral_options();
        opt.transpose = 12.0;
        transform(&mut f, &opt);

        assert_eq!(f.f0, Array1::from(vec![0.0, 440.0, 0.0, 880.0]));
        assert_eq!(f.envelope, before.envelope);
        assert_eq!(f.aperiodicity, before.aperiodicity);
    }

    #[test]
    fn all_stages_preserve_shape() {
        let mut f = features();

        let mut opt = neutral_options();
        opt.transpose = 3.0;
        opt.correct_pitch = 80.0;
        opt.formant = -4.0;
        opt.breathiness = 45.0;
        transform(&mut f, &opt);

        let grid = f.grid().unwrap();
        assert_eq!((grid.frames, grid.bins), (4, 9));
    }

    #[test]
    fn time_markers_pass_through_every_stage() {
        let mut f = features();
        let before = f.time.clone();

        let mut opt = neutral_options();
        opt.transpose = 5.0;
        opt.correct_pitch = 100.0;
        opt.formant = 2.0;
        opt.breathiness = 30.0;
        transform(&mut f, &opt);

        assert_eq!(f.time, before);
    }

    #[test]
    fn correction_strength_comes_from_percent() {
        let mut f = features();

        let mut opt = neutral_options();
        opt.correct_pitch = 100.0;
        transform(&mut f, &opt);

        // 220 and 440 sit on the reference scale already.
        assert!((f.f0[1] - 220.0).abs() < 1e-9);
        assert!((f.f0[3] - 440.0).abs() < 1e-9);
        assert_eq!(f.f0[0], 0.0);
        assert_eq!(f.f0[2], 0.0);
    }
}
