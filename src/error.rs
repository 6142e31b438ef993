use std::path::PathBuf;

use snafu::Snafu;


/// Fatal pipeline errors. Transform parameters are deliberately not
/// validated anywhere: out-of-range transpose/correction/formant/
/// breathiness amounts are accepted as creative controls.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("cannot read input '{}': {}", path.display(), source))]
    ReadInput { path: PathBuf, source: hound::Error },

    #[snafu(display("inconsistent analysis output: {}", detail))]
    Shape { detail: String },

    #[snafu(display("cannot write output '{}': {}", path.display(), source))]
    WriteOutput { path: PathBuf, source: hound::Error },

    #[snafu(display("no audio output device available"))]
    NoOutputDevice,

    #[snafu(display("cannot query output device configurations: {}", source))]
    SupportedConfigs { source: cpal::SupportedStreamConfigsError },

    #[snafu(display("output device does not support playback at {} Hz", rate))]
    UnsupportedRate { rate: u32 },

    #[snafu(display("cannot open playback stream: {}", source))]
    BuildStream { source: cpal::BuildStreamError },

    #[snafu(display("cannot start playback: {}", source))]
    PlayStream { source: cpal::PlayStreamError },
}
