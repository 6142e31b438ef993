pub mod breath;
pub mod error;
pub mod features;
pub mod formant;
pub mod math;
pub mod pipeline;
pub mod pitch;
pub mod playback;
pub mod plot;
pub mod wave;
pub mod world;

pub use crate::error::Error;
pub use crate::features::{Features, FrameGrid};
pub use crate::pipeline::Options;
