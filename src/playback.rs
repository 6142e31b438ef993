use crate::error::{BuildStreamSnafu, Error, PlayStreamSnafu, SupportedConfigsSnafu};

use std::sync::mpsc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};
use ndarray::{ArrayBase, Data, Ix1};
use snafu::ResultExt;


/// Plays a mono waveform on the default output device, blocking until
/// the whole buffer has been handed to the device.
pub fn play<D>(samples: &ArrayBase<D, Ix1>, sample_rate: u32) -> Result<(), Error>
where
    D: Data<Elem = f64>,
{
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(Error::NoOutputDevice)?;

    let channels = output_channels(&device, sample_rate)?;
    let config = StreamConfig {
        channels,
        sample_rate: SampleRate(sample_rate),
        buffer_size: BufferSize::Default,
    };

    let data: Vec<f32> = samples.iter().map(|&v| v as f32).collect();
    let channels = channels as usize;
    let (done_tx, done_rx) = mpsc::channel();

    let mut pos = 0usize;
    let mut notified = false;
    let stream = device
        .build_output_stream(
            &config,
            move |out: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in out.chunks_mut(channels) {
                    let value = if pos < data.len() { data[pos] } else { 0.0 };
                    pos += 1;
                    for sample in frame.iter_mut() {
                        *sample = value;
                    }
                }
                if pos >= data.len() && !notified {
                    notified = true;
                    let _ = done_tx.send(());
                }
            },
            |err| eprintln!("playback stream error: {}", err),
            None,
        )
        .context(BuildStreamSnafu)?;

    stream.play().context(PlayStreamSnafu)?;

    // The signal fires when the last sample is queued; leave the device
    // time to drain its buffer before tearing the stream down.
    let _ = done_rx.recv();
    std::thread::sleep(Duration::from_millis(200));

    Ok(())
}

// Picks a channel count the device supports at the recording's exact
// rate; resampling is out of scope, so anything else is an error.
fn output_channels(device: &cpal::Device, sample_rate: u32) -> Result<u16, Error> {
    let configs: Vec<_> = device
        .supported_output_configs()
        .context(SupportedConfigsSnafu)?
        .filter(|r| {
            r.min_sample_rate().0 <= sample_rate && sample_rate <= r.max_sample_rate().0
        })
        .collect();

    configs
        .iter()
        .find(|r| r.sample_format() == cpal::SampleFormat::F32)
        .or_else(|| configs.first())
        .map(|r| r.channels())
        .ok_or(Error::UnsupportedRate { rate: sample_rate })
}
