use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::Path;

use hound::{Error, SampleFormat, WavReader, WavSpec, WavWriter};
use ndarray::{Array1, ArrayBase, Data, Ix1};


/// Reads a waveform, returning the first channel as f64 samples in
/// [-1, 1] together with the sample rate. Integer formats are scaled by
/// their nominal full-scale value, 32-bit float is passed through.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Array1<f64>, u32), Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, bits) if (1..=32).contains(&bits) => {
            let scale = (1u64 << (bits - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()?
        }
        _ => {
            return Err(Error::IoError(IoError::new(
                IoErrorKind::InvalidData,
                format!(
                    "unsupported sample format: {}-bit {:?}",
                    spec.bits_per_sample, spec.sample_format
                ),
            )));
        }
    };

    let channels = (spec.channels as usize).max(1);
    let first: Array1<f64> = samples.iter().step_by(channels).copied().collect();

    Ok((first, spec.sample_rate))
}

/// Writes a mono 32-bit float waveform.
pub fn write_wav<D, P>(path: P, data: &ArrayBase<D, Ix1>, sample_rate: u32) -> Result<(), Error>
where
    D: Data<Elem = f64>,
    P: AsRef<Path>,
{
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &x in data.iter() {
        writer.write_sample(x as f32)?;
    }

    writer.finalize()
}
