//! WAV file writing and inspection.
//!
//! Rendered performances are written in the sample type the synthesizer
//! produced: 8-bit for the DAC signal, 16-bit PCM, or 32-bit float.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

use tromba_core::OutputSample;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// Sample types that can be written to a WAV file.
pub trait WavSample: OutputSample {
    /// Bit depth of the sample type.
    const BITS: u16;
    /// Encoding of the sample type.
    const FORMAT: WavFormat;

    /// Writes one sample.
    fn write<W: std::io::Write + std::io::Seek>(
        self,
        writer: &mut WavWriter<W>,
    ) -> std::result::Result<(), hound::Error>;
}

impl WavSample for u8 {
    const BITS: u16 = 8;
    const FORMAT: WavFormat = WavFormat::Pcm;

    fn write<W: std::io::Write + std::io::Seek>(
        self,
        writer: &mut WavWriter<W>,
    ) -> std::result::Result<(), hound::Error> {
        // hound takes signed 8-bit and stores it offset by 128.
        writer.write_sample((i16::from(self) - 128) as i8)
    }
}

impl WavSample for i16 {
    const BITS: u16 = 16;
    const FORMAT: WavFormat = WavFormat::Pcm;

    fn write<W: std::io::Write + std::io::Seek>(
        self,
        writer: &mut WavWriter<W>,
    ) -> std::result::Result<(), hound::Error> {
        writer.write_sample(self)
    }
}

impl WavSample for f32 {
    const BITS: u16 = 32;
    const FORMAT: WavFormat = WavFormat::IeeeFloat;

    fn write<W: std::io::Write + std::io::Seek>(
        self,
        writer: &mut WavWriter<W>,
    ) -> std::result::Result<(), hound::Error> {
        writer.write_sample(self)
    }
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (8, 16 or 32).
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Mono spec sized for sample type `S`.
    pub fn mono<S: WavSample>(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: S::BITS,
        }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self::mono::<i16>(tromba_core::DEFAULT_SAMPLE_RATE)
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len());
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// Write interleaved samples to a WAV file.
///
/// `spec.bits_per_sample` must match the sample type.
///
/// # Example
/// ```ignore
/// let samples = vec![0i16; 44_100]; // 1 second of silence
/// write_wav("silence.wav", &samples, WavSpec::mono::<i16>(44_100))?;
/// ```
pub fn write_wav<P: AsRef<Path>, S: WavSample>(
    path: P,
    samples: &[S],
    spec: WavSpec,
) -> Result<()> {
    if spec.bits_per_sample != S::BITS {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit spec for {}-bit samples",
            spec.bits_per_sample,
            S::BITS
        )));
    }

    let path = path.as_ref();
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;
    for &sample in samples {
        sample.write(&mut writer)?;
    }
    writer.finalize()?;

    tracing::debug!(
        path = %path.display(),
        samples = samples.len(),
        bits = spec.bits_per_sample,
        "wav written"
    );
    Ok(())
}

/// Read a WAV file as unit-range f32 along with the spec.
///
/// Multi-channel files are mixed down to mono by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((mono, spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_i16() {
        let samples: Vec<i16> = (0..1000)
            .map(|i| ((i as f32 / 50.0).sin() * 30_000.0) as i16)
            .collect();
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::mono::<i16>(44_100)).unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec, WavSpec::mono::<i16>(44_100));
        assert_eq!(loaded.len(), samples.len());
        for (&a, &b) in samples.iter().zip(loaded.iter()) {
            assert!((f32::from(a) / 32_768.0 - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_u8_silence_reads_as_zero() {
        let samples = vec![u8::SILENCE; 64];
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::mono::<u8>(44_100)).unwrap();

        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.bits_per_sample, 8);
        assert_eq!(info.format, WavFormat::Pcm);
        let (loaded, _) = read_wav(file.path()).unwrap();
        assert!(loaded.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_u8_extremes() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0u8, 255], WavSpec::mono::<u8>(8_000)).unwrap();
        let (loaded, _) = read_wav(file.path()).unwrap();
        assert_eq!(loaded[0], -1.0);
        assert!((loaded[1] - 127.0 / 128.0).abs() < 1e-6);
    }

    #[test]
    fn test_f32_is_float_format() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0.0f32, 0.5, -0.5], WavSpec::mono::<f32>(48_000)).unwrap();
        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.format, WavFormat::IeeeFloat);
        assert_eq!(info.num_frames, 3);
    }

    #[test]
    fn test_bit_depth_mismatch_rejected() {
        let file = NamedTempFile::new().unwrap();
        let err = write_wav(file.path(), &[0i16; 4], WavSpec::mono::<u8>(44_100)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)), "got: {err}");
    }

    #[test]
    fn test_info_duration() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &vec![0i16; 22_050], WavSpec::mono::<i16>(44_100)).unwrap();
        let info = read_wav_info(file.path()).unwrap();
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 44_100);
        assert!((info.duration_secs - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_stereo_mixdown() {
        let spec = WavSpec {
            channels: 2,
            ..WavSpec::mono::<i16>(44_100)
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[16_384i16, 0, -16_384, 0], spec).unwrap();
        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.channels, 2);
        assert_eq!(loaded, vec![0.25, -0.25]);
    }
}
