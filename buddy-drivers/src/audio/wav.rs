//! RIFF/WAVE clip parsing
//!
//! Only uncompressed PCM is supported:
//!
//! ```text
//! ┌──────┬──────┬──────┬─────────────────┬─────────────────┐
//! │ RIFF │ size │ WAVE │ "fmt " chunk    │ "data" chunk    │
//! │ 4B   │ 4B   │ 4B   │ id, size, body  │ id, size, body  │
//! └──────┴──────┴──────┴─────────────────┴─────────────────┘
//! ```
//!
//! Other chunks (`LIST`, `fact`, ...) are skipped. Chunk bodies are padded
//! to an even length.

/// Errors that can occur while parsing a WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WavError {
    /// Missing `RIFF` tag
    NotRiff,
    /// RIFF file is not `WAVE`
    NotWave,
    /// Not 8/16-bit mono/stereo PCM, or no `fmt ` chunk
    UnsupportedFormat,
    /// No `data` chunk
    MissingData,
    /// A chunk runs past the end of the file
    Truncated,
}

const PCM_FORMAT: u16 = 1;
const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;
const FMT_MIN_LEN: usize = 16;

/// Parsed PCM clip borrowing its sample data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavClip<'a> {
    /// Frames per second
    pub sample_rate: u32,
    /// 1 (mono) or 2 (stereo)
    pub channels: u8,
    /// 8 (unsigned) or 16 (signed little-endian)
    pub bits_per_sample: u8,
    data: &'a [u8],
}

#[derive(Debug, Clone, Copy)]
struct Format {
    sample_rate: u32,
    channels: u8,
    bits_per_sample: u8,
}

impl<'a> WavClip<'a> {
    /// Parse a complete WAV file
    pub fn parse(bytes: &'a [u8]) -> Result<Self, WavError> {
        if bytes.len() < HEADER_LEN || &bytes[0..4] != b"RIFF" {
            return Err(WavError::NotRiff);
        }
        if &bytes[8..12] != b"WAVE" {
            return Err(WavError::NotWave);
        }

        let mut format = None;
        let mut data = None;
        let mut rest = &bytes[HEADER_LEN..];

        while rest.len() >= CHUNK_HEADER_LEN {
            let id = &rest[0..4];
            let size = read_u32(&rest[4..8]) as usize;
            let body_end = CHUNK_HEADER_LEN
                .checked_add(size)
                .filter(|&end| end <= rest.len())
                .ok_or(WavError::Truncated)?;
            let body = &rest[CHUNK_HEADER_LEN..body_end];

            match id {
                b"fmt " => format = Some(parse_format(body)?),
                b"data" => data = Some(body),
                _ => {}
            }

            let next = (body_end + (size & 1)).min(rest.len());
            rest = &rest[next..];
        }

        let format = format.ok_or(WavError::UnsupportedFormat)?;
        let data = data.ok_or(WavError::MissingData)?;

        // Drop a trailing partial frame
        let frame_len = format.channels as usize * (format.bits_per_sample as usize / 8);
        let data = &data[..data.len() - data.len() % frame_len];

        Ok(Self {
            sample_rate: format.sample_rate,
            channels: format.channels,
            bits_per_sample: format.bits_per_sample,
            data,
        })
    }

    /// Bytes per frame (one sample for every channel)
    pub fn frame_len(&self) -> usize {
        self.channels as usize * (self.bits_per_sample as usize / 8)
    }

    /// Number of frames
    pub fn frames(&self) -> usize {
        self.data.len() / self.frame_len()
    }

    /// Iterate over frames as unsigned 16-bit mono levels
    pub fn samples(&self) -> Samples<'a> {
        Samples {
            chunks: self.data.chunks_exact(self.frame_len()),
            channels: self.channels,
            wide: self.bits_per_sample == 16,
        }
    }
}

fn parse_format(body: &[u8]) -> Result<Format, WavError> {
    if body.len() < FMT_MIN_LEN {
        return Err(WavError::Truncated);
    }
    let audio_format = read_u16(&body[0..2]);
    let channels = read_u16(&body[2..4]);
    let sample_rate = read_u32(&body[4..8]);
    let bits_per_sample = read_u16(&body[14..16]);

    if audio_format != PCM_FORMAT
        || !(1..=2).contains(&channels)
        || !(bits_per_sample == 8 || bits_per_sample == 16)
        || sample_rate == 0
    {
        return Err(WavError::UnsupportedFormat);
    }

    Ok(Format {
        sample_rate,
        channels: channels as u8,
        bits_per_sample: bits_per_sample as u8,
    })
}

fn read_u16(b: &[u8]) -> u16 {
    u16::from_le_bytes([b[0], b[1]])
}

fn read_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Iterator over mono levels, 0 = most negative, 32768 = silence
pub struct Samples<'a> {
    chunks: core::slice::ChunksExact<'a, u8>,
    channels: u8,
    wide: bool,
}

impl Iterator for Samples<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        let frame = self.chunks.next()?;
        let width = if self.wide { 2 } else { 1 };
        let sum: u32 = frame
            .chunks_exact(width)
            .map(|s| {
                if self.wide {
                    (i16::from_le_bytes([s[0], s[1]]) as i32 + 32768) as u32
                } else {
                    (s[0] as u32) << 8
                }
            })
            .sum();
        Some((sum / self.channels as u32) as u16)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn wav(channels: u16, bits: u16, rate: u32, data: &[u8]) -> Vec<u8> {
        let block_align = channels * bits / 8;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data.len() as u32).to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
        out.extend_from_slice(&channels.to_le_bytes());
        out.extend_from_slice(&rate.to_le_bytes());
        out.extend_from_slice(&(rate * block_align as u32).to_le_bytes());
        out.extend_from_slice(&block_align.to_le_bytes());
        out.extend_from_slice(&bits.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(data);
        out
    }

    #[test]
    fn test_parse_8bit_mono() {
        let bytes = wav(1, 8, 16_000, &[128; 1600]);
        let clip = WavClip::parse(&bytes).unwrap();
        assert_eq!(clip.sample_rate, 16_000);
        assert_eq!(clip.channels, 1);
        assert_eq!(clip.bits_per_sample, 8);
        assert_eq!(clip.frames(), 1600);
        assert!(clip.samples().all(|s| s == 32768));
    }

    #[test]
    fn test_16bit_stereo_mixes_to_mono() {
        let mut data = Vec::new();
        for (l, r) in [(i16::MIN, i16::MIN), (1000i16, -1000i16), (i16::MAX, i16::MAX)] {
            data.extend_from_slice(&l.to_le_bytes());
            data.extend_from_slice(&r.to_le_bytes());
        }
        let bytes = wav(2, 16, 22_050, &data);
        let clip = WavClip::parse(&bytes).unwrap();

        let levels: Vec<u16> = clip.samples().collect();
        assert_eq!(levels, vec![0, 32768, 65535]);
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let mut bytes = wav(1, 8, 8000, &[1, 2, 3]);
        // Insert an odd-sized LIST chunk (with pad byte) before "fmt "
        let list = [b'L', b'I', b'S', b'T', 3, 0, 0, 0, b'a', b'b', b'c', 0];
        bytes.splice(12..12, list.iter().copied());
        let clip = WavClip::parse(&bytes).unwrap();
        let levels: Vec<u16> = clip.samples().collect();
        assert_eq!(levels, vec![1 << 8, 2 << 8, 3 << 8]);
    }

    #[test]
    fn test_not_riff() {
        assert_eq!(WavClip::parse(b"RIFX\0\0\0\0WAVE"), Err(WavError::NotRiff));
        assert_eq!(WavClip::parse(b""), Err(WavError::NotRiff));
    }

    #[test]
    fn test_not_wave() {
        assert_eq!(WavClip::parse(b"RIFF\0\0\0\0AVI "), Err(WavError::NotWave));
    }

    #[test]
    fn test_missing_data() {
        let bytes = wav(1, 8, 8000, &[]);
        let without_data = &bytes[..bytes.len() - 8];
        assert_eq!(WavClip::parse(without_data), Err(WavError::MissingData));
    }

    #[test]
    fn test_truncated_data() {
        let bytes = wav(1, 8, 8000, &[0; 100]);
        assert_eq!(
            WavClip::parse(&bytes[..bytes.len() - 10]),
            Err(WavError::Truncated)
        );
    }

    #[test]
    fn test_unsupported_format() {
        let mut bytes = wav(1, 8, 8000, &[0; 4]);
        // audio_format = 3 (IEEE float)
        bytes[20] = 3;
        assert_eq!(WavClip::parse(&bytes), Err(WavError::UnsupportedFormat));

        let bytes = wav(1, 24, 8000, &[0; 6]);
        assert_eq!(WavClip::parse(&bytes), Err(WavError::UnsupportedFormat));
    }

    #[test]
    fn test_partial_frame_dropped() {
        let bytes = wav(1, 16, 8000, &[0, 0, 0]);
        let clip = WavClip::parse(&bytes).unwrap();
        assert_eq!(clip.frames(), 1);
        assert_eq!(clip.samples().count(), 1);
    }
}
