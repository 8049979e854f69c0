pub mod reader;

use utils::bits::high_nibble;

use crate::errors::FLVError;

/// `SoundFormat`, bits 7..4 of the first audio payload byte.
#[inline]
pub const fn sound_format_bits(byte: u8) -> u8 {
    high_nibble(byte)
}

/// `SoundRate`, bits 3..2.
#[inline]
pub const fn sound_rate_bits(byte: u8) -> u8 {
    (byte >> 2) & 0b11
}

/// `SoundSize`, bit 1.
#[inline]
pub const fn sound_size_bits(byte: u8) -> u8 {
    (byte >> 1) & 0b1
}

/// `SoundType`, bit 0.
#[inline]
pub const fn sound_type_bits(byte: u8) -> u8 {
    byte & 0b1
}

///
/// Format of SoundData, the following values are defined
/// 0 = Linear PCM, platform endian
/// 1 = ADPCM
/// 2 = MP3
/// 3 = Linear PCM, little endian
/// 4 = Nellymoser 16 kHz mono
/// 5 = Nellymoser 8 kHz mono
/// 6 = Nellymoser
/// 7 = G.711 A-Law logarithmic PCM
/// 8 = G.711 mu-Law logarithmic PCM
/// 9 = reserved
/// 10 = AAC
/// 11 = Speex
/// 14 = MP3 8 kHz
/// 15 = Device-specific sound
/// Formats 7, 8, 14, and 15 are reserved
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SoundFormat {
    LinearPCM = 0,
    ADPCM = 1,
    MP3 = 2,
    LinearPCMLittleEndian = 3,
    NellyMoser16KHZ = 4,
    NellyMoser8KHZ = 5,
    NellyMoser = 6,
    G711ALawLogarithmicPCM = 7,  // reserved
    G711MULawLogarithmicPCM = 8, // reserved
    AAC = 10,
    Speex = 11,
    MP38KHZ = 14, // reserved
    DeviceSpecific = 15,
}

impl From<SoundFormat> for u8 {
    fn from(value: SoundFormat) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for SoundFormat {
    type Error = FLVError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::LinearPCM),
            1 => Ok(Self::ADPCM),
            2 => Ok(Self::MP3),
            3 => Ok(Self::LinearPCMLittleEndian),
            4 => Ok(Self::NellyMoser16KHZ),
            5 => Ok(Self::NellyMoser8KHZ),
            6 => Ok(Self::NellyMoser),
            7 => Ok(Self::G711ALawLogarithmicPCM),
            8 => Ok(Self::G711MULawLogarithmicPCM),
            10 => Ok(Self::AAC),
            11 => Ok(Self::Speex),
            14 => Ok(Self::MP38KHZ),
            15 => Ok(Self::DeviceSpecific),
            _ => Err(FLVError::UnknownAudioSoundFormat(value)),
        }
    }
}

///
/// Sampling rate. The following values are defined:
/// 0 = 5.5 kHz
/// 1 = 11 kHz
/// 2 = 22 kHz
/// 3 = 44 kHz
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SoundRate {
    KHZ5D5 = 0,
    KHZ11 = 1,
    KHZ22 = 2,
    KHZ44 = 3,
}

impl TryFrom<u8> for SoundRate {
    type Error = FLVError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::KHZ5D5),
            1 => Ok(Self::KHZ11),
            2 => Ok(Self::KHZ22),
            3 => Ok(Self::KHZ44),
            _ => Err(FLVError::UnknownAudioSoundRate(value)),
        }
    }
}

/// Only meaningful for uncompressed formats,
/// compressed formats always decode to 16 bits.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SoundSize {
    Bit8 = 0,
    Bit16 = 1,
}

impl From<u8> for SoundSize {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Bit8,
            _ => Self::Bit16,
        }
    }
}

#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SoundType {
    Mono = 0,
    Stereo = 1,
}

impl From<u8> for SoundType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Mono,
            _ => Self::Stereo,
        }
    }
}

///
/// IF SoundFormat == 10
/// The following values are defined:
/// 0 = AAC sequence header
/// 1 = AAC raw
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AACPacketType {
    AACSequenceHeader = 0,
    AACRaw = 1,
}

impl From<AACPacketType> for u8 {
    fn from(value: AACPacketType) -> Self {
        value as u8
    }
}

impl From<u8> for AACPacketType {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::AACSequenceHeader,
            _ => Self::AACRaw,
        }
    }
}

/// The audio prefix of an audio tag payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTagHeader {
    pub sound_format: SoundFormat,
    pub sound_rate: SoundRate,
    pub sound_size: SoundSize,
    pub sound_type: SoundType,
    pub aac_packet_type: Option<AACPacketType>,
}

impl AudioTagHeader {
    #[inline]
    pub fn is_aac(&self) -> bool {
        self.sound_format == SoundFormat::AAC
    }

    #[inline]
    pub fn is_sequence_header(&self) -> bool {
        self.aac_packet_type == Some(AACPacketType::AACSequenceHeader)
    }
}
