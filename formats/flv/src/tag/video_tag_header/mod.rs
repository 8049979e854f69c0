use utils::bits::{high_nibble, low_nibble};

use crate::errors::FLVError;

pub mod reader;

/// `FrameType`, bits 7..4 of the first video payload byte.
#[inline]
pub const fn frame_type_bits(byte: u8) -> u8 {
    high_nibble(byte)
}

/// `CodecID`, bits 3..0 of the first video payload byte.
#[inline]
pub const fn codec_id_bits(byte: u8) -> u8 {
    low_nibble(byte)
}

///
/// Type of video frame.
/// The following values are defined:
/// 1 = key frame (for AVC, a seekable frame)
/// 2 = inter frame (for AVC, a non-seekable frame)
/// 3 = disposable inter frame (H.263 only)
/// 4 = generated key frame (reserved for server use only)
/// 5 = video info/command frame
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrameTypeFLV {
    KeyFrame = 1,
    InterFrame = 2,
    DisposableInterFrame = 3,
    GeneratedKeyFrame = 4,
    CommandFrame = 5,
}

impl From<FrameTypeFLV> for u8 {
    fn from(value: FrameTypeFLV) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for FrameTypeFLV {
    type Error = FLVError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::KeyFrame),
            2 => Ok(Self::InterFrame),
            3 => Ok(Self::DisposableInterFrame),
            4 => Ok(Self::GeneratedKeyFrame),
            5 => Ok(Self::CommandFrame),
            _ => Err(FLVError::UnknownVideoFrameType(value)),
        }
    }
}

///
/// Codec Identifier.
/// The following values are defined:
/// 2 = Sorenson H.263
/// 3 = Screen video
/// 4 = On2 VP6
/// 5 = On2 VP6 with alpha channel
/// 6 = Screen video version 2
/// 7 = AVC
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CodecID {
    SorensonH263 = 2,
    ScreenVideo = 3,
    On2VP6 = 4,
    On2VP6WithAlpha = 5,
    ScreenVideoV2 = 6,
    AVC = 7,
    // not standard, but used a lot in china, @see: https://github.com/CDN-Union/H265
    HEVC = 12,
}

impl From<CodecID> for u8 {
    fn from(value: CodecID) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for CodecID {
    type Error = FLVError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::SorensonH263),
            3 => Ok(Self::ScreenVideo),
            4 => Ok(Self::On2VP6),
            5 => Ok(Self::On2VP6WithAlpha),
            6 => Ok(Self::ScreenVideoV2),
            7 => Ok(Self::AVC),
            12 => Ok(Self::HEVC),
            _ => Err(FLVError::UnknownCodecID(value)),
        }
    }
}

impl CodecID {
    /// Codecs whose header carries a packet type and a composition time.
    #[inline]
    pub fn has_packet_type(&self) -> bool {
        matches!(self, Self::AVC | Self::HEVC)
    }
}

///
/// IF CodecID == 7
/// The following values are defined:
/// 0 = AVC sequence header
/// 1 = AVC NALU
/// 2 = AVC end of sequence (lower level NALU sequence ender is not required or supported)
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AVCPacketType {
    SequenceHeader = 0,
    NALU = 1,
    EndOfSequence = 2,
}

impl From<AVCPacketType> for u8 {
    fn from(value: AVCPacketType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for AVCPacketType {
    type Error = FLVError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::SequenceHeader),
            1 => Ok(Self::NALU),
            2 => Ok(Self::EndOfSequence),
            _ => Err(FLVError::UnknownAVCPacketType(value)),
        }
    }
}

/// The video prefix of a video tag payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoTagHeader {
    pub frame_type: FrameTypeFLV,
    pub codec_id: CodecID,
    pub avc_packet_type: Option<AVCPacketType>,
    ///
    /// IF CodecID == 7
    /// IF AVCPacketType == 1
    ///   Composition time offset
    /// ELSE 0
    /// See ISO 14496-12, 8.15.3 for an explanation of composition times.
    /// The offset in an FLV file is always in milliseconds.
    pub composition_time: Option<i32>,
}

impl VideoTagHeader {
    #[inline]
    pub fn is_key_frame(&self) -> bool {
        self.frame_type == FrameTypeFLV::KeyFrame
    }

    #[inline]
    pub fn is_sequence_header(&self) -> bool {
        self.avc_packet_type == Some(AVCPacketType::SequenceHeader)
    }
}
