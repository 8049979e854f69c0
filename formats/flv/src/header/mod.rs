use utils::traits::fixed_packet::FixedPacket;

use crate::consts::{FLV_HEADER_SIZE, FLV_SIGNATURE, FLV_VERSION, PREVIOUS_TAG_SIZE_SIZE};

pub mod reader;
pub mod writer;

///
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |       F       |       L       |       V       |    Version    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Reserved|a|r|v|                  data_offset                  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |               |              previous_tag_size_0              |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |               |
/// +-+-+-+-+-+-+-+-+
///
/// Built once per stream and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FLVHeader {
    signature: [u8; 3], // always FLV
    version: u8,        // always 1
    // reserved: 5 bits
    has_audio: bool,
    // reserved: 1 bit
    has_video: bool,
    data_offset: u32, // header bytes length, 9 for version 1
}

impl FLVHeader {
    pub fn new(has_audio: bool, has_video: bool) -> Self {
        Self {
            signature: FLV_SIGNATURE,
            version: FLV_VERSION,
            has_audio,
            has_video,
            data_offset: FLV_HEADER_SIZE as u32,
        }
    }

    #[inline]
    pub fn signature(&self) -> [u8; 3] {
        self.signature
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub fn has_audio(&self) -> bool {
        self.has_audio
    }

    #[inline]
    pub fn has_video(&self) -> bool {
        self.has_video
    }

    #[inline]
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }
}

/// The header block plus the leading PreviousTagSize0.
impl FixedPacket for FLVHeader {
    fn bytes_count() -> usize {
        FLV_HEADER_SIZE + PREVIOUS_TAG_SIZE_SIZE
    }
}
