use utils::{bits::bit_at, traits::fixed_packet::FixedPacket};

use crate::{
    consts::{FLV_TAG_HEADER_SIZE, TAG_FILTER_SHIFT},
    errors::{FLVError, FLVResult},
};

pub mod reader;
pub mod writer;

pub mod tag_type_value {
    pub const AUDIO: u8 = 8;
    pub const VIDEO: u8 = 9;
    pub const AMF3_DATA: u8 = 15;
    pub const AMF0_DATA: u8 = 18;
}

/// The tag type byte, kept verbatim.
///
/// Values outside the table, including tags with the filter bit set,
/// are carried as `Unknown` for the caller to reject.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum FLVTagType {
    Audio,
    Video,
    Amf0Data,
    Amf3Data,
    Unknown(u8),
}

impl From<u8> for FLVTagType {
    fn from(value: u8) -> Self {
        match value {
            tag_type_value::AUDIO => Self::Audio,
            tag_type_value::VIDEO => Self::Video,
            tag_type_value::AMF0_DATA => Self::Amf0Data,
            tag_type_value::AMF3_DATA => Self::Amf3Data,
            other => Self::Unknown(other),
        }
    }
}

impl From<FLVTagType> for u8 {
    fn from(value: FLVTagType) -> Self {
        match value {
            FLVTagType::Audio => tag_type_value::AUDIO,
            FLVTagType::Video => tag_type_value::VIDEO,
            FLVTagType::Amf0Data => tag_type_value::AMF0_DATA,
            FLVTagType::Amf3Data => tag_type_value::AMF3_DATA,
            FLVTagType::Unknown(value) => value,
        }
    }
}

impl FLVTagType {
    #[inline]
    pub fn is_audio(&self) -> bool {
        *self == Self::Audio
    }

    #[inline]
    pub fn is_video(&self) -> bool {
        *self == Self::Video
    }

    #[inline]
    pub fn is_amf0_data(&self) -> bool {
        *self == Self::Amf0Data
    }

    #[inline]
    pub fn is_amf3_data(&self) -> bool {
        *self == Self::Amf3Data
    }

    #[inline]
    pub fn is_data(&self) -> bool {
        self.is_amf0_data() || self.is_amf3_data()
    }

    /// Bit 5 of the raw byte, set on encrypted tags.
    #[inline]
    pub fn is_filtered(&self) -> bool {
        bit_at((*self).into(), TAG_FILTER_SHIFT)
    }

    /// Reject values outside the tag type table.
    pub fn known(self) -> FLVResult<Self> {
        match self {
            Self::Unknown(value) => Err(FLVError::UnknownFLVTagType(value)),
            known => Ok(known),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FLVTagHeader {
    pub tag_type: FLVTagType,
    /// Payload length, 24 bits on the wire.
    pub data_size: u32,
    /// 24 bit timestamp with the 8 bit extension as its high byte.
    pub timestamp: u32,
    /// Reserved, always 0 in a conforming stream.
    pub stream_id: u32,
}

impl FixedPacket for FLVTagHeader {
    fn bytes_count() -> usize {
        FLV_TAG_HEADER_SIZE
    }
}
