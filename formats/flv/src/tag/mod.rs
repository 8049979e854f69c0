use num::ToPrimitive;
use tokio_util::bytes::Bytes;
use utils::traits::{dynamic_sized_packet::DynamicSizedPacket, reader::ReadFrom};

use crate::{
    consts::{FLV_TAG_HEADER_SIZE, MAX_TAG_DATA_SIZE, PREVIOUS_TAG_SIZE_SIZE},
    errors::{FLVError, FLVResult},
};

use audio_tag_header::AudioTagHeader;
use flv_tag_header::{FLVTagHeader, FLVTagType};
use video_tag_header::VideoTagHeader;

pub mod audio_tag_header;
pub mod flv_tag_header;
pub mod framed;
pub mod reader;
#[cfg(test)]
mod test;
pub mod video_tag_header;
pub mod writer;

/// One tag of the stream: the fixed 11 byte header and exactly
/// `data_size` bytes of payload. The payload is opaque at this level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FLVTag {
    header: FLVTagHeader,
    payload: Bytes,
}

impl FLVTag {
    /// Build a tag around `payload`, deriving the data size from it.
    pub fn new(tag_type: FLVTagType, timestamp: u32, payload: impl Into<Bytes>) -> FLVResult<Self> {
        let payload: Bytes = payload.into();
        let data_size = payload
            .len()
            .to_u32()
            .filter(|size| *size <= MAX_TAG_DATA_SIZE)
            .ok_or(FLVError::PayloadTooLarge(payload.len()))?;
        Ok(Self {
            header: FLVTagHeader {
                tag_type,
                data_size,
                timestamp,
                stream_id: 0,
            },
            payload,
        })
    }

    pub(crate) fn from_parts(header: FLVTagHeader, payload: Bytes) -> Self {
        debug_assert_eq!(header.data_size as usize, payload.len());
        Self { header, payload }
    }

    #[inline]
    pub fn header(&self) -> &FLVTagHeader {
        &self.header
    }

    #[inline]
    pub fn tag_type(&self) -> FLVTagType {
        self.header.tag_type
    }

    #[inline]
    pub fn data_size(&self) -> u32 {
        self.header.data_size
    }

    #[inline]
    pub fn timestamp(&self) -> u32 {
        self.header.timestamp
    }

    #[inline]
    pub fn stream_id(&self) -> u32 {
        self.header.stream_id
    }

    #[inline]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Decode the audio prefix of the payload, `None` for non audio tags.
    pub fn audio_tag_header(&self) -> FLVResult<Option<AudioTagHeader>> {
        if !self.tag_type().is_audio() {
            return Ok(None);
        }
        Ok(Some(AudioTagHeader::read_from(&self.payload[..])?))
    }

    /// Decode the video prefix of the payload, `None` for non video tags.
    pub fn video_tag_header(&self) -> FLVResult<Option<VideoTagHeader>> {
        if !self.tag_type().is_video() {
            return Ok(None);
        }
        Ok(Some(VideoTagHeader::read_from(&self.payload[..])?))
    }
}

/// Tag header, payload and the trailing PreviousTagSize.
impl DynamicSizedPacket for FLVTag {
    fn get_packet_bytes_count(&self) -> usize {
        FLV_TAG_HEADER_SIZE + self.payload.len() + PREVIOUS_TAG_SIZE_SIZE
    }
}
