//! Sequence header and metadata detection.
//!
//! Only the first two payload bytes are looked at:
//!
//! | tag   | byte 0                       | byte 1         |
//! |-------|------------------------------|----------------|
//! | video | `(FrameType << 4) | CodecID` | AVCPacketType  |
//! | audio | `(SoundFormat << 4) | rest`  | AACPacketType  |
//!
//! Sequence headers are only recognized for AVC video and AAC audio.

use crate::tag::{
    FLVTag,
    audio_tag_header::{AACPacketType, SoundFormat, sound_format_bits},
    flv_tag_header::FLVTagType,
    video_tag_header::{AVCPacketType, CodecID, FrameTypeFLV, codec_id_bits, frame_type_bits},
};

#[cfg(test)]
mod test;

/// Shortest payload that can carry a sequence header marker.
pub const SEQUENCE_HEADER_MIN_PAYLOAD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_video_sequence_header: bool,
    pub is_audio_sequence_header: bool,
    pub is_meta_data: bool,
}

pub fn classify(tag: &FLVTag) -> Classification {
    classify_parts(tag.tag_type(), tag.payload())
}

pub fn classify_parts(tag_type: FLVTagType, payload: &[u8]) -> Classification {
    Classification {
        is_video_sequence_header: is_video_sequence_header(tag_type, payload),
        is_audio_sequence_header: is_audio_sequence_header(tag_type, payload),
        is_meta_data: is_meta_data(tag_type),
    }
}

#[inline]
pub fn is_meta_data(tag_type: FLVTagType) -> bool {
    tag_type.is_data()
}

/// AVC key frame carrying an AVC sequence header.
pub fn is_video_sequence_header(tag_type: FLVTagType, payload: &[u8]) -> bool {
    if !tag_type.is_video() || payload.len() < SEQUENCE_HEADER_MIN_PAYLOAD {
        return false;
    }
    let codec_id = codec_id_bits(payload[0]);
    let frame_type = frame_type_bits(payload[0]);
    let avc_packet_type = payload[1];
    codec_id == CodecID::AVC as u8
        && frame_type == FrameTypeFLV::KeyFrame as u8
        && avc_packet_type == AVCPacketType::SequenceHeader as u8
}

/// AAC audio carrying an AAC sequence header.
pub fn is_audio_sequence_header(tag_type: FLVTagType, payload: &[u8]) -> bool {
    if !tag_type.is_audio() || payload.len() < SEQUENCE_HEADER_MIN_PAYLOAD {
        return false;
    }
    let sound_format = sound_format_bits(payload[0]);
    let aac_packet_type = payload[1];
    sound_format == SoundFormat::AAC as u8
        && aac_packet_type == AACPacketType::AACSequenceHeader as u8
}
