use std::sync::Arc;

use crate::{
    classify::{Classification, classify},
    header::FLVHeader,
    tag::FLVTag,
};


/// A classified tag, ready for whoever consumes the stream.
///
/// The stream header is shared by every message of the stream, it is
/// reference counted and never copied.
#[derive(Debug, Clone)]
pub struct FLVMessage {
    tag: FLVTag,
    header: Arc<FLVHeader>,
    classification: Classification,
}

impl FLVMessage {
    /// Classify `tag` once and bundle it with the stream header.
    pub fn assemble(header: &Arc<FLVHeader>, tag: FLVTag) -> Self {
        let classification = classify(&tag);
        Self {
            tag,
            header: Arc::clone(header),
            classification,
        }
    }

    #[inline]
    pub fn tag(&self) -> &FLVTag {
        &self.tag
    }

    #[inline]
    pub fn header(&self) -> &Arc<FLVHeader> {
        &self.header
    }

    #[inline]
    pub fn classification(&self) -> Classification {
        self.classification
    }

    #[inline]
    pub fn is_meta_data(&self) -> bool {
        self.classification.is_meta_data
    }

    #[inline]
    pub fn is_video_sequence_header(&self) -> bool {
        self.classification.is_video_sequence_header
    }

    #[inline]
    pub fn is_audio_sequence_header(&self) -> bool {
        self.classification.is_audio_sequence_header
    }

    #[inline]
    pub fn is_sequence_header(&self) -> bool {
        self.is_video_sequence_header() || self.is_audio_sequence_header()
    }

    pub fn into_tag(self) -> FLVTag {
        self.tag
    }
}
