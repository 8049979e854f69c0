use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FLVError {
    /// The byte source failed or ran dry before `field` was complete.
    #[error("transport error while reading {field} at offset {offset}: {source}")]
    Transport {
        field: &'static str,
        offset: u64,
        #[source]
        source: io::Error,
    },
    #[error("Io error: {0}")]
    Io(#[from] io::Error),
    #[error("bad signature: {0:?}")]
    UnknownSignature([u8; 3]),
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),
    #[error("truncated payload at offset {offset}: expect {expected} bytes, got {received}")]
    TruncatedPayload {
        expected: u32,
        received: usize,
        offset: u64,
    },
    #[error("payload of {0} bytes does not fit in a 24 bit data size")]
    PayloadTooLarge(usize),
    #[error("unknown flv tag type: {0}")]
    UnknownFLVTagType(u8),
    #[error("unknown audio sound format: {0}")]
    UnknownAudioSoundFormat(u8),
    #[error("unknown audio sound rate: {0}")]
    UnknownAudioSoundRate(u8),
    #[error("unknown video frame type: {0}")]
    UnknownVideoFrameType(u8),
    #[error("unknown video codec id: {0}")]
    UnknownCodecID(u8),
    #[error("unknown avc packet type: {0}")]
    UnknownAVCPacketType(u8),
}

impl FLVError {
    /// The byte source itself failed, nothing is known about the data.
    pub fn is_transport(&self) -> bool {
        matches!(self, FLVError::Transport { .. } | FLVError::Io(_))
    }

    /// The bytes arrived but do not form a valid flv stream.
    pub fn is_format(&self) -> bool {
        !self.is_transport()
    }

    pub(crate) fn transport(field: &'static str, offset: u64, source: io::Error) -> Self {
        FLVError::Transport {
            field,
            offset,
            source,
        }
    }
}

pub type FLVResult<T> = Result<T, FLVError>;
