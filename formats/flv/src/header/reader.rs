use std::io;

use byteorder::{BigEndian, ByteOrder};
use utils::{
    bits::bit_at,
    traits::{fixed_packet::FixedPacket, reader::ReadFrom},
};

use crate::{
    consts::{FLV_HEADER_SIZE, FLV_SIGNATURE, FLV_VERSION, type_flags},
    errors::{FLVError, FLVResult},
    telemetry::Telemetry,
};

use super::FLVHeader;

#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    telemetry: Telemetry,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    pub fn new(inner: R) -> Self {
        Self::with_telemetry(inner, Telemetry::current())
    }

    pub fn with_telemetry(inner: R, telemetry: Telemetry) -> Self {
        Self { inner, telemetry }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Consume exactly 13 bytes: the header block and PreviousTagSize0.
    pub fn read(&mut self) -> FLVResult<FLVHeader> {
        let mut bytes = [0_u8; 13];
        debug_assert_eq!(bytes.len(), FLVHeader::bytes_count());
        self.inner
            .read_exact(&mut bytes)
            .map_err(|err| FLVError::transport("flv header", 0, err))?;

        let signature = [bytes[0], bytes[1], bytes[2]];
        if signature != FLV_SIGNATURE {
            self.telemetry
                .in_scope(|| tracing::warn!("flv header signature is wrong: {:?}", signature));
            return Err(FLVError::UnknownSignature(signature));
        }

        let version = bytes[3];
        if version != FLV_VERSION {
            self.telemetry
                .in_scope(|| tracing::warn!("flv header version invalid: {}", version));
            return Err(FLVError::UnsupportedVersion(version));
        }

        let flags = bytes[4];
        let data_offset = BigEndian::read_u32(&bytes[5..9]);
        // bytes 9..13 hold PreviousTagSize0, consumed but not checked

        let header = FLVHeader {
            signature,
            version,
            has_audio: bit_at(flags, type_flags::AUDIO_SHIFT),
            has_video: bit_at(flags, type_flags::VIDEO_SHIFT),
            data_offset,
        };
        self.telemetry.in_scope(|| {
            if data_offset as usize != FLV_HEADER_SIZE {
                tracing::warn!(
                    "unusual flv data offset: {}, tags are read right after the header",
                    data_offset
                );
            }
            tracing::debug!("read flv header: {:?}", header);
        });
        Ok(header)
    }
}

impl<R: io::Read> ReadFrom<R> for FLVHeader {
    type Error = FLVError;
    fn read_from(reader: R) -> Result<Self, Self::Error> {
        Reader::new(reader).read()
    }
}
