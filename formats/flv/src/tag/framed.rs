use std::{
    io::{self, Read},
    sync::Arc,
};

use tokio_util::{
    bytes::{Buf, BytesMut},
    codec::Decoder,
};
use utils::traits::{fixed_packet::FixedPacket, reader::TryReadFrom};

use crate::{
    consts::FLV_TAG_HEADER_SIZE,
    errors::{FLVError, FLVResult},
    header::{self, FLVHeader},
    message::FLVMessage,
    telemetry::Telemetry,
};

use super::{FLVTag, flv_tag_header::FLVTagHeader};

/// Frames a buffered byte stream into [`FLVMessage`]s.
///
/// The first 13 bytes are taken as the file header, every following frame is
/// one tag including its PreviousTagSize.
#[derive(Debug)]
pub struct FLVMessageFramed {
    header: Option<Arc<FLVHeader>>,
    telemetry: Telemetry,
    position: u64,
}

impl Default for FLVMessageFramed {
    fn default() -> Self {
        Self::new()
    }
}

impl FLVMessageFramed {
    pub fn new() -> Self {
        Self::with_telemetry(Telemetry::current())
    }

    pub fn with_telemetry(telemetry: Telemetry) -> Self {
        Self {
            header: None,
            telemetry,
            position: 0,
        }
    }

    /// `None` until the file header has been buffered.
    #[inline]
    pub fn header(&self) -> Option<&Arc<FLVHeader>> {
        self.header.as_ref()
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    fn decode_header(&mut self, src: &mut BytesMut) -> FLVResult<Option<Arc<FLVHeader>>> {
        if let Some(header) = &self.header {
            return Ok(Some(header.clone()));
        }
        let header_size = FLVHeader::bytes_count();
        if src.len() < header_size {
            return Ok(None);
        }
        let header =
            header::reader::Reader::with_telemetry(&src[..header_size], self.telemetry.clone())
                .read()?;
        src.advance(header_size);
        self.position += header_size as u64;
        let header = Arc::new(header);
        self.header = Some(header.clone());
        Ok(Some(header))
    }

    fn emit(&self, header: &Arc<FLVHeader>, tag: FLVTag, tag_offset: u64) -> FLVMessage {
        self.telemetry.in_scope(|| {
            tracing::trace!(
                "framed flv tag: {:?}, offset: {}, data size: {}, timestamp: {}",
                tag.tag_type(),
                tag_offset,
                tag.data_size(),
                tag.timestamp()
            )
        });
        FLVMessage::assemble(header, tag)
    }
}

impl Decoder for FLVMessageFramed {
    type Error = FLVError;
    type Item = FLVMessage;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(header) = self.decode_header(src)? else {
            return Ok(None);
        };

        let (res, position) = {
            let mut cursor = io::Cursor::new(&src[..]);
            let res = FLVTag::try_read_from(cursor.by_ref());
            (res, cursor.position())
        };
        let Some(tag) = res? else {
            return Ok(None);
        };
        src.advance(position as usize);
        let tag_offset = self.position;
        self.position += position;
        Ok(Some(self.emit(&header, tag, tag_offset)))
    }

    /// A final tag whose PreviousTagSize never arrived is still delivered.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(message) = self.decode(src)? {
            return Ok(Some(message));
        }
        if src.is_empty() {
            return Ok(None);
        }

        let Some(header) = self.header.clone() else {
            return Err(FLVError::transport(
                "flv header",
                self.position,
                io::ErrorKind::UnexpectedEof.into(),
            ));
        };

        let tag_offset = self.position;
        if src.len() < FLV_TAG_HEADER_SIZE {
            return Err(FLVError::transport(
                "tag header",
                tag_offset,
                io::ErrorKind::UnexpectedEof.into(),
            ));
        }
        let mut bytes = [0_u8; FLV_TAG_HEADER_SIZE];
        bytes.copy_from_slice(&src[..FLV_TAG_HEADER_SIZE]);
        let tag_header = FLVTagHeader::from_bytes(&bytes);
        let expected = tag_header.data_size as usize;
        let available = src.len() - FLV_TAG_HEADER_SIZE;
        if available < expected {
            return Err(FLVError::TruncatedPayload {
                expected: tag_header.data_size,
                received: available,
                offset: tag_offset + FLV_TAG_HEADER_SIZE as u64,
            });
        }

        src.advance(FLV_TAG_HEADER_SIZE);
        let payload = src.split_to(expected).freeze();
        let leftover = src.len();
        src.clear();
        self.position += (FLV_TAG_HEADER_SIZE + expected + leftover) as u64;
        self.telemetry.in_scope(|| {
            tracing::warn!(
                "no previous tag size after the tag at offset {}, {} trailing bytes",
                tag_offset,
                leftover
            )
        });
        Ok(Some(self.emit(
            &header,
            FLVTag::from_parts(tag_header, payload),
            tag_offset,
        )))
    }
}
