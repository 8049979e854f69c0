use std::io::{self, Read};

use byteorder::{BigEndian, ByteOrder};
use tokio_util::bytes::Buf;
use utils::traits::reader::{ReadFrom, TryReadFrom};

use crate::{
    consts::{FLV_TAG_HEADER_SIZE, PREVIOUS_TAG_SIZE_SIZE},
    errors::{FLVError, FLVResult},
    telemetry::Telemetry,
};

use super::{FLVTag, flv_tag_header::FLVTagHeader};

/// Pulls whole tags out of a blocking byte source.
///
/// Each call either yields a tag whose payload holds exactly `data_size`
/// bytes, or fails. There is no resynchronization after a failure.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    telemetry: Telemetry,
    position: u64,
}

impl<R> Reader<R>
where
    R: io::Read,
{
    pub fn new(inner: R) -> Self {
        Self::with_telemetry(inner, Telemetry::current())
    }

    pub fn with_telemetry(inner: R, telemetry: Telemetry) -> Self {
        Self {
            inner,
            telemetry,
            position: 0,
        }
    }

    /// Offsets in errors are reported relative to `position`.
    pub fn starting_at(mut self, position: u64) -> Self {
        self.position = position;
        self
    }

    /// Bytes consumed from the start of the stream so far.
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Like [`Reader::read_next`], but a clean end of stream is an error too.
    pub fn read(&mut self) -> FLVResult<FLVTag> {
        match self.read_next()? {
            Some(tag) => Ok(tag),
            None => Err(FLVError::transport(
                "tag header",
                self.position,
                io::ErrorKind::UnexpectedEof.into(),
            )),
        }
    }

    /// Read the next tag, `Ok(None)` when the source ends exactly on a tag boundary.
    pub fn read_next(&mut self) -> FLVResult<Option<FLVTag>> {
        let tag_offset = self.position;
        let mut bytes = [0_u8; FLV_TAG_HEADER_SIZE];
        let filled = fill(&mut self.inner, &mut bytes)
            .map_err(|err| FLVError::transport("tag header", tag_offset, err))?;
        if filled == 0 {
            return Ok(None);
        }
        if filled < FLV_TAG_HEADER_SIZE {
            return Err(FLVError::transport(
                "tag header",
                tag_offset,
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "stream ended after {} of {} tag header bytes",
                        filled, FLV_TAG_HEADER_SIZE
                    ),
                ),
            ));
        }

        let header = FLVTagHeader::from_bytes(&bytes);
        if header.stream_id != 0 {
            self.telemetry.in_scope(|| {
                tracing::warn!(
                    "non zero stream id {} in tag at offset {}",
                    header.stream_id,
                    tag_offset
                )
            });
        }

        let payload_offset = tag_offset + FLV_TAG_HEADER_SIZE as u64;
        let expected = header.data_size as usize;
        let mut payload = Vec::with_capacity(expected);
        self.inner
            .by_ref()
            .take(expected as u64)
            .read_to_end(&mut payload)
            .map_err(|err| FLVError::transport("tag payload", payload_offset, err))?;
        if payload.len() < expected {
            self.telemetry.in_scope(|| {
                tracing::warn!(
                    "read flv tag data failed, expect {} bytes, got {}",
                    expected,
                    payload.len()
                )
            });
            return Err(FLVError::TruncatedPayload {
                expected: header.data_size,
                received: payload.len(),
                offset: payload_offset,
            });
        }

        let footer_offset = payload_offset + expected as u64;
        self.position = footer_offset;
        self.read_footer(&header, footer_offset)?;

        self.telemetry.in_scope(|| {
            tracing::trace!(
                "read flv tag: {:?}, offset: {}, data size: {}, timestamp: {}",
                header.tag_type,
                tag_offset,
                header.data_size,
                header.timestamp
            )
        });
        Ok(Some(FLVTag::from_parts(header, payload.into())))
    }

    /// PreviousTagSize is only useful for seeking backwards, a short or wrong
    /// one never fails the tag that precedes it. Any other source failure does.
    fn read_footer(&mut self, header: &FLVTagHeader, footer_offset: u64) -> FLVResult<()> {
        let mut bytes = [0_u8; PREVIOUS_TAG_SIZE_SIZE];
        let filled = fill(&mut self.inner, &mut bytes)
            .map_err(|err| FLVError::transport("previous tag size", footer_offset, err))?;
        self.position += filled as u64;
        if filled < PREVIOUS_TAG_SIZE_SIZE {
            self.telemetry.in_scope(|| {
                tracing::warn!(
                    "stream ended after {} of {} previous tag size bytes at offset {}",
                    filled,
                    PREVIOUS_TAG_SIZE_SIZE,
                    footer_offset
                )
            });
            return Ok(());
        }

        let previous_tag_size = BigEndian::read_u32(&bytes);
        let expected = FLV_TAG_HEADER_SIZE as u32 + header.data_size;
        if previous_tag_size != expected {
            self.telemetry.in_scope(|| {
                tracing::warn!(
                    "previous tag size mismatch at offset {}: expect {}, got {}",
                    footer_offset,
                    expected,
                    previous_tag_size
                )
            });
        }
        Ok(())
    }
}

/// Read until `buf` is full or the source ends, returning the bytes filled.
fn fill<R: io::Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

impl<R: io::Read> ReadFrom<R> for FLVTag {
    type Error = FLVError;
    fn read_from(reader: R) -> Result<Self, Self::Error> {
        Reader::new(reader).read()
    }
}

/// Only succeeds once the payload and the trailing PreviousTagSize are buffered.
impl<R: AsRef<[u8]>> TryReadFrom<R> for FLVTag {
    type Error = FLVError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        let tag_header = FLVTagHeader::try_read_from(reader)?;
        let Some(tag_header) = tag_header else {
            return Ok(None);
        };
        let data_size = tag_header.data_size as usize;
        if reader.remaining() < data_size + PREVIOUS_TAG_SIZE_SIZE {
            return Ok(None);
        }
        let payload = reader.copy_to_bytes(data_size);
        let _previous_tag_size = reader.get_u32();
        Ok(Some(Self::from_parts(tag_header, payload)))
    }
}
