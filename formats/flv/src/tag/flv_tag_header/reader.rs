use std::io;

use byteorder::{BigEndian, ByteOrder};
use tokio_util::bytes::Buf;
use utils::traits::{
    fixed_packet::FixedPacket,
    reader::{ReadFrom, TryReadFrom},
};

use crate::{consts::FLV_TAG_HEADER_SIZE, errors::FLVError};

use super::FLVTagHeader;

impl FLVTagHeader {
    /// Decode the fixed tag header fields, nothing here can fail.
    pub fn from_bytes(bytes: &[u8; FLV_TAG_HEADER_SIZE]) -> Self {
        let timestamp = BigEndian::read_u24(&bytes[4..7]);
        let timestamp_extended = bytes[7];
        Self {
            tag_type: bytes[0].into(),
            data_size: BigEndian::read_u24(&bytes[1..4]),
            timestamp: ((timestamp_extended as u32) << 24) | timestamp,
            stream_id: BigEndian::read_u24(&bytes[8..11]),
        }
    }
}

impl<R: io::Read> ReadFrom<R> for FLVTagHeader {
    type Error = FLVError;
    fn read_from(mut reader: R) -> Result<Self, Self::Error> {
        let mut bytes = [0_u8; FLV_TAG_HEADER_SIZE];
        reader.read_exact(&mut bytes)?;
        Ok(Self::from_bytes(&bytes))
    }
}

impl<R: AsRef<[u8]>> TryReadFrom<R> for FLVTagHeader {
    type Error = FLVError;
    fn try_read_from(reader: &mut io::Cursor<R>) -> Result<Option<Self>, Self::Error> {
        if reader.remaining() < FLVTagHeader::bytes_count() {
            return Ok(None);
        }
        Ok(Some(Self::read_from(reader)?))
    }
}
