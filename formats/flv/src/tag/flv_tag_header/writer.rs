use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use utils::traits::writer::WriteTo;

use crate::{consts::MAX_TAG_DATA_SIZE, errors::FLVError};

use super::FLVTagHeader;

impl<W: io::Write> WriteTo<W> for FLVTagHeader {
    type Error = FLVError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        if self.data_size > MAX_TAG_DATA_SIZE {
            return Err(FLVError::PayloadTooLarge(self.data_size as usize));
        }
        writer.write_u8(self.tag_type.into())?;
        writer.write_u24::<BigEndian>(self.data_size)?;
        writer.write_u24::<BigEndian>(self.timestamp & 0x00FF_FFFF)?;
        writer.write_u8(((self.timestamp >> 24) & 0xFF) as u8)?;
        writer.write_u24::<BigEndian>(self.stream_id & 0x00FF_FFFF)?;
        Ok(())
    }
}
