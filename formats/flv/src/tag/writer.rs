use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use utils::traits::writer::WriteTo;

use crate::{consts::FLV_TAG_HEADER_SIZE, errors::FLVError};

use super::FLVTag;

/// Tag header, payload, then the PreviousTagSize that closes the tag.
impl<W: io::Write> WriteTo<W> for FLVTag {
    type Error = FLVError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        self.header.write_to(writer)?;
        writer.write_all(&self.payload)?;
        writer.write_u32::<BigEndian>(FLV_TAG_HEADER_SIZE as u32 + self.header.data_size)?;
        Ok(())
    }
}
