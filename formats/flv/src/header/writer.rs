use std::io;

use byteorder::{BigEndian, WriteBytesExt};
use utils::{bits::bool_to_bit, traits::writer::WriteTo};

use crate::{consts::type_flags, errors::FLVError};

use super::FLVHeader;

impl<W: io::Write> WriteTo<W> for FLVHeader {
    type Error = FLVError;
    fn write_to(&self, writer: &mut W) -> Result<(), Self::Error> {
        writer.write_all(&self.signature)?;
        writer.write_u8(self.version)?;

        let mut byte: u8 = 0;
        byte |= bool_to_bit(self.has_audio) << type_flags::AUDIO_SHIFT;
        byte |= bool_to_bit(self.has_video) << type_flags::VIDEO_SHIFT;
        writer.write_u8(byte)?;

        writer.write_u32::<BigEndian>(self.data_offset)?;
        // PreviousTagSize0
        writer.write_u32::<BigEndian>(0)?;
        Ok(())
    }
}
