use byteorder::ReadBytesExt;
use std::io;
use utils::traits::reader::ReadFrom;

use crate::errors::FLVError;

use super::{
    AACPacketType, AudioTagHeader, SoundFormat, SoundRate, sound_format_bits, sound_rate_bits,
    sound_size_bits, sound_type_bits,
};

impl<R: io::Read> ReadFrom<R> for AudioTagHeader {
    type Error = FLVError;
    fn read_from(mut reader: R) -> Result<Self, Self::Error> {
        let first_byte = reader.read_u8()?;
        let sound_format: SoundFormat = sound_format_bits(first_byte).try_into()?;
        let sound_rate: SoundRate = sound_rate_bits(first_byte).try_into()?;

        let mut aac_packet_type: Option<AACPacketType> = None;
        if sound_format == SoundFormat::AAC {
            aac_packet_type = Some(reader.read_u8()?.into());
        }
        Ok(AudioTagHeader {
            sound_format,
            sound_rate,
            sound_size: sound_size_bits(first_byte).into(),
            sound_type: sound_type_bits(first_byte).into(),
            aac_packet_type,
        })
    }
}
