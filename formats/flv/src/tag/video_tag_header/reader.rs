use byteorder::{BigEndian, ReadBytesExt};
use std::io;
use utils::traits::reader::ReadFrom;

use crate::errors::FLVError;

use super::{CodecID, FrameTypeFLV, VideoTagHeader, codec_id_bits, frame_type_bits};

impl<R: io::Read> ReadFrom<R> for VideoTagHeader {
    type Error = FLVError;
    fn read_from(mut reader: R) -> Result<Self, Self::Error> {
        let byte = reader.read_u8()?;
        let frame_type: FrameTypeFLV = frame_type_bits(byte).try_into()?;
        let codec_id: CodecID = codec_id_bits(byte).try_into()?;

        let mut avc_packet_type = None;
        let mut composition_time = None;
        if codec_id.has_packet_type() {
            avc_packet_type = Some(reader.read_u8()?.try_into()?);
            composition_time = Some(reader.read_i24::<BigEndian>()?);
        }
        Ok(VideoTagHeader {
            frame_type,
            codec_id,
            avc_packet_type,
            composition_time,
        })
    }
}
